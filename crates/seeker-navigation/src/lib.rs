//! Go-to-goal navigation for a differential-drive robot.
//!
//! The controller turns a [`GoalPoint`] and the robot's current
//! [`Pose`](seeker_kinematics::Pose) into either a
//! [`WheelCommand`](seeker_kinematics::WheelCommand) or a stop signal.

pub mod controller;
pub mod error;
pub mod goal;

pub use controller::{ControlAction, ControllerConfig, DriveMode, GoToGoalController, normalize_angle};
pub use error::NavigationError;
pub use goal::GoalPoint;
