#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![doc = "A `no_std` library for 2D differential-drive robot kinematics."]
#![doc = ""]
#![doc = "This crate provides the robot pose, wheel velocity commands and a"]
#![doc = "differential-drive robot model that integrates commands into a pose history."]

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;
use libm::{cos, sin};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::KinematicsError;

/// A 2‑D pose `(x, y, θ)` in pixels and radians (θ measured from the x‑axis
/// towards the y‑axis of the world image).
/// Robot pose in the image frame.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    /// World‑frame x position (px).
    pub x: f64,
    /// World‑frame y position (px).
    pub y: f64,
    /// Heading (rad). Not wrapped on write.
    pub theta: f64,
}

impl Pose {
    /// Construct a new pose.
    ///
    /// # Arguments
    ///
    /// * `x`: World-frame x position in pixels.
    /// * `y`: World-frame y position in pixels.
    /// * `theta`: Heading in radians.
    pub const fn new(x: f64, y: f64, theta: f64) -> Self {
        Pose { x, y, theta }
    }

    /// Euclidean distance from this pose's position to the point `(x, y)`.
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        libm::hypot(x - self.x, y - self.y)
    }

    /// Returns `true` if every component is a finite number.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.theta.is_finite()
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x: {:.2}, y: {:.2}, θ: {:.2} rad)", self.x, self.y, self.theta)
    }
}

/// Left and right wheel linear velocities, produced fresh on every control step.
/// Left and right wheel velocities.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelCommand {
    /// Left wheel velocity (px/s).
    pub left: f64,
    /// Right wheel velocity (px/s).
    pub right: f64,
}

impl WheelCommand {
    /// Construct a wheel command.
    ///
    /// # Arguments
    ///
    /// * `left`: Left wheel velocity (px/s).
    /// * `right`: Right wheel velocity (px/s).
    pub const fn new(left: f64, right: f64) -> Self {
        WheelCommand { left, right }
    }
}

impl fmt::Display for WheelCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(vL: {:.2} px/s, vR: {:.2} px/s)", self.left, self.right)
    }
}

/// Linear and angular chassis velocities.
/// These represent the overall motion of the robot's chassis.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChassisSpeeds {
    /// Linear speed of the chassis center (px/s).
    pub v: f64,
    /// Angular speed of the chassis (rad/s).
    pub omega: f64,
}

impl ChassisSpeeds {
    /// Construct chassis speeds.
    pub const fn new(v: f64, omega: f64) -> Self {
        ChassisSpeeds { v, omega }
    }
}

impl fmt::Display for ChassisSpeeds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(v: {:.2} px/s, ω: {:.2} rad/s)", self.v, self.omega)
    }
}

/// A simulated differential‑drive robot.
///
/// The robot owns its current pose, a fixed wheel base and the full ordered
/// history of every pose it has occupied, starting with the initial pose.
/// The history only ever grows: each accepted [`set_pose`](Self::set_pose)
/// (and therefore each [`advance`](Self::advance)) appends exactly one entry.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct DifferentialDriveRobot {
    /// Current pose.
    pose: Pose,
    /// Distance between the two drive wheels (px).
    wheel_base: f64,
    /// Every pose the robot has held, oldest first.
    history: Vec<Pose>,
}

impl DifferentialDriveRobot {
    /// Construct a robot at `start` with the given wheel base.
    ///
    /// # Errors
    ///
    /// Returns `Err(KinematicsError::InvalidWheelBase)` if `wheel_base` is not positive.
    /// Returns `Err(KinematicsError::NonFiniteValue)` if `start` has a NaN or infinite component.
    pub fn new(start: Pose, wheel_base: f64) -> Result<Self, KinematicsError> {
        // `!(x > 0.0)` also rejects NaN
        if !(wheel_base > 0.0) || !wheel_base.is_finite() {
            return Err(KinematicsError::InvalidWheelBase("must be positive and finite"));
        }
        if !start.is_finite() {
            return Err(KinematicsError::NonFiniteValue("start pose must be finite"));
        }

        let mut history = Vec::new();
        history.push(start);

        Ok(DifferentialDriveRobot {
            pose: start,
            wheel_base,
            history,
        })
    }

    /// Returns the wheel base.
    pub fn wheel_base(&self) -> f64 {
        self.wheel_base
    }

    /// Returns the current pose. Pure read.
    pub fn get_pose(&self) -> Pose {
        self.pose
    }

    /// Returns every pose held so far, oldest first.
    pub fn history(&self) -> &[Pose] {
        &self.history
    }

    /// Consumes the robot and returns its pose history.
    pub fn into_history(self) -> Vec<Pose> {
        self.history
    }

    /// Calculates the chassis speeds produced by a wheel command.
    ///
    /// `v = (vL + vR) / 2`, `ω = (vR − vL) / wheel_base`.
    pub fn forward_kinematics(&self, command: WheelCommand) -> ChassisSpeeds {
        let v = (command.left + command.right) / 2.0;
        let omega = (command.right - command.left) / self.wheel_base;

        ChassisSpeeds::new(v, omega)
    }

    /// Overwrites the current pose and appends it to the history.
    ///
    /// This is the only operation that mutates the robot.
    ///
    /// # Errors
    ///
    /// Returns `Err(KinematicsError::NonFiniteValue)` if any component is NaN or
    /// infinite; the robot is left untouched in that case.
    pub fn set_pose(&mut self, x: f64, y: f64, theta: f64) -> Result<Pose, KinematicsError> {
        let pose = Pose::new(x, y, theta);
        if !pose.is_finite() {
            return Err(KinematicsError::NonFiniteValue("pose must be finite"));
        }

        self.pose = pose;
        self.history.push(pose);
        Ok(pose)
    }

    /// Moves the robot by applying `left`/`right` wheel velocities for `dt` seconds.
    ///
    /// The heading is integrated first and the translation for the step is
    /// projected along the *new* heading:
    ///
    /// ```text
    /// θ' = θ + ω·dt
    /// x' = x + v·cos(θ')·dt
    /// y' = y + v·sin(θ')·dt
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `Err(KinematicsError::NegativeTimeDelta)` if `dt` is negative.
    /// Returns `Err(KinematicsError::NonFiniteValue)` if a velocity, `dt` or the
    /// resulting pose is not finite.
    ///
    /// # Returns
    ///
    /// The robot's new pose.
    pub fn advance(&mut self, left: f64, right: f64, dt: f64) -> Result<Pose, KinematicsError> {
        if dt < 0.0 {
            return Err(KinematicsError::NegativeTimeDelta("must be non-negative"));
        }
        if !left.is_finite() || !right.is_finite() || !dt.is_finite() {
            return Err(KinematicsError::NonFiniteValue("wheel velocities and dt must be finite"));
        }

        let speeds = self.forward_kinematics(WheelCommand::new(left, right));
        let current = self.pose;

        let theta = current.theta + speeds.omega * dt;
        let x = current.x + speeds.v * cos(theta) * dt;
        let y = current.y + speeds.v * sin(theta) * dt;

        self.set_pose(x, y, theta)
    }

    /// Applies a [`WheelCommand`] for `dt` seconds. See [`advance`](Self::advance).
    pub fn apply(&mut self, command: WheelCommand, dt: f64) -> Result<Pose, KinematicsError> {
        self.advance(command.left, command.right, dt)
    }
}

impl fmt::Display for DifferentialDriveRobot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DifferentialDriveRobot (L: {:.2} px, pose: {})", self.wheel_base, self.pose)
    }
}
