#![warn(missing_docs)]

//! Go-to-goal control law.
//!
//! A proportional / bang-bang hybrid: while the heading error is larger than
//! the switch threshold the robot turns in place at a fixed wheel speed,
//! otherwise it drives forward at `base_speed` with a steering correction
//! proportional to the residual heading error. There is no integral or
//! derivative term and therefore no wind-up handling.

use std::f64::consts::PI;

use seeker_kinematics::{Pose, WheelCommand};
use tracing::trace;

use crate::error::NavigationError;
use crate::goal::GoalPoint;

/// Tunable parameters of the [`GoToGoalController`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControllerConfig {
    /// Distance to the goal (px) below which the controller stops.
    pub stop_distance: f64,
    /// Heading error (rad) above which the robot rotates in place.
    pub heading_threshold: f64,
    /// Forward wheel speed in forward-correct mode (px/s).
    pub base_speed: f64,
    /// Wheel speed magnitude while rotating in place (px/s).
    pub rotation_gain: f64,
    /// Steering gain applied to the heading error in forward-correct mode.
    pub correction_gain: f64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            stop_distance: 15.0,
            heading_threshold: 0.2,
            base_speed: 5.0,
            rotation_gain: 2.0,
            correction_gain: 2.0,
        }
    }
}

impl ControllerConfig {
    /// Checks that every parameter is in range.
    ///
    /// # Errors
    ///
    /// Returns the first [`NavigationError`] found.
    pub fn validate(&self) -> Result<(), NavigationError> {
        if !(self.stop_distance > 0.0) || !self.stop_distance.is_finite() {
            return Err(NavigationError::InvalidStopDistance("must be positive and finite"));
        }
        if !(self.heading_threshold >= 0.0) || !self.heading_threshold.is_finite() {
            return Err(NavigationError::InvalidHeadingThreshold("must be non-negative and finite"));
        }
        if !(self.base_speed > 0.0) || !self.base_speed.is_finite() {
            return Err(NavigationError::InvalidGain("base speed must be positive and finite"));
        }
        if !(self.rotation_gain > 0.0) || !self.rotation_gain.is_finite() {
            return Err(NavigationError::InvalidGain("rotation gain must be positive and finite"));
        }
        if !(self.correction_gain >= 0.0) || !self.correction_gain.is_finite() {
            return Err(NavigationError::InvalidGain("correction gain must be non-negative and finite"));
        }
        Ok(())
    }
}

/// Which branch of the control law produced a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveMode {
    /// `|error| > threshold`: opposite wheel speeds, no net translation.
    RotateInPlace,
    /// `|error| <= threshold`: forward at base speed with proportional correction.
    ForwardCorrect,
}

/// The outcome of one controller evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlAction {
    /// Keep driving with `command`.
    Drive {
        /// Wheel velocities to apply for the next step.
        command: WheelCommand,
        /// Branch of the control law that was taken.
        mode: DriveMode,
        /// Normalized heading error (rad).
        heading_error: f64,
        /// Distance to the goal (px).
        distance: f64,
    },
    /// The goal is within the stop distance; no further commands.
    Stop {
        /// Distance to the goal (px).
        distance: f64,
    },
}

impl ControlAction {
    /// Distance to the goal at the time the action was computed.
    pub fn distance(&self) -> f64 {
        match *self {
            ControlAction::Drive { distance, .. } | ControlAction::Stop { distance } => distance,
        }
    }
}

/// Wraps an angle into `(-PI, PI]`.
///
/// Computes `((angle + PI) mod 2PI) - PI` with a Euclidean remainder and maps
/// the single value `-PI` onto `PI`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped <= -PI { PI } else { wrapped }
}

/// Sign of `x` with `sign(0) == 0`.
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Go-to-goal controller for a differential-drive robot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoToGoalController {
    config: ControllerConfig,
}

impl GoToGoalController {
    /// Construct a controller.
    ///
    /// # Errors
    ///
    /// Returns a [`NavigationError`] if `config` fails [`ControllerConfig::validate`].
    pub fn new(config: ControllerConfig) -> Result<Self, NavigationError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the controller configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Normalized heading error from `pose` towards `goal`.
    pub fn heading_error(&self, pose: &Pose, goal: GoalPoint) -> f64 {
        let (gx, gy) = goal.as_f64();
        let angle_to_goal = (gy - pose.y).atan2(gx - pose.x);
        normalize_angle(angle_to_goal - pose.theta)
    }

    /// Applies the two-mode law to an already normalized heading error.
    ///
    /// At exactly `|error| == heading_threshold` the forward-correct branch is taken.
    pub fn wheel_command(&self, heading_error: f64) -> (WheelCommand, DriveMode) {
        let cfg = &self.config;
        if heading_error.abs() > cfg.heading_threshold {
            let s = sign(heading_error);
            (
                WheelCommand::new(-s * cfg.rotation_gain, s * cfg.rotation_gain),
                DriveMode::RotateInPlace,
            )
        } else {
            (
                WheelCommand::new(
                    cfg.base_speed - cfg.correction_gain * heading_error,
                    cfg.base_speed + cfg.correction_gain * heading_error,
                ),
                DriveMode::ForwardCorrect,
            )
        }
    }

    /// Computes the next action for a robot at `pose` heading for `goal`.
    pub fn compute(&self, pose: &Pose, goal: GoalPoint) -> ControlAction {
        let (gx, gy) = goal.as_f64();
        let distance = pose.distance_to(gx, gy);

        if distance < self.config.stop_distance {
            trace!(distance, "Goal within stop distance");
            return ControlAction::Stop { distance };
        }

        let heading_error = self.heading_error(pose, goal);
        let (command, mode) = self.wheel_command(heading_error);
        trace!(distance, heading_error, ?mode, left = command.left, right = command.right, "Computed wheel command");

        ControlAction::Drive {
            command,
            mode,
            heading_error,
            distance,
        }
    }
}
