#![warn(missing_docs)]

//! Error types for the kinematics library.
//!
//! This module defines the errors that can occur when building a robot model
//! or integrating wheel velocities into a new pose.

use core::fmt;

/// Errors that can occur in kinematic calculations.
#[derive(Debug, Clone, PartialEq)]
pub enum KinematicsError {
    /// Error for invalid wheel base.
    /// This variant is returned when a wheel base is provided that is not positive.
    InvalidWheelBase(&'static str),
    /// Error for negative time delta.
    /// This variant is returned when a negative time delta is used for pose updates.
    NegativeTimeDelta(&'static str),
    /// Error for NaN or infinite inputs.
    /// This variant is returned when a pose or wheel velocity is not a finite number.
    NonFiniteValue(&'static str),
}

impl fmt::Display for KinematicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KinematicsError::InvalidWheelBase(msg) => write!(f, "Invalid wheel base: {}", msg),
            KinematicsError::NegativeTimeDelta(msg) => write!(f, "Negative time delta: {}", msg),
            KinematicsError::NonFiniteValue(msg) => write!(f, "Non-finite value: {}", msg),
        }
    }
}

impl core::error::Error for KinematicsError {}
