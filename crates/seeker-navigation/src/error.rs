//! This module defines the error types used by the `seeker-navigation` crate.

#![warn(missing_docs)]

/// Error type for navigation operations.
///
/// All variants are produced while validating a controller configuration, so
/// a badly tuned controller is rejected at construction instead of clamped.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationError {
    /// Error for invalid stop distance.
    /// This variant is returned when the stop distance is not a positive, finite number.
    InvalidStopDistance(&'static str),
    /// Error for invalid heading threshold.
    /// This variant is returned when the mode-switch threshold is negative or not finite.
    InvalidHeadingThreshold(&'static str),
    /// Error for invalid speed or gain.
    /// This variant is returned when the base speed or a gain is out of range.
    InvalidGain(&'static str),
}

impl core::fmt::Display for NavigationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            NavigationError::InvalidStopDistance(msg) => write!(f, "Invalid stop distance: {}", msg),
            NavigationError::InvalidHeadingThreshold(msg) => {
                write!(f, "Invalid heading threshold: {}", msg)
            }
            NavigationError::InvalidGain(msg) => write!(f, "Invalid controller gain: {}", msg),
        }
    }
}

impl core::error::Error for NavigationError {}
