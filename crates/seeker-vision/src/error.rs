//! This module defines the error types used by the `seeker-vision` crate.

#![warn(missing_docs)]

/// Error type for vision configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum VisionError {
    /// Error for an empty colour range.
    /// This variant is returned when a lower HSV bound exceeds its upper bound,
    /// or a hue bound lies outside `0..180`.
    EmptyColorRange(&'static str),
    /// Error for invalid structuring element size.
    /// This variant is returned when the morphology kernel size is even or
    /// outside `1..=511`.
    InvalidKernelSize(&'static str),
    /// Error for invalid minimum blob radius.
    /// This variant is returned when the minimum radius is negative or not finite.
    InvalidMinRadius(&'static str),
}

impl core::fmt::Display for VisionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            VisionError::EmptyColorRange(msg) => write!(f, "Empty colour range: {}", msg),
            VisionError::InvalidKernelSize(msg) => write!(f, "Invalid kernel size: {}", msg),
            VisionError::InvalidMinRadius(msg) => write!(f, "Invalid minimum radius: {}", msg),
        }
    }
}

impl core::error::Error for VisionError {}
