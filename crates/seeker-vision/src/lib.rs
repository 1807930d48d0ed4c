//! Colour blob location for goal sensing.
//!
//! [`BlobLocator`] thresholds an RGB image in HSV space, cleans the mask with
//! a morphological closing and opening (`imageproc`), picks the external
//! contour enclosing the largest area and reports the minimal enclosing circle
//! of its points.

pub mod circle;
pub mod error;
pub mod hsv;
pub mod locator;

pub use error::VisionError;
pub use hsv::{Hsv, HsvRange};
pub use locator::{BlobLocator, Detection, VisionConfig};
