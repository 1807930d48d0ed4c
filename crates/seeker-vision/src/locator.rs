#![warn(missing_docs)]

//! Colour blob locator.
//!
//! Pipeline: RGB → HSV range mask → closing → opening → external contours →
//! largest contour area → minimal enclosing circle of its points.

use image::{GrayImage, RgbImage};
use imageproc::contours::{BorderType, Contour, find_contours};
use imageproc::distance_transform::Norm;
use imageproc::geometry::contour_area;
use imageproc::morphology;
use tracing::debug;

use crate::circle::min_enclosing_circle;
use crate::error::VisionError;
use crate::hsv::{HsvRange, in_range};

/// Largest supported structuring element side.
pub const MAX_KERNEL_SIZE: u32 = 2 * u8::MAX as u32 + 1;

/// Blob locator parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VisionConfig {
    /// Inclusive HSV range of the target colour.
    pub color: HsvRange,
    /// Side length of the square structuring element (px). Odd, at most 511.
    pub kernel_size: u32,
    /// A detection's radius, truncated to whole pixels, must be strictly
    /// greater than this (px).
    pub min_radius: f64,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            color: HsvRange::default(),
            kernel_size: 5,
            min_radius: 5.0,
        }
    }
}

impl VisionConfig {
    /// Checks that every parameter is in range.
    ///
    /// # Errors
    ///
    /// Returns the first [`VisionError`] found.
    pub fn validate(&self) -> Result<(), VisionError> {
        self.color.validate()?;
        if self.kernel_size % 2 == 0 || self.kernel_size > MAX_KERNEL_SIZE {
            return Err(VisionError::InvalidKernelSize("must be odd and at most 511"));
        }
        if !(self.min_radius >= 0.0) || !self.min_radius.is_finite() {
            return Err(VisionError::InvalidMinRadius("must be non-negative and finite"));
        }
        Ok(())
    }
}

/// A located blob.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    /// Centre x of the minimal enclosing circle (px).
    pub x: f64,
    /// Centre y of the minimal enclosing circle (px).
    pub y: f64,
    /// Radius of the minimal enclosing circle (px).
    pub radius: f64,
    /// Area of the polygon traced by the blob's outer contour (px²).
    pub area: f64,
}

/// Finds the largest blob of a target colour in an image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlobLocator {
    config: VisionConfig,
}

impl BlobLocator {
    /// Construct a locator.
    ///
    /// # Errors
    ///
    /// Returns a [`VisionError`] if `config` fails [`VisionConfig::validate`].
    pub fn new(config: VisionConfig) -> Result<Self, VisionError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the locator configuration.
    pub fn config(&self) -> &VisionConfig {
        &self.config
    }

    /// The thresholded and cleaned binary mask the locator works on.
    pub fn mask(&self, image: &RgbImage) -> GrayImage {
        // A k-radius L∞ ball is the (2k + 1)-square kernel
        let k = (self.config.kernel_size / 2) as u8;
        let raw = in_range(image, &self.config.color);
        let closed = morphology::close(&raw, Norm::LInf, k);
        morphology::open(&closed, Norm::LInf, k)
    }

    /// Locates the largest matching blob, or `None` if nothing large enough is found.
    pub fn locate(&self, image: &RgbImage) -> Option<Detection> {
        self.locate_with_mask(image).0
    }

    /// Like [`locate`](Self::locate) but also returns the cleaned mask for display.
    pub fn locate_with_mask(&self, image: &RgbImage) -> (Option<Detection>, GrayImage) {
        let mask = self.mask(image);
        let contours: Vec<Contour<i32>> = find_contours(&mask);
        let external: Vec<(&Contour<i32>, f64)> = contours
            .iter()
            .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
            .map(|c| (c, contour_area(&c.points).abs()))
            .collect();
        debug!(contours = contours.len(), external = external.len(), "Extracted contours");

        // First contour wins ties
        let largest = external
            .into_iter()
            .fold(None, |best: Option<(&Contour<i32>, f64)>, cand| match best {
                Some(b) if b.1 >= cand.1 => Some(b),
                _ => Some(cand),
            });

        let detection = largest.and_then(|(contour, area)| {
            let points: Vec<(f64, f64)> = contour
                .points
                .iter()
                .map(|p| (f64::from(p.x), f64::from(p.y)))
                .collect();
            let circle = min_enclosing_circle(&points)?;
            debug!(x = circle.x, y = circle.y, radius = circle.radius, area, "Largest blob");

            if circle.radius.trunc() > self.config.min_radius {
                Some(Detection {
                    x: circle.x,
                    y: circle.y,
                    radius: circle.radius,
                    area,
                })
            } else {
                debug!(radius = circle.radius, min_radius = self.config.min_radius, "Blob too small");
                None
            }
        });

        (detection, mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
    use imageproc::rect::Rect;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const RED: Rgb<u8> = Rgb([255, 0, 0]);

    fn red_square(x: i32, y: i32, side: u32) -> RgbImage {
        let mut image = RgbImage::from_pixel(60, 60, WHITE);
        draw_filled_rect_mut(&mut image, Rect::at(x, y).of_size(side, side), RED);
        image
    }

    fn locator() -> BlobLocator {
        BlobLocator::new(VisionConfig::default()).unwrap()
    }

    #[test]
    fn test_red_disc_on_white() {
        let mut image = RgbImage::from_pixel(500, 500, WHITE);
        draw_filled_circle_mut(&mut image, (400, 400), 20, RED);

        let d = locator().locate(&image).expect("disc should be detected");
        assert!((d.x - 400.0).abs() <= 1.0, "x = {}", d.x);
        assert!((d.y - 400.0).abs() <= 1.0, "y = {}", d.y);
        assert!((d.radius - 20.0).abs() <= 2.0, "radius = {}", d.radius);
    }

    #[test]
    fn test_all_white_has_no_detection() {
        let image = RgbImage::from_pixel(200, 200, WHITE);
        assert!(locator().locate(&image).is_none());
    }

    #[test]
    fn test_empty_image_has_no_detection() {
        assert!(locator().locate(&RgbImage::new(0, 0)).is_none());
    }

    #[test]
    fn test_blue_marker_is_ignored() {
        let mut image = RgbImage::from_pixel(200, 200, WHITE);
        draw_filled_circle_mut(&mut image, (50, 100), 10, Rgb([0, 0, 255]));
        assert!(locator().locate(&image).is_none());
    }

    #[test]
    fn test_largest_blob_wins() {
        let mut image = RgbImage::from_pixel(300, 300, WHITE);
        draw_filled_circle_mut(&mut image, (60, 60), 12, RED);
        draw_filled_circle_mut(&mut image, (200, 220), 30, RED);

        let d = locator().locate(&image).unwrap();
        assert!((d.x - 200.0).abs() <= 1.0);
        assert!((d.y - 220.0).abs() <= 1.0);
        assert!((d.radius - 30.0).abs() <= 2.0);
    }

    #[test]
    fn test_speckle_is_cleaned_up() {
        let mut image = RgbImage::from_pixel(100, 100, WHITE);
        for (x, y) in [(10, 10), (50, 80), (90, 5), (30, 60)] {
            image.put_pixel(x, y, RED);
        }
        let (detection, mask) = locator().locate_with_mask(&image);
        assert!(detection.is_none());
        assert!(mask.pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn test_small_blob_is_rejected() {
        let mut image = RgbImage::from_pixel(100, 100, WHITE);
        draw_filled_circle_mut(&mut image, (50, 50), 4, RED);
        assert!(locator().locate(&image).is_none());
    }

    #[test]
    fn test_radius_is_truncated_before_size_check() {
        // 9x9 square: enclosing radius sqrt(32) ~ 5.66 truncates to 5
        let image = red_square(20, 20, 9);
        assert!(locator().locate(&image).is_none());

        // 13x13 square: sqrt(72) ~ 8.49 truncates to 8
        let image = red_square(20, 20, 13);
        let d = locator().locate(&image).expect("square should be detected");
        assert!((d.x - 26.0).abs() < 1e-9);
        assert!((d.y - 26.0).abs() < 1e-9);
        assert!((d.radius - 72.0_f64.sqrt()).abs() < 1e-9);
        assert!((d.area - 144.0).abs() < 1e-9);
    }

    #[test]
    fn test_min_radius_is_configurable() {
        let mut image = RgbImage::from_pixel(100, 100, WHITE);
        draw_filled_circle_mut(&mut image, (50, 50), 10, RED);

        assert!(locator().locate(&image).is_some());
        let strict = BlobLocator::new(VisionConfig {
            min_radius: 15.0,
            ..VisionConfig::default()
        })
        .unwrap();
        assert!(strict.locate(&image).is_none());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        for kernel_size in [0, 4, 513, u32::MAX - 1, u32::MAX] {
            let cfg = VisionConfig { kernel_size, ..VisionConfig::default() };
            assert!(matches!(BlobLocator::new(cfg), Err(VisionError::InvalidKernelSize(_))));
        }
        let cfg = VisionConfig { kernel_size: MAX_KERNEL_SIZE, ..VisionConfig::default() };
        assert!(BlobLocator::new(cfg).is_ok());

        let cfg = VisionConfig { min_radius: -1.0, ..VisionConfig::default() };
        assert!(matches!(BlobLocator::new(cfg), Err(VisionError::InvalidMinRadius(_))));

        let cfg = VisionConfig {
            color: HsvRange { lower: [10, 100, 100], upper: [0, 255, 255] },
            ..VisionConfig::default()
        };
        assert!(matches!(BlobLocator::new(cfg), Err(VisionError::EmptyColorRange(_))));
    }
}
