//! 8-bit HSV conversion and colour range masks.
//!
//! Values follow the common 8-bit convention: hue in `0..180` (degrees / 2),
//! saturation and value in `0..=255`.

use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::map::map_colors;

use crate::error::VisionError;

/// Exclusive upper bound of the 8-bit hue channel.
pub const HUE_MAX: u8 = 180;

/// An 8-bit hue/saturation/value triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hsv {
    /// Hue, `0..180`.
    pub h: u8,
    /// Saturation, `0..=255`.
    pub s: u8,
    /// Value, `0..=255`.
    pub v: u8,
}

impl From<Rgb<u8>> for Hsv {
    fn from(px: Rgb<u8>) -> Self {
        let [r, g, b] = px.0;
        let (rf, gf, bf) = (f32::from(r), f32::from(g), f32::from(b));
        let max = rf.max(gf).max(bf);
        let min = rf.min(gf).min(bf);
        let diff = max - min;

        let s = if max > 0.0 { 255.0 * diff / max } else { 0.0 };

        let mut h = if diff == 0.0 {
            0.0
        } else if max == rf {
            60.0 * (gf - bf) / diff
        } else if max == gf {
            120.0 + 60.0 * (bf - rf) / diff
        } else {
            240.0 + 60.0 * (rf - gf) / diff
        };
        if h < 0.0 {
            h += 360.0;
        }

        // 360 degrees halves to 180 which wraps back to 0
        let h = (h / 2.0).round() as u16 % u16::from(HUE_MAX);

        Hsv {
            h: h as u8,
            s: s.round() as u8,
            v: max as u8,
        }
    }
}

/// An inclusive HSV box, `lower <= pixel <= upper` on every channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HsvRange {
    /// Inclusive lower bound `[h, s, v]`.
    pub lower: [u8; 3],
    /// Inclusive upper bound `[h, s, v]`.
    pub upper: [u8; 3],
}

impl Default for HsvRange {
    /// Saturated red near hue 0.
    fn default() -> Self {
        Self {
            lower: [0, 100, 100],
            upper: [10, 255, 255],
        }
    }
}

impl HsvRange {
    /// Creates a range after checking it can match at least one colour.
    ///
    /// # Errors
    ///
    /// Returns `Err(VisionError::EmptyColorRange)` if any lower bound exceeds
    /// its upper bound or either hue bound is not a valid hue.
    pub fn new(lower: [u8; 3], upper: [u8; 3]) -> Result<Self, VisionError> {
        let range = Self { lower, upper };
        range.validate()?;
        Ok(range)
    }

    /// See [`HsvRange::new`].
    pub fn validate(&self) -> Result<(), VisionError> {
        if self.lower.iter().zip(self.upper.iter()).any(|(lo, hi)| lo > hi) {
            return Err(VisionError::EmptyColorRange("lower bound exceeds upper bound"));
        }
        if self.lower[0] >= HUE_MAX || self.upper[0] >= HUE_MAX {
            return Err(VisionError::EmptyColorRange("hue must be below 180"));
        }
        Ok(())
    }

    /// Returns `true` if `hsv` lies inside the range.
    pub fn contains(&self, hsv: Hsv) -> bool {
        let px = [hsv.h, hsv.s, hsv.v];
        px.iter()
            .zip(self.lower.iter().zip(self.upper.iter()))
            .all(|(v, (lo, hi))| lo <= v && v <= hi)
    }
}

/// Binary mask of the pixels of `image` whose HSV value lies in `range`.
///
/// Matching pixels are 255, everything else 0.
pub fn in_range(image: &RgbImage, range: &HsvRange) -> GrayImage {
    map_colors(image, |px| Luma([if range.contains(Hsv::from(px)) { 255 } else { 0 }]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hsv(r: u8, g: u8, b: u8) -> Hsv {
        Hsv::from(Rgb([r, g, b]))
    }

    #[test]
    fn test_primary_colours() {
        assert_eq!(hsv(255, 0, 0), Hsv { h: 0, s: 255, v: 255 });
        assert_eq!(hsv(0, 255, 0), Hsv { h: 60, s: 255, v: 255 });
        assert_eq!(hsv(0, 0, 255), Hsv { h: 120, s: 255, v: 255 });
    }

    #[test]
    fn test_greys_have_no_saturation() {
        assert_eq!(hsv(255, 255, 255), Hsv { h: 0, s: 0, v: 255 });
        assert_eq!(hsv(0, 0, 0), Hsv { h: 0, s: 0, v: 0 });
        assert_eq!(hsv(128, 128, 128), Hsv { h: 0, s: 0, v: 128 });
    }

    #[test]
    fn test_hue_wraps_below_red() {
        // Magenta-leaning red sits just below 360 degrees and wraps to 0.
        assert_eq!(hsv(255, 0, 1).h, 0);
        assert_eq!(hsv(255, 0, 128).h, 165);
    }

    #[test]
    fn test_default_range_matches_red_only() {
        let range = HsvRange::default();
        assert!(range.contains(hsv(255, 0, 0)));
        assert!(range.contains(hsv(200, 30, 20)));
        assert!(!range.contains(hsv(255, 255, 255)));
        assert!(!range.contains(hsv(0, 0, 255)));
        assert!(!range.contains(hsv(0, 255, 0)));
        assert!(!range.contains(hsv(80, 0, 0))); // too dark
    }

    #[test]
    fn test_empty_range_is_rejected() {
        let result = HsvRange::new([20, 100, 100], [10, 255, 255]);
        assert!(matches!(result, Err(VisionError::EmptyColorRange(_))));
        let result = HsvRange::new([0, 200, 100], [10, 100, 255]);
        assert!(matches!(result, Err(VisionError::EmptyColorRange(_))));
        let result = HsvRange::new([180, 0, 0], [200, 255, 255]);
        assert!(matches!(result, Err(VisionError::EmptyColorRange(_))));
    }

    #[test]
    fn test_upper_hue_beyond_channel_is_rejected() {
        let result = HsvRange::new([170, 100, 100], [180, 255, 255]);
        assert!(matches!(result, Err(VisionError::EmptyColorRange(_))));
        let result = HsvRange::new([0, 100, 100], [255, 255, 255]);
        assert!(matches!(result, Err(VisionError::EmptyColorRange(_))));
        assert!(HsvRange::new([170, 100, 100], [179, 255, 255]).is_ok());
    }

    #[test]
    fn test_in_range_mask() {
        let mut image = RgbImage::from_pixel(4, 3, Rgb([255, 255, 255]));
        image.put_pixel(1, 2, Rgb([255, 0, 0]));
        let mask = in_range(&image, &HsvRange::default());
        assert_eq!(mask.dimensions(), (4, 3));
        assert_eq!(mask.get_pixel(1, 2).0[0], 255);
        assert_eq!(mask.pixels().filter(|p| p.0[0] == 255).count(), 1);
    }
}
