/// A goal location in image pixel coordinates.
///
/// Set once per run from the detected blob centre and never changed afterwards.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GoalPoint {
    /// The x-coordinate (column) in pixels.
    pub x: i32,
    /// The y-coordinate (row) in pixels.
    pub y: i32,
}

impl GoalPoint {
    /// Creates a new `GoalPoint`.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Creates a `GoalPoint` from a sub-pixel location, truncating towards zero.
    #[must_use]
    pub fn from_subpixel(x: f64, y: f64) -> Self {
        Self { x: x as i32, y: y as i32 }
    }

    /// The goal as floating point `(x, y)`.
    pub fn as_f64(&self) -> (f64, f64) {
        (f64::from(self.x), f64::from(self.y))
    }
}

impl std::fmt::Display for GoalPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
