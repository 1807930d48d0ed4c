//! Minimal enclosing circle (Welzl's algorithm, iterative form).

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

const SHUFFLE_SEED: u64 = 0x5eed;
const REL_TOLERANCE: f64 = 1e-9;

/// A circle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// Centre x.
    pub x: f64,
    /// Centre y.
    pub y: f64,
    /// Radius.
    pub radius: f64,
}

impl Circle {
    fn from_point((x, y): (f64, f64)) -> Self {
        Circle { x, y, radius: 0.0 }
    }

    fn from_pair(a: (f64, f64), b: (f64, f64)) -> Self {
        let x = (a.0 + b.0) / 2.0;
        let y = (a.1 + b.1) / 2.0;
        Circle {
            x,
            y,
            radius: (a.0 - x).hypot(a.1 - y),
        }
    }

    fn from_triple(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> Self {
        let (bx, by) = (b.0 - a.0, b.1 - a.1);
        let (cx, cy) = (c.0 - a.0, c.1 - a.1);
        let d = 2.0 * (bx * cy - by * cx);

        if d.abs() < f64::EPSILON {
            // Collinear: the widest pair spans the others
            return [Self::from_pair(a, b), Self::from_pair(a, c), Self::from_pair(b, c)]
                .into_iter()
                .fold(Self::from_point(a), |best, cand| if cand.radius > best.radius { cand } else { best });
        }

        let b2 = bx * bx + by * by;
        let c2 = cx * cx + cy * cy;
        let ux = (cy * b2 - by * c2) / d;
        let uy = (bx * c2 - cx * b2) / d;
        Circle {
            x: a.0 + ux,
            y: a.1 + uy,
            radius: ux.hypot(uy),
        }
    }

    /// Returns `true` if `p` lies inside or on the circle.
    pub fn contains(&self, (px, py): (f64, f64)) -> bool {
        let d = (px - self.x).hypot(py - self.y);
        d <= self.radius + REL_TOLERANCE * self.radius.max(1.0)
    }
}

/// Smallest circle containing every point, or `None` for an empty set.
///
/// The points are shuffled with a fixed seed so results are reproducible
/// while keeping the expected linear running time.
pub fn min_enclosing_circle(points: &[(f64, f64)]) -> Option<Circle> {
    let mut pts = points.to_vec();
    pts.shuffle(&mut StdRng::seed_from_u64(SHUFFLE_SEED));

    let first = *pts.first()?;
    let mut circle = Circle::from_point(first);

    for i in 1..pts.len() {
        if circle.contains(pts[i]) {
            continue;
        }
        circle = Circle::from_point(pts[i]);
        for j in 0..i {
            if circle.contains(pts[j]) {
                continue;
            }
            circle = Circle::from_pair(pts[i], pts[j]);
            for k in 0..j {
                if !circle.contains(pts[k]) {
                    circle = Circle::from_triple(pts[i], pts[j], pts[k]);
                }
            }
        }
    }

    Some(circle)
}
