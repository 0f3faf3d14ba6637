//! Piecewise cubic fitting for tone curves.
//!
//! Each segment between consecutive control points P1 and P2 is a cubic
//! `y = a·x³ + b·x² + c·x + d` that passes through both endpoints. The
//! tangent at each endpoint is estimated from the neighboring points:
//!
//! ```text
//! s1 = slope(P1, P2)  if P1 is the first point, else slope(P0, P2)
//! s2 = slope(P1, P2)  if P2 is the last point,  else slope(P1, P3)
//!
//! a = 2·(y2 − y1 − [(x2+x1)·(s2−s1)/2 + s1·(x2−x1) − x1·(s2−s1)]) / (x1−x2)³
//! b = (s2−s1) / (2·(x2−x1)) − 3·a·(x1+x2)/2
//! c = s1 − x1·(s2−s1)/(x2−x1) + 3·a·x1·x2
//! d = y1 − a·x1³ − b·x1² − c·x1
//! ```
//!
//! A segment only depends on its own endpoints and one neighbor per side, so
//! refitting during a drag is O(1) per segment.
//!
//! Coefficients are kept in `f64`: render-space x reaches the thousands and the
//! cubic terms cancel heavily.

/// Coefficients of one fitted cubic segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl CubicSegment {
    /// Fit the segment between `points[index]` and `points[index + 1]`.
    ///
    /// Points are `[x, y]` pairs with strictly increasing x, all expressed in
    /// the same unit system. `index + 1` must be a valid index.
    pub fn fit(points: &[[f64; 2]], index: usize) -> Self {
        let p1 = points[index];
        let p2 = points[index + 1];

        let s1 = if index == 0 {
            chord_slope(p1, p2)
        } else {
            chord_slope(points[index - 1], p2)
        };
        let s2 = if index + 2 >= points.len() {
            chord_slope(p1, p2)
        } else {
            chord_slope(p1, points[index + 2])
        };

        Self::from_endpoints(p1, p2, s1, s2)
    }

    /// Solve the cubic through `p1` and `p2` with endpoint slopes `s1`, `s2`.
    pub fn from_endpoints(p1: [f64; 2], p2: [f64; 2], s1: f64, s2: f64) -> Self {
        let [x1, y1] = p1;
        let [x2, y2] = p2;
        let ds = s2 - s1;

        let a = 2.0 * (y2 - y1 - ((x2 + x1) * ds / 2.0 + s1 * (x2 - x1) - x1 * ds))
            / (x1 - x2).powi(3);
        let b = ds / (2.0 * (x2 - x1)) - 3.0 * a * (x1 + x2) / 2.0;
        let c = s1 - x1 * ds / (x2 - x1) + 3.0 * a * x1 * x2;
        let d = y1 - a * x1.powi(3) - b * x1.powi(2) - c * x1;

        Self { a, b, c, d }
    }

    /// Evaluate `a·x³ + b·x² + c·x + d` (Horner form).
    #[inline]
    pub fn evaluate(&self, x: f64) -> f64 {
        ((self.a * x + self.b) * x + self.c) * x + self.d
    }
}

/// Fit every segment of an ordered point list. Returns one segment per
/// adjacent pair (empty for fewer than 2 points).
pub fn fit_segments(points: &[[f64; 2]]) -> Vec<CubicSegment> {
    (0..points.len().saturating_sub(1))
        .map(|i| CubicSegment::fit(points, i))
        .collect()
}

fn chord_slope(p: [f64; 2], q: [f64; 2]) -> f64 {
    (q[1] - p[1]) / (q[0] - p[0])
}

/// Clamp an integer into the 8-bit value domain.
#[inline]
pub fn clamp_value(value: i64) -> u8 {
    value.clamp(0, 255) as u8
}
