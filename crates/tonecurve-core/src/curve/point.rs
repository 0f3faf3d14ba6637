//! Control points and point-list validation.

use serde::{Deserialize, Serialize};

use crate::error::CurveError;
use crate::kernel::clamp_value;

/// A control point in value space.
///
/// `x` is the input value. `y` is the output value measured from the top, so
/// `y = 0` is full brightness and `y = 255` is black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x: u8,
    pub y: u8,
}

impl CurvePoint {
    /// Create a point, clamping both coordinates into `[0, 255]`.
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x: clamp_value(i64::from(x)),
            y: clamp_value(i64::from(y)),
        }
    }

    pub(crate) fn as_f64(self) -> [f64; 2] {
        [f64::from(self.x), f64::from(self.y)]
    }
}

/// The pass-through curve every channel starts from.
pub const IDENTITY_POINTS: [CurvePoint; 2] = [
    CurvePoint { x: 0, y: 255 },
    CurvePoint { x: 255, y: 0 },
];

/// Check that a point list can drive the curve fitter: at least two points,
/// anchored at x=0 and x=255, x strictly increasing.
pub fn validate_points(points: &[CurvePoint]) -> Result<(), CurveError> {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Err(CurveError::TooFewPoints(points.len()));
    };
    if points.len() < 2 {
        return Err(CurveError::TooFewPoints(points.len()));
    }
    if first.x != 0 || last.x != 255 {
        return Err(CurveError::UnanchoredEndpoints {
            first: first.x,
            last: last.x,
        });
    }
    if let Some(index) = points.windows(2).position(|w| w[1].x <= w[0].x) {
        return Err(CurveError::NotIncreasing { index: index + 1 });
    }
    Ok(())
}
