//! Per-channel curve model: control points, lookup table, and outline.
//!
//! The table and outline are always rebuilt from scratch when the points
//! change. Both use the same segment fitter; the table fits in value space,
//! the outline in render space.

use glam::Vec2;

use crate::curve::point::{CurvePoint, IDENTITY_POINTS, validate_points};
use crate::error::CurveError;
use crate::kernel::{CubicSegment, clamp_value, fit_segments};
use crate::mapper::CoordinateMapper;

/// 256-entry lookup table. Index is the input value, entry is the output value.
pub type LookupTable = [u8; 256];

/// Identity lookup table (`table[i] = i`).
pub const IDENTITY_TABLE: LookupTable = {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = i as u8;
        i += 1;
    }
    table
};

/// Render-space polyline approximating a fitted curve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    vertices: Vec<Vec2>,
}

impl Outline {
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Consecutive vertex pairs, ready for line drawing.
    pub fn segments(&self) -> impl Iterator<Item = [Vec2; 2]> + '_ {
        self.vertices.windows(2).map(|w| [w[0], w[1]])
    }
}

/// One channel's editable curve.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelCurve {
    points: Vec<CurvePoint>,
    table: LookupTable,
    outline: Outline,
}

impl Default for ChannelCurve {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelCurve {
    /// Identity curve with its table populated. The outline stays empty until
    /// a render size is known.
    pub fn new() -> Self {
        Self {
            points: IDENTITY_POINTS.to_vec(),
            table: IDENTITY_TABLE,
            outline: Outline::default(),
        }
    }

    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    pub fn table(&self) -> &LookupTable {
        &self.table
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    /// `true` while the points equal the two-point identity curve.
    pub fn is_identity(&self) -> bool {
        self.points == IDENTITY_POINTS
    }

    /// Replace the points with the identity curve and rebuild.
    pub fn reset(&mut self, mapper: Option<&CoordinateMapper>, step: f32) {
        self.points.clear();
        self.points.extend_from_slice(&IDENTITY_POINTS);
        self.regenerate(mapper, step);
    }

    /// Bulk-replace the points and rebuild. Invalid lists are rejected and
    /// leave the curve unchanged.
    pub fn set_points(
        &mut self,
        points: Vec<CurvePoint>,
        mapper: Option<&CoordinateMapper>,
        step: f32,
    ) -> Result<(), CurveError> {
        validate_points(&points)?;
        self.points = points;
        self.regenerate(mapper, step);
        Ok(())
    }

    /// Rebuild the table, and the outline when a render size is known.
    pub fn regenerate(&mut self, mapper: Option<&CoordinateMapper>, step: f32) {
        self.regenerate_lookup_table();
        match mapper {
            Some(mapper) => self.regenerate_outline(mapper, step),
            None => self.outline = Outline::default(),
        }
    }

    pub fn regenerate_lookup_table(&mut self) {
        self.table = build_lookup_table(&self.points);
    }

    pub fn regenerate_outline(&mut self, mapper: &CoordinateMapper, step: f32) {
        self.outline = build_outline(&self.points, mapper, step);
    }

    /// Point list for in-place edits by the touch controller. Callers must
    /// keep x strictly increasing and the endpoints pinned.
    pub(crate) fn points_mut(&mut self) -> &mut Vec<CurvePoint> {
        &mut self.points
    }
}

/// Rasterize a point list into a lookup table.
///
/// Two points interpolate linearly. Otherwise every segment is fitted in value
/// space and sampled at each integer x in `[x1, x2)`; the fitted y is clamped
/// to `[0, 255]` and inverted so that a larger entry means a brighter output.
/// The last entry comes straight from the last point.
pub fn build_lookup_table(points: &[CurvePoint]) -> LookupTable {
    let mut table = [0u8; 256];

    match points {
        [] | [_] => return IDENTITY_TABLE,
        [first, last] => {
            let y0 = f64::from(first.y);
            let y1 = f64::from(last.y);
            for (i, entry) in table.iter_mut().enumerate() {
                let step = (i as f64 * (y0 - y1) / 255.0).round() as i64;
                *entry = clamp_value(255 - i64::from(first.y) + step);
            }
        }
        _ => {
            let coords: Vec<[f64; 2]> = points.iter().map(|p| p.as_f64()).collect();
            for (seg, pair) in fit_segments(&coords).iter().zip(points.windows(2)) {
                for x in pair[0].x..pair[1].x {
                    let y = clamp_value(seg.evaluate(f64::from(x)).round() as i64);
                    table[usize::from(x)] = 255 - y;
                }
            }
            if let Some(last) = points.last() {
                table[255] = 255 - last.y;
            }
        }
    }

    table
}

/// Sample the fitted curve in render space.
///
/// Two points produce a single straight segment. Otherwise each segment is
/// sampled every `step` units along x and y is clamped to the render image of
/// the value band, `[radius, height − radius]`. A step that is not a
/// positive finite number yields an empty outline.
pub fn build_outline(points: &[CurvePoint], mapper: &CoordinateMapper, step: f32) -> Outline {
    if !(step.is_finite() && step > 0.0) {
        tracing::warn!("outline step {step} is not positive, skipping outline");
        return Outline::default();
    }
    if points.len() < 3 {
        return Outline {
            vertices: points.iter().map(|&p| mapper.to_render(p)).collect(),
        };
    }

    let top = f64::from(mapper.radius());
    let bottom = f64::from(mapper.height() - mapper.radius());
    let step = f64::from(step);
    let coords: Vec<[f64; 2]> = points
        .iter()
        .map(|&p| {
            let r = mapper.to_render(p);
            [f64::from(r.x), f64::from(r.y)]
        })
        .collect();

    let sample = |seg: &CubicSegment, x: f64| {
        let y = seg.evaluate(x).clamp(top, bottom);
        Vec2::new(x as f32, y as f32)
    };

    let segments = fit_segments(&coords);
    let mut vertices = Vec::new();
    for (seg, pair) in segments.iter().zip(coords.windows(2)) {
        let (x1, x2) = (pair[0][0], pair[1][0]);
        let count = ((x2 - x1) / step).ceil() as usize;
        vertices.extend((0..count).map(|k| sample(seg, x1 + k as f64 * step)));
    }
    if let (Some(seg), Some(end)) = (segments.last(), coords.last()) {
        vertices.push(sample(seg, end[0]));
    }

    Outline { vertices }
}
