//! Conversion between value space and render space.
//!
//! Value space is `[0, 255] × [0, 255]`. Render space is the host's drawing
//! area (`width × height`), with `radius` reserved as margin on every side so
//! control points stay fully visible at the boundaries:
//!
//! ```text
//! scale_x  = (width  − 2·radius) / 255
//! scale_y  = (height − 2·radius) / 255
//! render_x = radius + value_x · scale_x
//! value_x  = clamp(round((render_x − radius) / scale_x), 0, 255)
//! ```
//!
//! The y axis is not flipped here. Value y = 0 sits at the top of the render
//! area and means full output brightness; the inversion happens only when the
//! lookup table is written.

use glam::Vec2;

use crate::curve::point::CurvePoint;
use crate::kernel::clamp_value;

/// Stateless value/render conversion for one render size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    width: f32,
    height: f32,
    radius: f32,
    scale_x: f32,
    scale_y: f32,
}

impl CoordinateMapper {
    /// Build a mapper for a render area.
    ///
    /// Returns `None` when the drawable band is empty, i.e. when either
    /// dimension is not larger than `2 × radius`.
    pub fn new(width: f32, height: f32, radius: f32) -> Option<Self> {
        if !(width.is_finite() && height.is_finite() && radius.is_finite()) || radius < 0.0 {
            return None;
        }
        let scale_x = (width - 2.0 * radius) / 255.0;
        let scale_y = (height - 2.0 * radius) / 255.0;
        if scale_x <= 0.0 || scale_y <= 0.0 {
            return None;
        }
        Some(Self {
            width,
            height,
            radius,
            scale_x,
            scale_y,
        })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn scale_x(&self) -> f32 {
        self.scale_x
    }

    pub fn scale_y(&self) -> f32 {
        self.scale_y
    }

    #[inline]
    pub fn render_x(&self, value_x: f32) -> f32 {
        self.radius + value_x * self.scale_x
    }

    #[inline]
    pub fn render_y(&self, value_y: f32) -> f32 {
        self.radius + value_y * self.scale_y
    }

    /// Render-space center of a control point.
    pub fn to_render(&self, point: CurvePoint) -> Vec2 {
        Vec2::new(
            self.render_x(f32::from(point.x)),
            self.render_y(f32::from(point.y)),
        )
    }

    /// Nearest value-space x for a render x, clamped to `[0, 255]`.
    pub fn value_x(&self, render_x: f32) -> u8 {
        clamp_value(((render_x - self.radius) / self.scale_x).round() as i64)
    }

    /// Nearest value-space y for a render y, clamped to `[0, 255]`.
    pub fn value_y(&self, render_y: f32) -> u8 {
        clamp_value(((render_y - self.radius) / self.scale_y).round() as i64)
    }

    pub fn to_value(&self, position: Vec2) -> CurvePoint {
        CurvePoint {
            x: self.value_x(position.x),
            y: self.value_y(position.y),
        }
    }

    /// Line segments of a `divisions × divisions` guide grid covering the
    /// value band.
    pub fn grid_lines(&self, divisions: u32) -> Vec<[Vec2; 2]> {
        let divisions = divisions.max(1);
        let left = self.radius;
        let top = self.radius;
        let right = self.width - self.radius;
        let bottom = self.height - self.radius;
        let dx = (right - left) / divisions as f32;
        let dy = (bottom - top) / divisions as f32;

        let mut lines = Vec::with_capacity(2 * (divisions as usize + 1));
        for i in 0..=divisions {
            let y = top + dy * i as f32;
            lines.push([Vec2::new(left, y), Vec2::new(right, y)]);
        }
        for i in 0..=divisions {
            let x = left + dx * i as f32;
            lines.push([Vec2::new(x, top), Vec2::new(x, bottom)]);
        }
        lines
    }

    /// The identity diagonal, bottom-left to top-right.
    pub fn diagonal(&self) -> [Vec2; 2] {
        [
            Vec2::new(self.radius, self.height - self.radius),
            Vec2::new(self.width - self.radius, self.radius),
        ]
    }
}
