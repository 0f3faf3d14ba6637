//! Pointer gestures on the active channel's control points.
//!
//! ```text
//!            down on a point            move ≥ tolerance
//!   Idle ──────────────────→ PointSelected ──────────────→ Dragging ─┐
//!     │      down elsewhere                                  ↑  move │
//!     └─────────────────────→ PointInserted ─────────────────┴───────┘
//!   up / cancel from any state → Idle (commit when a point is held)
//! ```
//!
//! Hit testing only looks at x: points always sit on the curve band, so the
//! pointer's x identifies the point. While dragging, interior points stay at
//! least `2 × radius` (render units) away from both neighbors and the first
//! and last points never leave x = 0 and x = 255. Nothing here fails; gestures
//! that cannot apply are dropped.

use glam::Vec2;

use crate::curve::point::CurvePoint;
use crate::curve::set::CurveSet;
use crate::mapper::CoordinateMapper;

/// Single-pointer input in render coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up { x: f32, y: f32 },
    Cancel { x: f32, y: f32 },
}

/// Where the current gesture stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    /// Pointer went down on an existing point.
    PointSelected { index: usize },
    /// Pointer went down between points and a new one was inserted.
    PointInserted { index: usize },
    /// The held point has moved at least once.
    Dragging { index: usize },
}

impl GesturePhase {
    /// Index of the point the gesture holds, if any.
    pub fn held_index(self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::PointSelected { index }
            | Self::PointInserted { index }
            | Self::Dragging { index } => Some(index),
        }
    }
}

/// Turns pointer events into edits of the active channel.
///
/// Only the last pointer position survives between events; the point list is
/// borrowed from the [`CurveSet`] for each event and never held.
#[derive(Debug, Clone, Default)]
pub struct TouchController {
    phase: GesturePhase,
    last_pointer: Vec2,
}

impl TouchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Feed one pointer event. Down and move events with a non-finite
    /// coordinate are dropped; up and cancel never read their coordinates.
    pub fn handle(&mut self, curves: &mut CurveSet, event: PointerEvent) {
        match event {
            PointerEvent::Down { x, y } | PointerEvent::Move { x, y }
                if !(x.is_finite() && y.is_finite()) =>
            {
                tracing::trace!("dropped non-finite pointer event {event:?}");
                return;
            }
            _ => {}
        }
        match event {
            PointerEvent::Down { x, y } => self.pointer_down(curves, Vec2::new(x, y)),
            PointerEvent::Move { x, y } => self.pointer_move(curves, Vec2::new(x, y)),
            PointerEvent::Up { .. } | PointerEvent::Cancel { .. } => self.pointer_up(curves),
        }
    }

    /// Remove the touched point if it is an interior one.
    ///
    /// Returns `false` and changes nothing for the first or last point, or
    /// when no point is touched.
    pub fn delete_touched_point(&mut self, curves: &mut CurveSet) -> bool {
        let Some(index) = curves.touched_index() else {
            return false;
        };
        if !curves.can_delete_touched() {
            return false;
        }
        curves.active_points_mut().remove(index);
        self.phase = GesturePhase::Idle;
        curves.set_touched_index(None);
        curves.commit_channel(curves.active_channel());
        tracing::debug!(
            "deleted point {index} from {} curve",
            curves.active_channel().label()
        );
        true
    }

    fn pointer_down(&mut self, curves: &mut CurveSet, pos: Vec2) {
        let Some(mapper) = curves.mapper().copied() else {
            tracing::debug!("pointer down ignored: no render size");
            return;
        };
        let spacing = curves.config().insert_spacing;

        self.phase = match hit_test(curves.active_points(), &mapper, pos.x) {
            Some(index) => GesturePhase::PointSelected { index },
            None => match insert_point(curves.active_points_mut(), &mapper, pos, spacing) {
                Some(index) => {
                    tracing::debug!(
                        "inserted point {index} into {} curve",
                        curves.active_channel().label()
                    );
                    GesturePhase::PointInserted { index }
                }
                None => GesturePhase::Idle,
            },
        };

        let held = self.phase.held_index();
        curves.set_touched_index(held);
        if let Some(index) = held {
            curves.active_points_mut()[index].y = mapper.value_y(pos.y);
            self.last_pointer = pos;
            curves.refresh_active(false);
        }
    }

    fn pointer_move(&mut self, curves: &mut CurveSet, pos: Vec2) {
        let Some(index) = self.phase.held_index() else {
            return;
        };
        if curves.touched_index() != Some(index) {
            return;
        }
        let Some(mapper) = curves.mapper().copied() else {
            return;
        };

        let delta = pos - self.last_pointer;
        if delta.length_squared() < curves.config().move_tolerance {
            return;
        }

        drag_point(curves.active_points_mut(), index, &mapper, delta);
        self.last_pointer = pos;
        self.phase = GesturePhase::Dragging { index };
        tracing::trace!("dragged point {index} to {:?}", curves.active_points()[index]);
        curves.refresh_active(true);
    }

    fn pointer_up(&mut self, curves: &mut CurveSet) {
        let phase = std::mem::take(&mut self.phase);
        if phase.held_index().is_none() || curves.touched_index().is_none() {
            return;
        }
        curves.notify_channel_changed();
        curves.commit_channel(curves.active_channel());
        curves.set_touched_index(curves.touched_index());
    }
}

/// Index of the first point whose circle covers `x`, or `None`.
///
/// A point's circle spans `2 × radius` starting at `value_x × scale_x`, i.e.
/// one radius on each side of its render center.
pub fn hit_test(points: &[CurvePoint], mapper: &CoordinateMapper, x: f32) -> Option<usize> {
    let diameter = 2.0 * mapper.radius();
    points.iter().position(|p| {
        let left = f32::from(p.x) * mapper.scale_x();
        x >= left && x <= left + diameter
    })
}

/// Insert a point at `pos` if there is room, returning its index.
///
/// The pointer's y is clamped into the value band. The pointer's x must lie
/// in `[2·radius, width − 2·radius]` and inside the gap between two adjacent
/// points, shrunk on both sides by `2 × spacing × radius`.
pub fn insert_point(
    points: &mut Vec<CurvePoint>,
    mapper: &CoordinateMapper,
    pos: Vec2,
    spacing: f32,
) -> Option<usize> {
    let radius = mapper.radius();
    if pos.x < 2.0 * radius || pos.x > mapper.width() - 2.0 * radius {
        return None;
    }
    let y = pos.y.clamp(radius, mapper.height() - radius);
    let render_x = |p: &CurvePoint| mapper.render_x(f32::from(p.x));

    let gap = 2.0 * spacing * radius;
    let i = points
        .windows(2)
        .position(|w| pos.x >= render_x(&w[0]) && pos.x < render_x(&w[1]))?;
    let (prev, next) = (points[i], points[i + 1]);
    if pos.x < render_x(&prev) + gap || pos.x > render_x(&next) - gap {
        return None;
    }

    let candidate = CurvePoint {
        x: mapper.value_x(pos.x),
        y: mapper.value_y(y),
    };
    if candidate.x <= prev.x || candidate.x >= next.x {
        return None;
    }
    points.insert(i + 1, candidate);
    Some(i + 1)
}

/// Move `points[index]` by a render-space `delta`.
///
/// y moves freely within the value band. The first and last points keep
/// their x. Interior points are clamped to `[prev + 2r, next − 2r]`; when that
/// interval has collapsed the point snaps to the midpoint of its neighbors.
/// The resulting x is always strictly between the neighbors' x values.
pub fn drag_point(points: &mut [CurvePoint], index: usize, mapper: &CoordinateMapper, delta: Vec2) {
    let Some(&point) = points.get(index) else {
        return;
    };
    let last = points.len() - 1;
    let y = mapper.render_y(f32::from(point.y)) + delta.y;

    let x = if index == 0 || index == last {
        point.x
    } else {
        let (prev, next) = (points[index - 1], points[index + 1]);
        let prev_x = mapper.render_x(f32::from(prev.x));
        let next_x = mapper.render_x(f32::from(next.x));
        let margin = 2.0 * mapper.radius();
        let (left, right) = (prev_x + margin, next_x - margin);

        let mut x = mapper.render_x(f32::from(point.x)) + delta.x;
        if x < left {
            x = left;
        } else if x > right {
            x = right;
        }
        if x <= prev_x || x >= next_x || left >= right {
            x = (prev_x + next_x) / 2.0;
        }
        mapper.value_x(x).clamp(prev.x + 1, next.x - 1)
    };

    points[index] = CurvePoint {
        x,
        y: mapper.value_y(y),
    };
}
