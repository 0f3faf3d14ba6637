//! Host-facing entry point bundling the curve set and the touch controller.

use crate::config::EditorConfig;
use crate::curve::set::{Channel, CurveSet};
use crate::events::CurveListener;
use crate::touch::{GesturePhase, PointerEvent, TouchController};

/// A tone-curve editor instance.
///
/// Feed it render sizes and pointer events; read points, tables and outlines
/// back from [`CurveEditor::curves`] or through a listener.
#[derive(Debug, Default)]
pub struct CurveEditor {
    curves: CurveSet,
    touch: TouchController,
}

impl CurveEditor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            curves: CurveSet::new(config),
            touch: TouchController::new(),
        }
    }

    pub fn curves(&self) -> &CurveSet {
        &self.curves
    }

    /// Direct access for resets, restores and snapshot wiring.
    pub fn curves_mut(&mut self) -> &mut CurveSet {
        &mut self.curves
    }

    pub fn set_listener(&mut self, listener: impl CurveListener + 'static) {
        self.curves.set_listener(listener);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.curves.resize(width, height);
    }

    /// Switch channels. A gesture in progress is abandoned without a commit.
    pub fn set_active_channel(&mut self, channel: Channel) {
        self.touch = TouchController::new();
        self.curves.set_active_channel(channel);
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        self.touch.handle(&mut self.curves, event);
    }

    /// Delete the touched point. Returns `false` when it is an endpoint or
    /// nothing is touched.
    pub fn delete_touched_point(&mut self) -> bool {
        self.touch.delete_touched_point(&mut self.curves)
    }

    pub fn gesture_phase(&self) -> GesturePhase {
        self.touch.phase()
    }
}
