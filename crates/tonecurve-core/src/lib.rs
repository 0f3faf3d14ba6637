//! Tonecurve Core — interactive tone-curve editing.
//!
//! Fits smooth curves through per-channel control points, rasterizes them into
//! 256-entry lookup tables, and turns single-pointer drags into point edits
//! that keep every curve well formed. Hosting concerns (windows, drawing,
//! persistence) stay with the caller.

pub mod config;
pub mod curve;
pub mod editor;
pub mod error;
pub mod events;
pub mod kernel;
pub mod mapper;
pub mod snapshot;
pub mod tables;
pub mod touch;

// Re-exports for convenience.
pub use config::EditorConfig;
pub use curve::{Channel, ChannelCurve, CurvePoint, CurveSet, LookupTable, Outline};
pub use editor::CurveEditor;
pub use error::CurveError;
pub use events::{CurveEvent, CurveListener};
pub use mapper::CoordinateMapper;
pub use snapshot::{ChannelPoints, CurveSnapshot, SnapshotCell};
pub use tables::LookupTables;
pub use touch::{GesturePhase, PointerEvent, TouchController};
