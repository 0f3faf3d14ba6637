//! Curve model — control points, per-channel curves, and the four-channel set.

pub mod channel;
pub mod point;
pub mod set;

pub use channel::{ChannelCurve, LookupTable, Outline};
pub use point::CurvePoint;
pub use set::{Channel, CurveSet};
