//! Errors raised where external data enters the editor.
//!
//! Pointer handling never fails; only restored point lists and loaded
//! configuration are checked.

/// Errors produced when importing point lists or loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum CurveError {
    #[error("curve needs at least 2 control points, got {0}")]
    TooFewPoints(usize),

    #[error("curve must start at x=0 and end at x=255 (got {first} and {last})")]
    UnanchoredEndpoints { first: u8, last: u8 },

    #[error("control point {index} does not increase in x")]
    NotIncreasing { index: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
