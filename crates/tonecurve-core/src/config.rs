//! Editor configuration.

use serde::{Deserialize, Serialize};

use crate::error::CurveError;

/// Default control-point radius in render units.
const DEFAULT_POINT_RADIUS: f32 = 13.0;
/// Default squared pointer displacement before a drag applies.
const DEFAULT_MOVE_TOLERANCE: f32 = 5.0;
/// Default x step used when sampling the outline.
const DEFAULT_OUTLINE_STEP: f32 = 0.5;
/// Default insertion spacing factor.
const DEFAULT_INSERT_SPACING: f32 = 1.1;

/// Tunables shared by the curve set and the touch controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Visual radius of a control point. Also reserved as margin on every
    /// side of the render area.
    #[serde(default = "EditorConfig::default_point_radius")]
    pub point_radius: f32,
    /// Squared pointer displacement a drag must reach before it moves a point.
    #[serde(default = "EditorConfig::default_move_tolerance")]
    pub move_tolerance: f32,
    /// Render-unit step between outline samples.
    #[serde(default = "EditorConfig::default_outline_step")]
    pub outline_step: f32,
    /// New points must sit at least `2 × insert_spacing × point_radius`
    /// away from both neighbors.
    #[serde(default = "EditorConfig::default_insert_spacing")]
    pub insert_spacing: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            point_radius: DEFAULT_POINT_RADIUS,
            move_tolerance: DEFAULT_MOVE_TOLERANCE,
            outline_step: DEFAULT_OUTLINE_STEP,
            insert_spacing: DEFAULT_INSERT_SPACING,
        }
    }
}

impl EditorConfig {
    fn default_point_radius() -> f32 {
        DEFAULT_POINT_RADIUS
    }

    fn default_move_tolerance() -> f32 {
        DEFAULT_MOVE_TOLERANCE
    }

    fn default_outline_step() -> f32 {
        DEFAULT_OUTLINE_STEP
    }

    fn default_insert_spacing() -> f32 {
        DEFAULT_INSERT_SPACING
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CurveError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `TONECURVE_POINT_RADIUS` and `TONECURVE_MOVE_TOLERANCE` from the
    /// environment. Unparsable or out-of-range values are ignored.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Same as [`EditorConfig::with_env_overrides`], reading values through
    /// `lookup` instead of the process environment.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| -> Option<f32> {
            let raw = lookup(key)?;
            match raw.trim().parse::<f32>() {
                Ok(v) if v.is_finite() && v > 0.0 => Some(v),
                _ => {
                    tracing::warn!("ignoring {key}={raw:?}: expected a positive number");
                    None
                }
            }
        };
        if let Some(radius) = read("TONECURVE_POINT_RADIUS") {
            self.point_radius = radius;
        }
        if let Some(tolerance) = read("TONECURVE_MOVE_TOLERANCE") {
            self.move_tolerance = tolerance;
        }
        self
    }

    /// This configuration if it validates, the defaults otherwise.
    pub fn or_default(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(err) => {
                tracing::warn!("invalid editor config ({err}), using defaults");
                Self::default()
            }
        }
    }

    /// Every field must be finite and strictly positive.
    pub fn validate(&self) -> Result<(), CurveError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.point_radius) {
            return Err(CurveError::InvalidConfig("point_radius must be positive"));
        }
        if !positive(self.move_tolerance) {
            return Err(CurveError::InvalidConfig("move_tolerance must be positive"));
        }
        if !positive(self.outline_step) {
            return Err(CurveError::InvalidConfig("outline_step must be positive"));
        }
        if !positive(self.insert_spacing) {
            return Err(CurveError::InvalidConfig("insert_spacing must be positive"));
        }
        Ok(())
    }
}
