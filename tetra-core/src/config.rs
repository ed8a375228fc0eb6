/// Session configuration for the renderer
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::projection::ProjectionMode;
use crate::visibility::VisibilityMode;

/// Fixed constants for one rendering session.
///
/// Every field has a default, so a TOML file only needs to name the values
/// it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Output scale applied to projected points before they reach the surface.
    pub size: f64,
    /// Multiplier taking object-local units into projection units.
    pub geometry_scale: f64,
    pub field_of_view: f64,
    /// Distance from the eye to the object origin, in projection units.
    pub viewer_distance: f64,
    pub projection: ProjectionMode,
    pub visibility: VisibilityMode,
    /// Radians of rotation per pixel of pointer movement.
    pub drag_sensitivity: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            size: 500.0,
            geometry_scale: 100.0,
            field_of_view: std::f64::consts::PI,
            viewer_distance: 1000.0,
            projection: ProjectionMode::Perspective,
            visibility: VisibilityMode::DepthSorted,
            drag_sensitivity: 0.01,
        }
    }
}

impl RenderConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        log::info!("loaded render config from {}", path.display());
        Ok(config)
    }

    /// Check that every numeric constant is positive and finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("size", self.size),
            ("geometry_scale", self.geometry_scale),
            ("field_of_view", self.field_of_view),
            ("viewer_distance", self.viewer_distance),
            ("drag_sensitivity", self.drag_sensitivity),
        ];
        for (field, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid { field, value });
            }
        }
        Ok(())
    }

    /// Same configuration with a different output scale.
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }
}
