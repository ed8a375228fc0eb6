/// Error types for configuration loading and argument parsing
use thiserror::Error;

/// Errors raised while loading or validating a [`crate::RenderConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value {field} = {value}: must be positive and finite")]
    Invalid { field: &'static str, value: f64 },
}

/// Raised when text does not name one of the supported rotation axes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported rotation axis {0:?}, expected \"x\" or \"y\"")]
pub struct ParseAxisError(pub String);

/// Raised when a face table refers to a vertex that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("face {face} refers to vertex {index}, but the solid has {vertex_count} vertices")]
pub struct GeometryError {
    pub face: usize,
    pub index: usize,
    pub vertex_count: usize,
}
