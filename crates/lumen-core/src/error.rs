//! Error types for Lumen

use thiserror::Error;

/// The main error type for Lumen operations
#[derive(Debug, Error)]
pub enum LumenError {
    #[error("Invalid particle count: {0} (must be greater than zero)")]
    InvalidCount(i64),

    #[error("Invalid shape dimension: {name} must be greater than zero, got {value}")]
    InvalidDimension { name: String, value: f32 },

    #[error("Text raster is empty: {0:?} produced no usable pixels")]
    EmptyRaster(String),

    #[error("Particle index out of range: {index} (population is {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Target set has {actual} entries, population is {expected}")]
    TargetCountMismatch { expected: usize, actual: usize },

    #[error("Particle store not initialized")]
    NotInitialized,

    #[error("Observer error: {0}")]
    ObserverError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Scenario error: {0}")]
    ScenarioError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

/// Result type alias for Lumen operations
pub type Result<T> = std::result::Result<T, LumenError>;

impl LumenError {
    /// Shorthand for a rejected size parameter
    pub fn dimension(name: impl Into<String>, value: f32) -> Self {
        LumenError::InvalidDimension {
            name: name.into(),
            value,
        }
    }
}

impl From<toml::de::Error> for LumenError {
    fn from(err: toml::de::Error) -> Self {
        LumenError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for LumenError {
    fn from(err: toml::ser::Error) -> Self {
        LumenError::TomlSerError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_message_names_field() {
        let err = LumenError::dimension("radius", -1.0);
        assert_eq!(
            err.to_string(),
            "Invalid shape dimension: radius must be greater than zero, got -1"
        );
    }

    #[test]
    fn toml_error_converts() {
        let parsed: std::result::Result<toml::Value, _> = toml::from_str("count = ");
        let err: LumenError = parsed.unwrap_err().into();
        assert!(matches!(err, LumenError::TomlParseError(_)));
    }
}
