//! Error types for antfarm operations.
//!
//! Nothing inside a tick can fail. Errors only surface when a collaborator
//! hands the engine a configuration it cannot run with.

use thiserror::Error;

/// Result type for antfarm operations.
pub type Result<T> = std::result::Result<T, AntfarmError>;

/// Errors that can occur while configuring a simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AntfarmError {
    /// A parameter or world setting is unusable.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// A spatial index was configured with an unusable cell size.
    #[error("spatial index error: {0}")]
    Index(String),
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Invalid value.
    #[error("invalid value for {field}: {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
    /// Out of range.
    #[error("{field} out of range: {value} (must be {min}-{max})")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },
}

// Convenience constructors
impl AntfarmError {
    pub fn invalid_config(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        AntfarmError::Config(ConfigError::InvalidValue {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        })
    }

    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, value: f64) -> Self {
        AntfarmError::Config(ConfigError::OutOfRange {
            field: field.into(),
            min,
            max,
            value,
        })
    }

    pub fn invalid_cell_size(size: f64) -> Self {
        AntfarmError::Index(format!("cell size must be positive and finite, got {}", size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_field() {
        let err = AntfarmError::out_of_range("drop_prob", 0.0, 1.0, 1.5);
        assert_eq!(
            err.to_string(),
            "config error: drop_prob out of range: 1.5 (must be 0-1)"
        );

        let err = AntfarmError::invalid_config("sense_radius", -3.0, "must be positive");
        assert!(err.to_string().contains("sense_radius"));
        assert!(err.to_string().contains("-3"));
    }

    #[test]
    fn cell_size_error() {
        let err = AntfarmError::invalid_cell_size(0.0);
        assert!(matches!(err, AntfarmError::Index(_)));
    }
}
