//! # Configuration Types
//!
//! Common configuration structures shared across ucinjector components.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, InjectorError};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (pretty, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

/// Levels accepted by the logging subscriber
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Configuration validation trait
pub trait ConfigValidation {
    type Error: InjectorError;

    /// Validate the configuration
    fn validate(&self) -> Result<(), Self::Error>;

    /// Get configuration warnings (non-fatal issues)
    fn warnings(&self) -> Vec<String> {
        Vec::new()
    }
}

impl ConfigValidation for LoggingConfig {
    type Error = ConfigurationError;

    fn validate(&self) -> Result<(), Self::Error> {
        if !LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigurationError::InvalidValue {
                key: "logging.level".to_string(),
                value: self.level.clone(),
                reason: format!("expected one of {}", LOG_LEVELS.join(", ")),
            });
        }

        if !matches!(self.format.as_str(), "pretty" | "compact") {
            return Err(ConfigurationError::InvalidValue {
                key: "logging.format".to_string(),
                value: self.format.clone(),
                reason: "expected pretty or compact".to_string(),
            });
        }

        Ok(())
    }

    fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if matches!(self.level.to_lowercase().as_str(), "error") {
            warnings.push(
                "Log level 'error' hides fail-open lookup warnings; uniqueness problems will go unnoticed"
                    .to_string(),
            );
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_default_is_valid() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(config.validate().is_ok());
        assert!(config.warnings().is_empty());
    }

    #[test]
    fn test_logging_config_rejects_unknown_level() {
        let config = LoggingConfig {
            level: "verbose".to_string(),
            ..Default::default()
        };

        match config.validate() {
            Err(ConfigurationError::InvalidValue { key, .. }) => assert_eq!(key, "logging.level"),
            other => panic!("Expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_logging_config_level_is_case_insensitive() {
        let config = LoggingConfig {
            level: "WARN".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_logging_config_error_level_warns() {
        let config = LoggingConfig {
            level: "error".to_string(),
            ..Default::default()
        };
        assert_eq!(config.warnings().len(), 1);
    }
}
