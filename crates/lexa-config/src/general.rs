//! General application configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const FORMATS: &[&str] = &["json", "raw"];

fn default_format() -> String {
    "json".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct GeneralConfig {
    /// Output format used when `--format` is not given (`json` or `raw`).
    #[serde(default = "default_format")]
    pub default_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_format: default_format(),
        }
    }
}

impl GeneralConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an unknown output format.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if FORMATS.contains(&self.default_format.as_str()) {
            Ok(())
        } else {
            Err(ConfigError::InvalidValue {
                field: "general.default_format".into(),
                reason: format!(
                    "expected one of {}, got '{}'",
                    FORMATS.join(", "),
                    self.default_format
                ),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.default_format, "json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_format_rejected() {
        let config = GeneralConfig {
            default_format: "table".into(),
        };
        assert!(config.validate().is_err());
    }
}
