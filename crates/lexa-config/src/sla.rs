//! SLA calculation settings.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Days remaining at or below which a case is classed `warning`.
const fn default_warning_days() -> i64 {
    2
}

/// SLA budget for departments that do not set their own.
const fn default_sla_hours() -> i64 {
    72
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct SlaConfig {
    #[serde(default = "default_warning_days")]
    pub warning_days: i64,

    #[serde(default = "default_sla_hours")]
    pub default_sla_hours: i64,
}

impl Default for SlaConfig {
    fn default() -> Self {
        Self {
            warning_days: default_warning_days(),
            default_sla_hours: default_sla_hours(),
        }
    }
}

impl SlaConfig {
    /// Reject values the SLA calculator cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a negative warning window or a
    /// non-positive SLA budget.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.warning_days < 0 {
            return Err(ConfigError::InvalidValue {
                field: "sla.warning_days".into(),
                reason: format!("must be >= 0, got {}", self.warning_days),
            });
        }
        if self.default_sla_hours <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "sla.default_sla_hours".into(),
                reason: format!("must be > 0, got {}", self.default_sla_hours),
            });
        }
        Ok(())
    }
}
