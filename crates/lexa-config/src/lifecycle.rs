//! Lifecycle resolution settings.

use lexa_core::enums::LegacyStatusPolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct LifecycleConfig {
    /// How stored status strings outside the known vocabulary are handled.
    #[serde(default)]
    pub legacy_status_policy: LegacyStatusPolicy,
}
