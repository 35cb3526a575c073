use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::AuditAction;

/// An append-only audit trail entry recording one case event.
///
/// `details` shape depends on `action`; see [`crate::audit_detail`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuditEntry {
    pub id: String,
    pub user_id: String,
    pub case_id: String,
    pub action: AuditAction,
    pub details: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl AuditEntry {
    /// Decode `details` into a typed payload. `None` when absent or malformed.
    #[must_use]
    pub fn details_as<T: serde::de::DeserializeOwned>(&self) -> Option<T> {
        self.details
            .as_ref()
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }
}
