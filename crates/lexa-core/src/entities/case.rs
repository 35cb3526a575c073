use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{CaseStatus, Priority, Visibility};

/// The practice area a case is filed under, with its SLA budget.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Department {
    pub name: String,
    /// Hours from submission to the SLA deadline.
    pub sla_hours: i64,
}

/// A legal request moving through the case lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Case {
    pub id: String,
    pub title: String,
    pub status: CaseStatus,
    pub visibility: Visibility,
    pub priority: Priority,
    pub client_id: String,
    pub assigned_lawyer_id: Option<String>,
    pub department: Department,
    pub sla_deadline: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Case {
    /// Whether `user_id` is the lawyer currently assigned to this case.
    #[must_use]
    pub fn is_assigned_to(&self, user_id: &str) -> bool {
        self.assigned_lawyer_id.as_deref() == Some(user_id)
    }
}

/// Client input for `create_case`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewCase {
    pub title: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub priority: Priority,
    pub department: Department,
}
