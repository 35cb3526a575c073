//! Response types returned as JSON by `lexa` commands and dashboard callers.
//!
//! `LifecycleSummary` is a public contract consumed by dashboards and uses
//! camelCase field names on the wire.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{AuditEntry, Case, PostOpinionQuery};
use crate::enums::CaseStatus;
use crate::projections::{
    CaseWorkflow, DashboardBucket, LifecycleStatus, NextAction, Progress, SlaReport,
};

/// Metadata about a generated summary.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMeta {
    pub is_terminal: bool,
    pub generated_at: DateTime<Utc>,
}

/// Dashboard summary of one case.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleSummary {
    pub id: String,
    pub title: String,
    pub workflow: CaseWorkflow,
    pub lifecycle_state: LifecycleStatus,
    pub sla: SlaReport,
    pub next_step: NextAction,
    pub progress: Progress,
    pub urgency_score: u32,
    pub dashboard_bucket: DashboardBucket,
    pub open_queries: u32,
    pub meta: SummaryMeta,
}

/// Response from `lexa case show`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CaseDetailResponse {
    pub case: Case,
    pub queries: Vec<PostOpinionQuery>,
}

/// Response from `lexa audit trail`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuditTrailResponse {
    pub case_id: String,
    pub entries: Vec<AuditEntry>,
}

/// Response from `lexa audit replay`: the stored status against the status
/// rebuilt from the audit log.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReplayVerification {
    pub case_id: String,
    pub stored: CaseStatus,
    pub replayed: CaseStatus,
    pub matches: bool,
    pub events_applied: u32,
}
