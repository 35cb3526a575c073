//! Derived, read-only views of a case: SLA report, display lifecycle,
//! progress, next action, and the workflow timeline.
//!
//! Nothing here is persisted. Every value is recomputed from the case record
//! and its audit log.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::enums::AuditAction;

// ---------------------------------------------------------------------------
// SLA
// ---------------------------------------------------------------------------

/// SLA classification of a case at a point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SlaStatus {
    OnTrack,
    Warning,
    Overdue,
    #[default]
    None,
}

impl SlaStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnTrack => "on_track",
            Self::Warning => "warning",
            Self::Overdue => "overdue",
            Self::None => "none",
        }
    }
}

impl fmt::Display for SlaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of an SLA calculation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SlaReport {
    pub status: SlaStatus,
    /// Whole days until the effective deadline, rounded up. Negative when overdue.
    pub days_remaining: i64,
    /// Deadline after adding paused time. `None` when no SLA applies.
    pub deadline: Option<DateTime<Utc>>,
    /// Total seconds the SLA clock has been paused.
    pub paused_seconds: i64,
    pub is_paused: bool,
}

impl SlaReport {
    /// The report for a case with no applicable SLA.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// LifecycleStatus
// ---------------------------------------------------------------------------

/// Display lifecycle shown on dashboards.
///
/// Coarser than `CaseStatus`, and aware of things the status alone does not
/// say (marketplace posting, outstanding clarifications).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStatus {
    Submitted,
    MarketplacePosted,
    Assigned,
    ClarificationPending,
    InReview,
    OpinionReady,
    Delivered,
    Completed,
    Cancelled,
}

impl LifecycleStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::MarketplacePosted => "marketplace_posted",
            Self::Assigned => "assigned",
            Self::ClarificationPending => "clarification_pending",
            Self::InReview => "in_review",
            Self::OpinionReady => "opinion_ready",
            Self::Delivered => "delivered",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for LifecycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProgressStep {
    pub id: String,
    pub label: String,
    pub completed: bool,
    pub current: bool,
}

/// Position of a case along its five-step flow.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Progress {
    /// 1-based index of the current step.
    pub current_step: u32,
    pub total_steps: u32,
    pub percentage: u8,
    pub label: String,
    pub steps: Vec<ProgressStep>,
}

// ---------------------------------------------------------------------------
// NextAction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NextActionKind {
    AcceptCase,
    BeginReview,
    SubmitOpinion,
    RespondClarification,
    ReviewOpinion,
    AwaitClient,
    ResolveQueries,
    CloseCase,
    AwaitAssignment,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActionPriority {
    High,
    Medium,
    Low,
}

/// The advised next step for whoever is looking at the case.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NextAction {
    pub kind: NextActionKind,
    pub title: String,
    pub description: String,
    pub priority: ActionPriority,
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Overall health of a case for workflow views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Health {
    #[default]
    Active,
    AtRisk,
    Breached,
}

/// Which dashboard column a case is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DashboardBucket {
    Active,
    ActionNeeded,
    SlaRisk,
    Completed,
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

/// Effect an audit event had on the SLA clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SlaImpact {
    Paused,
    Resumed,
}

/// One audit entry as shown on the case timeline.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TimelineEvent {
    pub id: String,
    pub action: AuditAction,
    pub label: String,
    pub actor_id: String,
    pub at: DateTime<Utc>,
    pub sla_impact: Option<SlaImpact>,
}

/// Everything a workflow view needs about one case.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CaseWorkflow {
    pub stage: LifecycleStatus,
    pub progress: u8,
    pub health: Health,
    pub next_action: NextAction,
    pub sla_status: SlaStatus,
    pub timeline: Vec<TimelineEvent>,
}
