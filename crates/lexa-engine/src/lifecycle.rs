//! Display lifecycle, progress, next action, urgency, and dashboard bucket.
//!
//! Everything here is derived from the case record, its audit log, and the SLA
//! report. None of it feeds back into transition legality.

use lexa_core::entities::Case;
use lexa_core::enums::{CaseStatus, LegacyStatusPolicy, Visibility};
use lexa_core::errors::CoreError;
use lexa_core::projections::{
    ActionPriority, DashboardBucket, LifecycleStatus, NextAction, NextActionKind, Progress,
    ProgressStep, SlaReport, SlaStatus,
};

use crate::audit::AuditLog;

const PRIVATE_FLOW: [(&str, &str); 5] = [
    ("submitted", "Requested"),
    ("assigned", "Assigned"),
    ("in_review", "In Drafting"),
    ("opinion_ready", "Opinion Ready"),
    ("completed", "Completed"),
];

const PUBLIC_FLOW: [(&str, &str); 5] = [
    ("marketplace_posted", "Posted"),
    ("claimed", "Claimed"),
    ("in_review", "In Drafting"),
    ("opinion_ready", "Opinion Ready"),
    ("completed", "Completed"),
];

/// Map a stored status string to a `CaseStatus`.
///
/// See [`CaseStatus::parse_legacy`] for the alias table. The flag is `false`
/// when the value was not recognized and `submitted` was substituted.
#[must_use]
pub fn parse_legacy_status(raw: &str) -> (CaseStatus, bool) {
    CaseStatus::parse_legacy(raw)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LifecycleResolver {
    policy: LegacyStatusPolicy,
}

impl LifecycleResolver {
    #[must_use]
    pub const fn new(policy: LegacyStatusPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub const fn policy(&self) -> LegacyStatusPolicy {
        self.policy
    }

    /// Parse a stored status under the configured policy.
    ///
    /// # Errors
    ///
    /// `CoreError::Validation` for an unrecognized value under
    /// `LegacyStatusPolicy::Reject`.
    pub fn normalize_status(&self, raw: &str) -> Result<CaseStatus, CoreError> {
        let (status, recognized) = parse_legacy_status(raw);
        if recognized {
            return Ok(status);
        }
        match self.policy {
            LegacyStatusPolicy::Fallback => {
                tracing::warn!(raw, "unrecognized case status, treating as submitted");
                Ok(status)
            }
            LegacyStatusPolicy::Reject => {
                Err(CoreError::Validation(format!("unrecognized case status '{raw}'")))
            }
        }
    }

    /// The display lifecycle for a case.
    #[must_use]
    pub fn resolve(&self, case: &Case, log: &AuditLog) -> LifecycleStatus {
        match case.status {
            CaseStatus::Completed | CaseStatus::CaseClosed => LifecycleStatus::Completed,
            CaseStatus::Cancelled => LifecycleStatus::Cancelled,
            CaseStatus::ClientAcknowledged | CaseStatus::NoFurtherQueriesConfirmed => {
                LifecycleStatus::Delivered
            }
            CaseStatus::OpinionReady => LifecycleStatus::OpinionReady,
            _ if log.open_clarifications() > 0 => LifecycleStatus::ClarificationPending,
            CaseStatus::ClarificationRequired | CaseStatus::DocumentsPending => {
                LifecycleStatus::ClarificationPending
            }
            CaseStatus::InReview | CaseStatus::DraftingOpinion => LifecycleStatus::InReview,
            CaseStatus::Assigned => LifecycleStatus::Assigned,
            CaseStatus::Submitted => match case.visibility {
                Visibility::Public => LifecycleStatus::MarketplacePosted,
                Visibility::Private => LifecycleStatus::Submitted,
            },
        }
    }

    /// Position along the five-step flow for the case's visibility.
    #[must_use]
    pub fn progress(&self, case: &Case, lifecycle: LifecycleStatus) -> Progress {
        let public = case.visibility == Visibility::Public;
        let flow = if public { PUBLIC_FLOW } else { PRIVATE_FLOW };

        let active = match lifecycle {
            LifecycleStatus::Submitted | LifecycleStatus::MarketplacePosted => 0,
            LifecycleStatus::Assigned => 1,
            LifecycleStatus::ClarificationPending | LifecycleStatus::InReview => 2,
            LifecycleStatus::OpinionReady | LifecycleStatus::Delivered => 3,
            LifecycleStatus::Completed | LifecycleStatus::Cancelled => 4,
        };
        let terminal = lifecycle.is_terminal();
        let total = flow.len();

        let steps = flow
            .iter()
            .enumerate()
            .map(|(idx, (id, label))| ProgressStep {
                id: (*id).to_string(),
                label: (*label).to_string(),
                completed: terminal || idx < active,
                current: idx == active,
            })
            .collect();

        let percentage = if terminal {
            100
        } else {
            u8::try_from((active + 1) * 100 / total).unwrap_or(100)
        };

        Progress {
            current_step: u32::try_from(active + 1).unwrap_or(1),
            total_steps: u32::try_from(total).unwrap_or(5),
            percentage,
            label: Self::label(lifecycle, public).to_string(),
            steps,
        }
    }

    /// Human label for the display lifecycle.
    #[must_use]
    pub const fn label(lifecycle: LifecycleStatus, public: bool) -> &'static str {
        match lifecycle {
            LifecycleStatus::Submitted => "Submitted",
            LifecycleStatus::MarketplacePosted => "Posted",
            LifecycleStatus::Assigned if public => "Claimed",
            LifecycleStatus::Assigned => "Assigned",
            LifecycleStatus::ClarificationPending => "Clarification Needed",
            LifecycleStatus::InReview => "In Review",
            LifecycleStatus::OpinionReady => "Opinion Ready",
            LifecycleStatus::Delivered => "Delivered",
            LifecycleStatus::Completed => "Completed",
            LifecycleStatus::Cancelled => "Cancelled",
        }
    }

    /// The advised next step, given how many post-opinion queries are open.
    #[must_use]
    pub fn next_action(&self, case: &Case, lifecycle: LifecycleStatus, open_queries: u32) -> NextAction {
        let (kind, title, description, priority) = match lifecycle {
            LifecycleStatus::Completed => (
                NextActionKind::None,
                "Case Completed",
                "This case has been completed and closed.",
                ActionPriority::Low,
            ),
            LifecycleStatus::Cancelled => (
                NextActionKind::None,
                "Case Cancelled",
                "This case was cancelled.",
                ActionPriority::Low,
            ),
            LifecycleStatus::ClarificationPending => (
                NextActionKind::RespondClarification,
                "Clarification Needed",
                "The lawyer needs additional information from the client.",
                ActionPriority::High,
            ),
            LifecycleStatus::OpinionReady => (
                NextActionKind::ReviewOpinion,
                "Opinion Ready",
                "The legal opinion is ready for the client to review and acknowledge.",
                ActionPriority::High,
            ),
            LifecycleStatus::Submitted => (
                NextActionKind::AwaitAssignment,
                "Waiting for Assignment",
                "The request is waiting to be routed to a lawyer.",
                ActionPriority::Low,
            ),
            LifecycleStatus::MarketplacePosted => (
                NextActionKind::AwaitAssignment,
                "Posted to Marketplace",
                "Lawyers are reviewing the request.",
                ActionPriority::Low,
            ),
            LifecycleStatus::Assigned => (
                NextActionKind::AcceptCase,
                "Awaiting Acceptance",
                "The assigned lawyer needs to accept the case.",
                ActionPriority::Medium,
            ),
            LifecycleStatus::InReview if case.status == CaseStatus::DraftingOpinion => (
                NextActionKind::SubmitOpinion,
                "Drafting Opinion",
                "The lawyer is preparing the legal opinion.",
                ActionPriority::Medium,
            ),
            LifecycleStatus::InReview => (
                NextActionKind::BeginReview,
                "Lawyer Reviewing",
                "The lawyer is reviewing the case details.",
                ActionPriority::Medium,
            ),
            LifecycleStatus::Delivered if case.status == CaseStatus::NoFurtherQueriesConfirmed => (
                NextActionKind::CloseCase,
                "Ready to Close",
                "The client has no further questions. The lawyer can close the case.",
                ActionPriority::Medium,
            ),
            LifecycleStatus::Delivered if open_queries > 0 => (
                NextActionKind::ResolveQueries,
                "Queries Outstanding",
                "The client has raised follow-up questions on the opinion.",
                ActionPriority::High,
            ),
            LifecycleStatus::Delivered => (
                NextActionKind::AwaitClient,
                "Opinion Delivered",
                "Waiting for the client to raise a query or confirm no further questions.",
                ActionPriority::Low,
            ),
        };

        NextAction {
            kind,
            title: title.to_string(),
            description: description.to_string(),
            priority,
        }
    }

    /// Sort key for dashboards. Higher is more urgent; terminal cases score 0.
    #[must_use]
    pub fn urgency_score(&self, case: &Case, lifecycle: LifecycleStatus, sla: &SlaReport) -> u32 {
        if lifecycle.is_terminal() {
            return 0;
        }
        let sla_weight = match sla.status {
            SlaStatus::Overdue => 200,
            SlaStatus::Warning => 150,
            SlaStatus::OnTrack | SlaStatus::None => 0,
        };
        let lifecycle_weight = match lifecycle {
            LifecycleStatus::ClarificationPending => 100,
            LifecycleStatus::OpinionReady => 50,
            _ => 0,
        };
        case.priority.weight() + sla_weight + lifecycle_weight
    }

    #[must_use]
    pub fn dashboard_bucket(&self, lifecycle: LifecycleStatus, sla: &SlaReport) -> DashboardBucket {
        if lifecycle.is_terminal() {
            return DashboardBucket::Completed;
        }
        if matches!(
            lifecycle,
            LifecycleStatus::ClarificationPending | LifecycleStatus::OpinionReady
        ) {
            return DashboardBucket::ActionNeeded;
        }
        if matches!(sla.status, SlaStatus::Overdue | SlaStatus::Warning) {
            return DashboardBucket::SlaRisk;
        }
        DashboardBucket::Active
    }
}
