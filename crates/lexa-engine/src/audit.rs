//! Read-side view over a case's audit entries.
//!
//! `AuditLog` orders entries by time once, then answers the questions the
//! SLA calculator, lifecycle resolver, and replay need. Entries with equal
//! timestamps keep the order the store returned them in.

use lexa_core::audit_detail::StatusUpdatedDetail;
use lexa_core::entities::AuditEntry;
use lexa_core::enums::{AuditAction, CaseStatus};
use lexa_core::errors::CoreError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
}

/// Status rebuilt by folding the log from an empty case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Replay {
    pub status: CaseStatus,
    pub events_applied: u32,
}

impl AuditLog {
    #[must_use]
    pub fn new(mut entries: Vec<AuditEntry>) -> Self {
        entries.sort_by_key(|e| e.created_at);
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<AuditEntry> {
        self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clarification requests not yet answered. Unmatched responses are ignored.
    #[must_use]
    pub fn open_clarifications(&self) -> u32 {
        self.entries.iter().fold(0u32, |open, e| match e.action {
            AuditAction::ClarificationRequested => open.saturating_add(1),
            AuditAction::ClarificationResponded => open.saturating_sub(1),
            _ => open,
        })
    }

    /// Whether the assigned lawyer declined the case since its last
    /// assignment.
    #[must_use]
    pub fn declined(&self) -> bool {
        self.entries.iter().fold(false, |declined, e| match e.action {
            AuditAction::RequestRejected => true,
            AuditAction::CaseAssigned => false,
            _ => declined,
        })
    }

    /// Whether the generic SLA pause is currently open.
    #[must_use]
    pub fn sla_paused(&self) -> bool {
        self.entries.iter().fold(false, |paused, e| match e.action {
            AuditAction::SlaPaused => true,
            AuditAction::SlaResumed => false,
            _ => paused,
        })
    }

    /// Fold status-changing events from `submitted`.
    ///
    /// # Errors
    ///
    /// `CoreError::Validation` if a `status_updated` entry has undecodable
    /// details, or the log contains a move the transition table forbids.
    pub fn replay(&self) -> Result<Replay, CoreError> {
        let mut status = CaseStatus::Submitted;
        let mut events_applied = 0u32;

        for entry in &self.entries {
            let next = match entry.action {
                AuditAction::CaseSubmitted => {
                    events_applied += 1;
                    continue;
                }
                AuditAction::CaseAssigned => CaseStatus::Assigned,
                AuditAction::StatusUpdated => {
                    let detail: StatusUpdatedDetail = entry.details_as().ok_or_else(|| {
                        CoreError::Validation(format!(
                            "audit entry {} has no decodable status detail",
                            entry.id
                        ))
                    })?;
                    detail.to
                }
                AuditAction::ClientAcknowledgedOpinion => CaseStatus::ClientAcknowledged,
                AuditAction::ClientConfirmedNoQuestions => CaseStatus::NoFurtherQueriesConfirmed,
                AuditAction::CaseClosed => CaseStatus::CaseClosed,
                AuditAction::DocumentsRequested => CaseStatus::DocumentsPending,
                AuditAction::DocumentsUploaded => CaseStatus::InReview,
                _ => continue,
            };

            if !status.can_transition_to(next) {
                return Err(CoreError::Validation(format!(
                    "audit entry {} moves case from {status} to {next}, which is not allowed",
                    entry.id
                )));
            }
            status = next;
            events_applied += 1;
        }

        Ok(Replay {
            status,
            events_applied,
        })
    }
}
