//! SLA classification with pause accounting.
//!
//! The stored `sla_deadline` is the unpaused deadline. Paused time is rebuilt
//! from the audit log on every call and added on top, so the result depends
//! only on the case, its log, and `now`.
//!
//! Two pause sources are tracked:
//! - generic: `sla_paused` .. `sla_resumed`
//! - clarification: `clarification_requested` .. `clarification_responded`,
//!   counted, so the clock stays paused until every request is answered
//!
//! The clock is stopped while either source is open. Overlapping spans count
//! once.

use chrono::{DateTime, TimeDelta, Utc};

use lexa_core::entities::Case;
use lexa_core::enums::{AuditAction, CaseStatus};
use lexa_core::errors::CoreError;
use lexa_core::projections::{SlaReport, SlaStatus};

use crate::audit::AuditLog;

const DAY_MS: i64 = 86_400_000;

/// Paused time up to some instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PauseState {
    pub total: TimeDelta,
    pub paused: bool,
}

/// Fold pause spans from the log, ignoring entries after `now`.
#[must_use]
pub fn pause_state(log: &AuditLog, now: DateTime<Utc>) -> PauseState {
    let mut generic = false;
    let mut clarifications = 0u32;
    let mut since: Option<DateTime<Utc>> = None;
    let mut total = TimeDelta::zero();

    for entry in log.entries().iter().filter(|e| e.created_at <= now) {
        let was_paused = generic || clarifications > 0;
        match entry.action {
            AuditAction::SlaPaused => generic = true,
            AuditAction::SlaResumed => generic = false,
            AuditAction::ClarificationRequested => clarifications = clarifications.saturating_add(1),
            AuditAction::ClarificationResponded => clarifications = clarifications.saturating_sub(1),
            _ => continue,
        }
        let is_paused = generic || clarifications > 0;
        match (was_paused, is_paused) {
            (false, true) => since = Some(entry.created_at),
            (true, false) => {
                if let Some(start) = since.take() {
                    total += entry.created_at - start;
                }
            }
            _ => {}
        }
    }

    if let Some(start) = since {
        total += now - start;
    }

    PauseState {
        total,
        paused: since.is_some(),
    }
}

/// Whole days in `ms`, rounded up. `ms` must be non-negative.
const fn ceil_days(ms: i64) -> i64 {
    (ms + DAY_MS - 1) / DAY_MS
}

#[derive(Debug, Clone, Copy)]
pub struct SlaCalculator {
    warning_days: i64,
}

impl Default for SlaCalculator {
    fn default() -> Self {
        Self { warning_days: 2 }
    }
}

impl SlaCalculator {
    #[must_use]
    pub const fn new(warning_days: i64) -> Self {
        Self { warning_days }
    }

    #[must_use]
    pub const fn warning_days(&self) -> i64 {
        self.warning_days
    }

    /// Classify the case's SLA at `now`.
    ///
    /// # Errors
    ///
    /// `CoreError::Validation` for a negative department SLA or when the
    /// paused deadline overflows.
    pub fn calculate(
        &self,
        case: &Case,
        log: &AuditLog,
        now: DateTime<Utc>,
    ) -> Result<SlaReport, CoreError> {
        if case.department.sla_hours < 0 {
            return Err(CoreError::Validation(format!(
                "department {} has negative SLA hours ({})",
                case.department.name, case.department.sla_hours
            )));
        }

        let Some(base) = case.sla_deadline else {
            return Ok(SlaReport::none());
        };
        if matches!(
            case.status,
            CaseStatus::Completed | CaseStatus::Cancelled | CaseStatus::CaseClosed
        ) {
            return Ok(SlaReport::none());
        }

        let pauses = pause_state(log, now);
        let deadline = base.checked_add_signed(pauses.total).ok_or_else(|| {
            CoreError::Validation(format!("SLA deadline overflow for case {}", case.id))
        })?;

        let remaining_ms = (deadline - now).num_milliseconds();
        let (status, days_remaining) = if deadline < now {
            (SlaStatus::Overdue, -ceil_days(remaining_ms.saturating_abs()).max(1))
        } else {
            let days = ceil_days(remaining_ms);
            if days <= self.warning_days {
                (SlaStatus::Warning, days)
            } else {
                (SlaStatus::OnTrack, days)
            }
        };

        Ok(SlaReport {
            status,
            days_remaining,
            deadline: Some(deadline),
            paused_seconds: pauses.total.num_seconds(),
            is_paused: pauses.paused,
        })
    }
}
