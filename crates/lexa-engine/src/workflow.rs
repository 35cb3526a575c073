//! Aggregated workflow view and dashboard summary for one case.
//!
//! Each part that can fail is computed on its own and replaced by a degraded
//! default on error, so a bad SLA config or a malformed audit row never hides
//! the rest of the summary.

use chrono::{DateTime, Utc};

use lexa_core::audit_detail::{
    CaseAssignedDetail, ClarificationRequestedDetail, DocumentsDetail, RequestRejectedDetail,
    SlaPausedDetail, StatusUpdatedDetail,
};
use lexa_core::entities::{AuditEntry, Case, PostOpinionQuery};
use lexa_core::enums::AuditAction;
use lexa_core::projections::{
    CaseWorkflow, Health, SlaImpact, SlaReport, SlaStatus, TimelineEvent,
};
use lexa_core::responses::{LifecycleSummary, SummaryMeta};

use crate::audit::AuditLog;
use crate::lifecycle::LifecycleResolver;
use crate::sla::SlaCalculator;

#[derive(Debug, Clone, Copy, Default)]
pub struct CaseWorkflowResolver {
    sla: SlaCalculator,
    lifecycle: LifecycleResolver,
}

impl CaseWorkflowResolver {
    #[must_use]
    pub const fn new(sla: SlaCalculator, lifecycle: LifecycleResolver) -> Self {
        Self { sla, lifecycle }
    }

    /// SLA report, or `none` with a warning if it cannot be computed.
    #[must_use]
    pub fn sla_or_none(&self, case: &Case, log: &AuditLog, now: DateTime<Utc>) -> SlaReport {
        self.sla.calculate(case, log, now).unwrap_or_else(|error| {
            tracing::warn!(case_id = %case.id, %error, "SLA calculation failed, reporting none");
            SlaReport::none()
        })
    }

    /// Workflow view of a case.
    #[must_use]
    pub fn resolve(
        &self,
        case: &Case,
        log: &AuditLog,
        queries: &[PostOpinionQuery],
        now: DateTime<Utc>,
    ) -> CaseWorkflow {
        let sla = self.sla_or_none(case, log, now);
        self.assemble(case, log, open_count(queries), &sla)
    }

    /// Dashboard summary, the public JSON contract.
    #[must_use]
    pub fn summary(
        &self,
        case: &Case,
        log: &AuditLog,
        queries: &[PostOpinionQuery],
        now: DateTime<Utc>,
    ) -> LifecycleSummary {
        let sla = self.sla_or_none(case, log, now);
        let open_queries = open_count(queries);
        let workflow = self.assemble(case, log, open_queries, &sla);
        let lifecycle = workflow.stage;

        LifecycleSummary {
            id: case.id.clone(),
            title: case.title.clone(),
            lifecycle_state: lifecycle,
            next_step: workflow.next_action.clone(),
            progress: self.lifecycle.progress(case, lifecycle),
            urgency_score: self.lifecycle.urgency_score(case, lifecycle, &sla),
            dashboard_bucket: self.lifecycle.dashboard_bucket(lifecycle, &sla),
            open_queries,
            meta: SummaryMeta {
                is_terminal: case.status.is_terminal(),
                generated_at: now,
            },
            sla,
            workflow,
        }
    }

    fn assemble(&self, case: &Case, log: &AuditLog, open_queries: u32, sla: &SlaReport) -> CaseWorkflow {
        let stage = self.lifecycle.resolve(case, log);
        let health = match sla.status {
            SlaStatus::Overdue => Health::Breached,
            SlaStatus::Warning => Health::AtRisk,
            SlaStatus::OnTrack | SlaStatus::None => Health::Active,
        };

        CaseWorkflow {
            stage,
            progress: self.lifecycle.progress(case, stage).percentage,
            health,
            next_action: self.lifecycle.next_action(case, stage, open_queries),
            sla_status: sla.status,
            timeline: log.entries().iter().map(timeline_event).collect(),
        }
    }
}

fn open_count(queries: &[PostOpinionQuery]) -> u32 {
    let open = queries.iter().filter(|q| q.is_open()).count();
    u32::try_from(open).unwrap_or(u32::MAX)
}

/// Project one audit entry. Undecodable details fall back to the bare label.
fn timeline_event(entry: &AuditEntry) -> TimelineEvent {
    let base = entry.action.label();
    let suffix = match entry.action {
        AuditAction::StatusUpdated => entry
            .details_as::<StatusUpdatedDetail>()
            .map(|d| format!("{} to {}", d.from, d.to)),
        AuditAction::CaseAssigned => entry
            .details_as::<CaseAssignedDetail>()
            .map(|d| d.assignee_id),
        AuditAction::SlaPaused => entry.details_as::<SlaPausedDetail>().map(|d| d.reason),
        AuditAction::ClarificationRequested => entry
            .details_as::<ClarificationRequestedDetail>()
            .map(|d| d.subject),
        AuditAction::RequestRejected => entry
            .details_as::<RequestRejectedDetail>()
            .map(|d| d.note.unwrap_or_default()),
        AuditAction::DocumentsRequested => entry
            .details_as::<DocumentsDetail>()
            .map(|d| d.message.unwrap_or_default()),
        _ => Some(String::new()),
    };

    let label = match suffix {
        Some(s) if s.is_empty() => base.to_string(),
        Some(s) => format!("{base}: {s}"),
        None => {
            tracing::warn!(entry_id = %entry.id, action = %entry.action, "undecodable audit details");
            base.to_string()
        }
    };

    let sla_impact = match entry.action {
        AuditAction::SlaPaused | AuditAction::ClarificationRequested => Some(SlaImpact::Paused),
        AuditAction::SlaResumed | AuditAction::ClarificationResponded => Some(SlaImpact::Resumed),
        _ => None,
    };

    TimelineEvent {
        id: entry.id.clone(),
        action: entry.action,
        label,
        actor_id: entry.user_id.clone(),
        at: entry.created_at,
        sla_impact,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use lexa_core::entities::Department;
    use lexa_core::enums::{CaseStatus, Priority, QueryStatus, Visibility};
    use lexa_core::projections::{DashboardBucket, LifecycleStatus, NextActionKind};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap()
    }

    fn case(status: CaseStatus) -> Case {
        Case {
            id: "cas-00c0ffee".into(),
            title: "Franchise agreement".into(),
            status,
            visibility: Visibility::Private,
            priority: Priority::High,
            client_id: "client".into(),
            assigned_lawyer_id: Some("lawyer".into()),
            department: Department {
                name: "Commercial".into(),
                sla_hours: 48,
            },
            sla_deadline: Some(t0() + Duration::hours(48)),
            completed_at: None,
            created_at: t0(),
            updated_at: t0(),
        }
    }

    fn entry(n: i64, action: AuditAction, details: Option<serde_json::Value>) -> AuditEntry {
        AuditEntry {
            id: format!("aud-{n:08x}"),
            user_id: "lawyer".into(),
            case_id: "cas-00c0ffee".into(),
            action,
            details,
            created_at: t0() + Duration::hours(n),
        }
    }

    fn open_query() -> PostOpinionQuery {
        PostOpinionQuery {
            id: "poq-00000001".into(),
            request_id: "cas-00c0ffee".into(),
            query_text: "q".into(),
            raised_by: "client".into(),
            status: QueryStatus::Open,
            response_text: None,
            responded_by: None,
            responded_at: None,
            created_at: t0(),
        }
    }

    #[test]
    fn breached_case_summary() {
        let resolver = CaseWorkflowResolver::default();
        let log = AuditLog::new(vec![entry(
            1,
            AuditAction::StatusUpdated,
            Some(json!({"from": "assigned", "to": "in_review", "notes": "accepted"})),
        )]);
        let now = t0() + Duration::hours(50);
        let summary = resolver.summary(&case(CaseStatus::InReview), &log, &[], now);

        assert_eq!(summary.sla.status, SlaStatus::Overdue);
        assert_eq!(summary.workflow.health, Health::Breached);
        assert_eq!(summary.workflow.stage, LifecycleStatus::InReview);
        assert_eq!(summary.urgency_score, 75 + 200);
        assert_eq!(summary.dashboard_bucket, DashboardBucket::SlaRisk);
        assert_eq!(summary.meta.generated_at, now);
        assert!(!summary.meta.is_terminal);
        assert_eq!(
            summary.workflow.timeline[0].label,
            "Status Changed: assigned to in_review"
        );
    }

    #[test]
    fn sla_failure_degrades_to_none() {
        let resolver = CaseWorkflowResolver::default();
        let mut c = case(CaseStatus::InReview);
        c.department.sla_hours = -5;
        let summary = resolver.summary(&c, &AuditLog::default(), &[], t0());
        assert_eq!(summary.sla, SlaReport::none());
        assert_eq!(summary.workflow.health, Health::Active);
        assert_eq!(summary.progress.percentage, 60);
    }

    #[test]
    fn undecodable_details_keep_bare_label() {
        let resolver = CaseWorkflowResolver::default();
        let log = AuditLog::new(vec![
            entry(1, AuditAction::StatusUpdated, Some(json!({"garbage": true}))),
            entry(2, AuditAction::SlaPaused, Some(json!({"reason": "client travelling"}))),
        ]);
        let workflow = resolver.resolve(&case(CaseStatus::InReview), &log, &[], t0() + Duration::hours(3));
        assert_eq!(workflow.timeline[0].label, "Status Changed");
        assert_eq!(workflow.timeline[1].label, "SLA Paused: client travelling");
        assert_eq!(workflow.timeline[1].sla_impact, Some(SlaImpact::Paused));
    }

    #[test]
    fn decline_and_documents_labels_carry_their_text() {
        let resolver = CaseWorkflowResolver::default();
        let log = AuditLog::new(vec![
            entry(1, AuditAction::RequestRejected, Some(json!({"note": "conflict of interest"}))),
            entry(2, AuditAction::RequestRejected, Some(json!({"note": null}))),
            entry(
                3,
                AuditAction::DocumentsRequested,
                Some(json!({"from": "in_review", "to": "documents_pending", "message": "Board minutes"})),
            ),
        ]);
        let workflow = resolver.resolve(&case(CaseStatus::DocumentsPending), &log, &[], t0());
        assert_eq!(workflow.timeline[0].label, "Request Declined: conflict of interest");
        assert_eq!(workflow.timeline[1].label, "Request Declined");
        assert_eq!(workflow.timeline[2].label, "Documents Requested: Board minutes");
        assert_eq!(workflow.timeline[2].sla_impact, None);
    }

    #[test]
    fn open_queries_drive_next_action() {
        let resolver = CaseWorkflowResolver::default();
        let c = case(CaseStatus::ClientAcknowledged);
        let summary = resolver.summary(&c, &AuditLog::default(), &[open_query()], t0());
        assert_eq!(summary.open_queries, 1);
        assert_eq!(summary.lifecycle_state, LifecycleStatus::Delivered);
        assert_eq!(summary.next_step.kind, NextActionKind::ResolveQueries);
        assert_eq!(summary.workflow.next_action, summary.next_step);
    }

    #[test]
    fn closed_case_is_terminal_and_scores_zero() {
        let resolver = CaseWorkflowResolver::default();
        let summary = resolver.summary(&case(CaseStatus::CaseClosed), &AuditLog::default(), &[], t0());
        assert!(summary.meta.is_terminal);
        assert_eq!(summary.urgency_score, 0);
        assert_eq!(summary.sla.status, SlaStatus::None);
        assert_eq!(summary.dashboard_bucket, DashboardBucket::Completed);
        assert_eq!(summary.progress.percentage, 100);
    }
}
