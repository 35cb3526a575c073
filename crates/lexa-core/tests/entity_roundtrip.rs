//! Serde roundtrip and JsonSchema validation tests for entities and projections.

use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use schemars::schema_for;
use lexa_core::audit_detail::{QueryRaisedDetail, StatusUpdatedDetail};
use lexa_core::entities::*;
use lexa_core::enums::*;
use lexa_core::errors::FailureReason;
use lexa_core::projections::*;
use lexa_core::responses::*;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(recovered, val, "serde roundtrip failed for {}", stringify!($ty));

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sample_case() -> Case {
    let created = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
    Case {
        id: "cas-a3f8b2c1".into(),
        title: "Lease review for warehouse unit".into(),
        status: CaseStatus::InReview,
        visibility: Visibility::Private,
        priority: Priority::High,
        client_id: "usr-client01".into(),
        assigned_lawyer_id: Some("usr-lawyer01".into()),
        department: Department {
            name: "Property".into(),
            sla_hours: 48,
        },
        sla_deadline: Some(created + Duration::hours(48)),
        completed_at: None,
        created_at: created,
        updated_at: created,
    }
}

fn sample_next_action() -> NextAction {
    NextAction {
        kind: NextActionKind::SubmitOpinion,
        title: "Draft Opinion".into(),
        description: "Review documents and prepare the legal opinion.".into(),
        priority: ActionPriority::High,
    }
}

fn sample_progress() -> Progress {
    Progress {
        current_step: 3,
        total_steps: 5,
        percentage: 60,
        label: "In Drafting".into(),
        steps: vec![ProgressStep {
            id: "drafting".into(),
            label: "In Drafting".into(),
            completed: false,
            current: true,
        }],
    }
}

fn sample_workflow() -> CaseWorkflow {
    CaseWorkflow {
        stage: LifecycleStatus::InReview,
        progress: 60,
        health: Health::AtRisk,
        next_action: sample_next_action(),
        sla_status: SlaStatus::Warning,
        timeline: vec![TimelineEvent {
            id: "aud-0000aaaa".into(),
            action: AuditAction::SlaPaused,
            label: "SLA Paused".into(),
            actor_id: "usr-lawyer01".into(),
            at: Utc::now(),
            sla_impact: Some(SlaImpact::Paused),
        }],
    }
}

roundtrip_and_validate!(case_roundtrip, Case, sample_case());

roundtrip_and_validate!(
    audit_entry_roundtrip,
    AuditEntry,
    AuditEntry {
        id: "aud-1b2c3d4e".into(),
        user_id: "usr-lawyer01".into(),
        case_id: "cas-a3f8b2c1".into(),
        action: AuditAction::StatusUpdated,
        details: Some(
            serde_json::to_value(StatusUpdatedDetail {
                from: CaseStatus::InReview,
                to: CaseStatus::DraftingOpinion,
                notes: Some("documents complete".into()),
            })
            .unwrap()
        ),
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    query_roundtrip,
    PostOpinionQuery,
    PostOpinionQuery {
        id: "poq-00ff00ff".into(),
        request_id: "cas-a3f8b2c1".into(),
        query_text: "Does the break clause survive assignment?".into(),
        raised_by: "usr-client01".into(),
        status: QueryStatus::Resolved,
        response_text: Some("Yes, see clause 12.3.".into()),
        responded_by: Some("usr-lawyer01".into()),
        responded_at: Some(Utc::now()),
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    notification_roundtrip,
    Notification,
    Notification {
        user_id: "usr-lawyer01".into(),
        kind: NotificationKind::ClientUpdate,
        message: "Client confirmed no further questions".into(),
        case_id: "cas-a3f8b2c1".into(),
    }
);

roundtrip_and_validate!(
    sla_report_roundtrip,
    SlaReport,
    SlaReport {
        status: SlaStatus::Overdue,
        days_remaining: -1,
        deadline: Some(Utc::now()),
        paused_seconds: 36_000,
        is_paused: false,
    }
);

roundtrip_and_validate!(workflow_roundtrip, CaseWorkflow, sample_workflow());

roundtrip_and_validate!(
    summary_roundtrip,
    LifecycleSummary,
    LifecycleSummary {
        id: "cas-a3f8b2c1".into(),
        title: "Lease review for warehouse unit".into(),
        workflow: sample_workflow(),
        lifecycle_state: LifecycleStatus::InReview,
        sla: SlaReport::none(),
        next_step: sample_next_action(),
        progress: sample_progress(),
        urgency_score: 225,
        dashboard_bucket: DashboardBucket::SlaRisk,
        open_queries: 0,
        meta: SummaryMeta {
            is_terminal: false,
            generated_at: Utc::now(),
        },
    }
);

roundtrip_and_validate!(
    replay_verification_roundtrip,
    ReplayVerification,
    ReplayVerification {
        case_id: "cas-a3f8b2c1".into(),
        stored: CaseStatus::CaseClosed,
        replayed: CaseStatus::CaseClosed,
        matches: true,
        events_applied: 7,
    }
);

roundtrip_and_validate!(
    failure_reason_roundtrip,
    FailureReason,
    FailureReason {
        code: "invalid_transition".into(),
        message: "Invalid status transition from submitted to in_review".into(),
        allowed_targets: vec![CaseStatus::Assigned, CaseStatus::Cancelled],
    }
);

roundtrip_and_validate!(
    query_raised_detail_roundtrip,
    QueryRaisedDetail,
    QueryRaisedDetail {
        query_id: "poq-00ff00ff".into(),
        query_preview: "Does the break clause survive assignment?".into(),
    }
);

#[test]
fn summary_uses_camel_case_keys() {
    let summary = LifecycleSummary {
        id: "cas-a3f8b2c1".into(),
        title: "t".into(),
        workflow: sample_workflow(),
        lifecycle_state: LifecycleStatus::Delivered,
        sla: SlaReport::none(),
        next_step: sample_next_action(),
        progress: sample_progress(),
        urgency_score: 0,
        dashboard_bucket: DashboardBucket::Active,
        open_queries: 2,
        meta: SummaryMeta {
            is_terminal: false,
            generated_at: Utc::now(),
        },
    };
    let json = serde_json::to_value(&summary).unwrap();
    let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "dashboardBucket",
            "id",
            "lifecycleState",
            "meta",
            "nextStep",
            "openQueries",
            "progress",
            "sla",
            "title",
            "urgencyScore",
            "workflow",
        ]
    );
    assert_eq!(json["meta"]["isTerminal"], false);
    assert_eq!(json["lifecycleState"], "delivered");
    assert_eq!(json["sla"]["status"], "none");
}

#[test]
fn new_case_defaults_visibility_and_priority() {
    let input: NewCase = serde_json::from_str(
        r#"{"title": "NDA check", "department": {"name": "Corporate", "sla_hours": 72}}"#,
    )
    .unwrap();
    assert_eq!(input.visibility, Visibility::Private);
    assert_eq!(input.priority, Priority::Medium);
}

#[test]
fn audit_details_decode_to_typed_payload() {
    let entry = AuditEntry {
        id: "aud-1b2c3d4e".into(),
        user_id: "usr-client01".into(),
        case_id: "cas-a3f8b2c1".into(),
        action: AuditAction::PostOpinionQueryRaised,
        details: Some(serde_json::json!({"query_id": "poq-1", "query_preview": "why?"})),
        created_at: Utc::now(),
    };
    let detail: QueryRaisedDetail = entry.details_as().unwrap();
    assert_eq!(detail.query_id, "poq-1");
    assert!(entry.details_as::<StatusUpdatedDetail>().is_none());
}
