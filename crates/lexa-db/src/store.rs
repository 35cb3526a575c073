//! `LibSqlStore`: the libSQL backend for the engine's store traits.
//!
//! Repo methods live in [`crate::repos`] as `impl LibSqlStore` blocks and
//! return `DatabaseError`. The trait impls convert to `CoreError` and add the
//! not-found and conflict semantics the engine expects.

use std::path::Path;

use anyhow::Context;
use lexa_config::LexaConfig;
use lexa_engine::lifecycle::LifecycleResolver;

use crate::LexaDb;
use crate::error::DatabaseError;

pub struct LibSqlStore {
    db: LexaDb,
    lifecycle: LifecycleResolver,
}

impl LibSqlStore {
    /// Wrap an open database. Stored statuses are normalized with
    /// `lifecycle`'s legacy policy on read.
    #[must_use]
    pub const fn new(db: LexaDb, lifecycle: LifecycleResolver) -> Self {
        Self { db, lifecycle }
    }

    /// Open the database named in `config`, creating its parent directory.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the directory cannot be created or the file
    /// cannot be opened or migrated.
    pub async fn open(config: &LexaConfig) -> Result<Self, DatabaseError> {
        if !config.database.is_in_memory() {
            if let Some(parent) = Path::new(&config.database.path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("creating database directory {}", parent.display())
                    })?;
                }
            }
        }
        let db = LexaDb::open_local(&config.database.path).await?;
        Ok(Self::new(
            db,
            LifecycleResolver::new(config.lifecycle.legacy_status_policy),
        ))
    }

    #[must_use]
    pub const fn db(&self) -> &LexaDb {
        &self.db
    }

    pub(crate) const fn lifecycle(&self) -> &LifecycleResolver {
        &self.lifecycle
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use lexa_core::enums::{
        AuditAction, CaseStatus, LegacyStatusPolicy, NotificationKind, QueryStatus,
    };
    use lexa_core::entities::Notification;
    use lexa_core::errors::CoreError;
    use lexa_engine::store::{AuditStore, CaseStore, NewAuditEntry, Notifier, QueryStore, StatusChange};

    use crate::test_support::{draft, t0, test_store, test_store_with};

    #[tokio::test]
    async fn insert_and_get_roundtrip() {
        let store = test_store().await;
        let case = store.insert(draft()).await.unwrap();
        assert!(case.id.starts_with("cas-"));
        assert_eq!(store.get_by_id(&case.id).await.unwrap(), case);
    }

    #[tokio::test]
    async fn missing_case_is_not_found() {
        let store = test_store().await;
        let err = store.get_by_id("cas-00000000").await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = test_store().await;
        let older = store.insert(draft()).await.unwrap();
        let mut later = draft();
        later.created_at = t0() + Duration::hours(1);
        let newer = store.insert(later).await.unwrap();

        let ids: Vec<String> = store.list().await.unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);
    }

    #[tokio::test]
    async fn compare_and_swap_applies_once() {
        let store = test_store().await;
        let case = store.insert(draft()).await.unwrap();
        let deadline = t0() + Duration::hours(96);
        let change = StatusChange::new(CaseStatus::Submitted, CaseStatus::Assigned, t0())
            .with_assignment("usr-lawyer01", deadline);

        let updated = store.update_status(&case.id, &change).await.unwrap();
        assert_eq!(updated.status, CaseStatus::Assigned);
        assert_eq!(updated.assigned_lawyer_id.as_deref(), Some("usr-lawyer01"));
        assert_eq!(updated.sla_deadline, Some(deadline));

        let err = store.update_status(&case.id, &change).await.unwrap_err();
        assert!(matches!(err, CoreError::ConcurrencyConflict { .. }));
    }

    #[tokio::test]
    async fn swap_keeps_unset_fields() {
        let store = test_store().await;
        let case = store.insert(draft()).await.unwrap();
        let assign = StatusChange::new(CaseStatus::Submitted, CaseStatus::Assigned, t0())
            .with_assignment("usr-lawyer01", t0() + Duration::hours(96));
        store.update_status(&case.id, &assign).await.unwrap();

        let accept = StatusChange::new(CaseStatus::Assigned, CaseStatus::InReview, t0());
        let updated = store.update_status(&case.id, &accept).await.unwrap();
        assert_eq!(updated.assigned_lawyer_id.as_deref(), Some("usr-lawyer01"));
        assert!(updated.sla_deadline.is_some());
        assert_eq!(updated.completed_at, None);
    }

    #[rstest]
    #[case("claimed", CaseStatus::Assigned)]
    #[case("drafting", CaseStatus::DraftingOpinion)]
    #[case("delivered", CaseStatus::OpinionReady)]
    #[case("mystery", CaseStatus::Submitted)]
    #[tokio::test]
    async fn legacy_statuses_normalize_on_read(#[case] raw: &str, #[case] expected: CaseStatus) {
        let store = test_store().await;
        let case = store.insert(draft()).await.unwrap();
        store
            .db()
            .conn()
            .execute(
                "UPDATE cases SET status = ?1 WHERE id = ?2",
                libsql::params![raw, case.id.as_str()],
            )
            .await
            .unwrap();
        assert_eq!(store.get_by_id(&case.id).await.unwrap().status, expected);
    }

    #[tokio::test]
    async fn legacy_status_can_still_be_swapped() {
        let store = test_store().await;
        let case = store.insert(draft()).await.unwrap();
        store
            .db()
            .conn()
            .execute(
                "UPDATE cases SET status = 'claimed' WHERE id = ?1",
                [case.id.as_str()],
            )
            .await
            .unwrap();
        let accept = StatusChange::new(CaseStatus::Assigned, CaseStatus::InReview, t0());
        let updated = store.update_status(&case.id, &accept).await.unwrap();
        assert_eq!(updated.status, CaseStatus::InReview);
    }

    #[tokio::test]
    async fn strict_policy_rejects_unknown_status() {
        let store = test_store_with(LegacyStatusPolicy::Reject).await;
        let case = store.insert(draft()).await.unwrap();
        store
            .db()
            .conn()
            .execute(
                "UPDATE cases SET status = 'mystery' WHERE id = ?1",
                [case.id.as_str()],
            )
            .await
            .unwrap();
        let err = store.get_by_id(&case.id).await.unwrap_err();
        assert_eq!(err.code(), "validation");
    }

    #[tokio::test]
    async fn audit_keeps_insertion_order_on_equal_timestamps() {
        let store = test_store().await;
        let case = store.insert(draft()).await.unwrap();
        for action in [
            AuditAction::CaseSubmitted,
            AuditAction::CaseAssigned,
            AuditAction::StatusUpdated,
        ] {
            store
                .append(NewAuditEntry {
                    user_id: "usr-client01".into(),
                    case_id: case.id.clone(),
                    action,
                    details: Some(serde_json::json!({"n": action.as_str()})),
                    created_at: t0(),
                })
                .await
                .unwrap();
        }
        let entries = AuditStore::list_by_case(&store, &case.id).await.unwrap();
        let actions: Vec<AuditAction> = entries.iter().map(|e| e.action).collect();
        assert_eq!(
            actions,
            vec![
                AuditAction::CaseSubmitted,
                AuditAction::CaseAssigned,
                AuditAction::StatusUpdated
            ]
        );
        assert_eq!(
            entries[1].details,
            Some(serde_json::json!({"n": "case_assigned"}))
        );
    }

    #[tokio::test]
    async fn audit_for_unknown_case_is_storage_error() {
        let store = test_store().await;
        let err = store
            .append(NewAuditEntry {
                user_id: "u".into(),
                case_id: "cas-ffffffff".into(),
                action: AuditAction::CaseSubmitted,
                details: None,
                created_at: t0(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "storage");
    }

    #[tokio::test]
    async fn query_lifecycle() {
        let store = test_store().await;
        let case = store.insert(draft()).await.unwrap();
        let query = store
            .create(&case.id, "usr-client01", "Can we appeal?", t0())
            .await
            .unwrap();
        assert!(query.id.starts_with("poq-"));
        assert_eq!(store.count_open(&case.id).await.unwrap(), 1);

        let at = t0() + Duration::minutes(30);
        let resolved = store
            .mark_resolved(&query.id, "Within 30 days.", "usr-lawyer01", at)
            .await
            .unwrap();
        assert_eq!(resolved.status, QueryStatus::Resolved);
        assert_eq!(resolved.responded_at, Some(at));
        assert_eq!(store.count_open(&case.id).await.unwrap(), 0);

        let err = store
            .mark_resolved(&query.id, "again", "usr-lawyer01", at)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::PreconditionFailed { .. }));

        let err = store
            .mark_resolved("poq-00000000", "x", "usr-lawyer01", at)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));

        let listed = QueryStore::list_by_case(&store, &case.id).await.unwrap();
        assert_eq!(listed, vec![resolved]);
    }

    #[tokio::test]
    async fn notifications_are_queued() {
        let store = test_store().await;
        let case = store.insert(draft()).await.unwrap();
        store
            .notify(Notification {
                user_id: "usr-lawyer01".into(),
                kind: NotificationKind::CaseAssigned,
                message: "You have been assigned".into(),
                case_id: case.id.clone(),
            })
            .await
            .unwrap();
        let queued = store.notifications_for("usr-lawyer01").await.unwrap();
        assert_eq!(queued.len(), 1);
        assert_eq!(queued[0].kind, NotificationKind::CaseAssigned);
    }
}
