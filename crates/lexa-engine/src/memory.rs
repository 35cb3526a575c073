//! In-memory implementation of the store traits.
//!
//! All state is held in `RwLock`-protected maps and lost on drop. Used by the
//! engine tests and by callers that want the engine without a database.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use lexa_core::entities::{AuditEntry, Case, Notification, PostOpinionQuery};
use lexa_core::enums::{CaseStatus, QueryStatus};
use lexa_core::errors::CoreError;
use lexa_core::ids::{self, PREFIX_AUDIT, PREFIX_CASE, PREFIX_QUERY};

use crate::store::{AuditStore, CaseDraft, CaseStore, NewAuditEntry, Notifier, QueryStore, StatusChange};

/// Cases, audit entries, queries, and sent notifications in one place.
#[derive(Default)]
pub struct InMemoryStore {
    cases: RwLock<HashMap<String, Case>>,
    audit: RwLock<Vec<AuditEntry>>,
    queries: RwLock<Vec<PostOpinionQuery>>,
    notifications: RwLock<Vec<Notification>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every notification delivered so far, in order.
    pub async fn notifications(&self) -> Vec<Notification> {
        self.notifications.read().await.clone()
    }

    /// Overwrite a stored case. Lets tests seed records in any state.
    pub async fn put_case(&self, case: Case) {
        self.cases.write().await.insert(case.id.clone(), case);
    }
}

#[async_trait]
impl CaseStore for InMemoryStore {
    async fn insert(&self, draft: CaseDraft) -> Result<Case, CoreError> {
        let case = Case {
            id: ids::generate(PREFIX_CASE)?,
            title: draft.title,
            status: CaseStatus::Submitted,
            visibility: draft.visibility,
            priority: draft.priority,
            client_id: draft.client_id,
            assigned_lawyer_id: None,
            department: draft.department,
            sla_deadline: None,
            completed_at: None,
            created_at: draft.created_at,
            updated_at: draft.created_at,
        };
        self.cases
            .write()
            .await
            .insert(case.id.clone(), case.clone());
        Ok(case)
    }

    async fn get_by_id(&self, id: &str) -> Result<Case, CoreError> {
        self.cases
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("case", id))
    }

    async fn list(&self) -> Result<Vec<Case>, CoreError> {
        let mut cases: Vec<Case> = self.cases.read().await.values().cloned().collect();
        cases.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(cases)
    }

    async fn update_status(&self, id: &str, change: &StatusChange) -> Result<Case, CoreError> {
        let mut cases = self.cases.write().await;
        let case = cases
            .get_mut(id)
            .ok_or_else(|| CoreError::not_found("case", id))?;
        if case.status != change.expected {
            return Err(CoreError::ConcurrencyConflict {
                case_id: id.to_string(),
                expected: change.expected,
            });
        }
        change.apply_to(case);
        Ok(case.clone())
    }
}

#[async_trait]
impl AuditStore for InMemoryStore {
    async fn append(&self, entry: NewAuditEntry) -> Result<AuditEntry, CoreError> {
        let entry = AuditEntry {
            id: ids::generate(PREFIX_AUDIT)?,
            user_id: entry.user_id,
            case_id: entry.case_id,
            action: entry.action,
            details: entry.details,
            created_at: entry.created_at,
        };
        self.audit.write().await.push(entry.clone());
        Ok(entry)
    }

    async fn list_by_case(&self, case_id: &str) -> Result<Vec<AuditEntry>, CoreError> {
        Ok(self
            .audit
            .read()
            .await
            .iter()
            .filter(|e| e.case_id == case_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl QueryStore for InMemoryStore {
    async fn create(
        &self,
        request_id: &str,
        raised_by: &str,
        query_text: &str,
        at: DateTime<Utc>,
    ) -> Result<PostOpinionQuery, CoreError> {
        let query = PostOpinionQuery {
            id: ids::generate(PREFIX_QUERY)?,
            request_id: request_id.to_string(),
            query_text: query_text.to_string(),
            raised_by: raised_by.to_string(),
            status: QueryStatus::Open,
            response_text: None,
            responded_by: None,
            responded_at: None,
            created_at: at,
        };
        self.queries.write().await.push(query.clone());
        Ok(query)
    }

    async fn get(&self, id: &str) -> Result<PostOpinionQuery, CoreError> {
        self.queries
            .read()
            .await
            .iter()
            .find(|q| q.id == id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("post_opinion_query", id))
    }

    async fn list_by_case(&self, case_id: &str) -> Result<Vec<PostOpinionQuery>, CoreError> {
        Ok(self
            .queries
            .read()
            .await
            .iter()
            .filter(|q| q.request_id == case_id)
            .cloned()
            .collect())
    }

    async fn count_open(&self, case_id: &str) -> Result<u32, CoreError> {
        let open = self
            .queries
            .read()
            .await
            .iter()
            .filter(|q| q.request_id == case_id && q.is_open())
            .count();
        u32::try_from(open).map_err(|e| CoreError::Other(e.into()))
    }

    async fn mark_resolved(
        &self,
        id: &str,
        response: &str,
        responder: &str,
        at: DateTime<Utc>,
    ) -> Result<PostOpinionQuery, CoreError> {
        let mut queries = self.queries.write().await;
        let query = queries
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or_else(|| CoreError::not_found("post_opinion_query", id))?;
        if !query.status.can_transition_to(QueryStatus::Resolved) {
            return Err(CoreError::precondition(format!(
                "query {id} is already resolved"
            )));
        }
        query.status = QueryStatus::Resolved;
        query.response_text = Some(response.to_string());
        query.responded_by = Some(responder.to_string());
        query.responded_at = Some(at);
        Ok(query.clone())
    }
}

#[async_trait]
impl Notifier for InMemoryStore {
    async fn notify(&self, notification: Notification) -> Result<(), CoreError> {
        self.notifications.write().await.push(notification);
        Ok(())
    }
}
