//! Storage and notification abstractions.
//!
//! The engine talks to persistence only through these traits. Implementations
//! provide the backend: [`crate::memory::InMemoryStore`] for tests and
//! embedding, `lexa-db` for libSQL. All traits are object-safe and used as
//! `Arc<dyn ...>`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use lexa_core::entities::{AuditEntry, Case, Department, Notification, PostOpinionQuery};
use lexa_core::enums::{AuditAction, CaseStatus, Priority, Visibility};
use lexa_core::errors::CoreError;

/// A case about to be inserted. The store assigns the ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseDraft {
    pub title: String,
    pub visibility: Visibility,
    pub priority: Priority,
    pub client_id: String,
    pub department: Department,
    pub created_at: DateTime<Utc>,
}

/// An audit entry about to be appended. The store assigns the ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuditEntry {
    pub user_id: String,
    pub case_id: String,
    pub action: AuditAction,
    pub details: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// A compare-and-swap status update.
///
/// Applied only if the stored status still equals `expected`. Optional fields
/// left as `None` keep their stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub expected: CaseStatus,
    pub next: CaseStatus,
    pub at: DateTime<Utc>,
    pub assigned_lawyer_id: Option<String>,
    pub sla_deadline: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl StatusChange {
    #[must_use]
    pub const fn new(expected: CaseStatus, next: CaseStatus, at: DateTime<Utc>) -> Self {
        Self {
            expected,
            next,
            at,
            assigned_lawyer_id: None,
            sla_deadline: None,
            completed_at: None,
        }
    }

    #[must_use]
    pub fn with_assignment(mut self, lawyer_id: impl Into<String>, deadline: DateTime<Utc>) -> Self {
        self.assigned_lawyer_id = Some(lawyer_id.into());
        self.sla_deadline = Some(deadline);
        self
    }

    #[must_use]
    pub const fn with_completed_at(mut self, at: DateTime<Utc>) -> Self {
        self.completed_at = Some(at);
        self
    }

    /// Apply this change to an in-memory copy of the case.
    pub fn apply_to(&self, case: &mut Case) {
        case.status = self.next;
        case.updated_at = self.at;
        if let Some(lawyer) = &self.assigned_lawyer_id {
            case.assigned_lawyer_id = Some(lawyer.clone());
        }
        if let Some(deadline) = self.sla_deadline {
            case.sla_deadline = Some(deadline);
        }
        if let Some(done) = self.completed_at {
            case.completed_at = Some(done);
        }
    }
}

#[async_trait]
pub trait CaseStore: Send + Sync {
    async fn insert(&self, draft: CaseDraft) -> Result<Case, CoreError>;

    /// # Errors
    ///
    /// `CoreError::NotFound` if no case has this ID.
    async fn get_by_id(&self, id: &str) -> Result<Case, CoreError>;

    /// All cases, newest first.
    async fn list(&self) -> Result<Vec<Case>, CoreError>;

    /// Compare-and-swap the case status.
    ///
    /// # Errors
    ///
    /// `CoreError::ConcurrencyConflict` if the stored status no longer equals
    /// `change.expected`, `CoreError::NotFound` if the case does not exist.
    async fn update_status(&self, id: &str, change: &StatusChange) -> Result<Case, CoreError>;
}

#[async_trait]
pub trait AuditStore: Send + Sync {
    async fn append(&self, entry: NewAuditEntry) -> Result<AuditEntry, CoreError>;

    /// Entries for one case in append order.
    async fn list_by_case(&self, case_id: &str) -> Result<Vec<AuditEntry>, CoreError>;
}

#[async_trait]
pub trait QueryStore: Send + Sync {
    async fn create(
        &self,
        request_id: &str,
        raised_by: &str,
        query_text: &str,
        at: DateTime<Utc>,
    ) -> Result<PostOpinionQuery, CoreError>;

    /// # Errors
    ///
    /// `CoreError::NotFound` if no query has this ID.
    async fn get(&self, id: &str) -> Result<PostOpinionQuery, CoreError>;

    /// Queries for one case, oldest first.
    async fn list_by_case(&self, case_id: &str) -> Result<Vec<PostOpinionQuery>, CoreError>;

    async fn count_open(&self, case_id: &str) -> Result<u32, CoreError>;

    /// Resolve an open query.
    ///
    /// # Errors
    ///
    /// `CoreError::PreconditionFailed` if the query is already resolved,
    /// `CoreError::NotFound` if it does not exist.
    async fn mark_resolved(
        &self,
        id: &str,
        response: &str,
        responder: &str,
        at: DateTime<Utc>,
    ) -> Result<PostOpinionQuery, CoreError>;
}

/// Delivery of user-facing notifications.
///
/// Called after a transition has committed. Failures are logged by the
/// engine and never undo the transition.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: Notification) -> Result<(), CoreError>;
}
