//! `CaseEngine`: every case operation, wired to the stores.
//!
//! Each mutating operation follows the same protocol:
//! 1. Load the case and its derived state
//! 2. Run the guard (actor, status, preconditions)
//! 3. Compare-and-swap the status in the `CaseStore` (if it changes)
//! 4. Append exactly one audit entry
//! 5. Notify, logging and swallowing notifier failures
//!
//! No step is retried. A `ConcurrencyConflict` from step 3 means nothing was
//! written.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use lexa_config::LexaConfig;
use lexa_core::audit_detail::{
    preview, CaseAssignedDetail, CaseSubmittedDetail, ClarificationRequestedDetail,
    ClarificationRespondedDetail, ClosureStepDetail, DocumentsDetail, QueryRaisedDetail,
    QueryResolvedDetail, RequestRejectedDetail, SlaPausedDetail, StatusUpdatedDetail,
};
use lexa_core::entities::{
    Actor, AuditEntry, Case, Department, NewCase, Notification, PostOpinionQuery,
};
use lexa_core::enums::{ActorRole, AuditAction, CaseStatus, NotificationKind, Visibility};
use lexa_core::errors::CoreError;
use lexa_core::projections::{CaseWorkflow, SlaReport};
use lexa_core::responses::{LifecycleSummary, ReplayVerification};

use crate::audit::{AuditLog, Replay};
use crate::clock::{Clock, SystemClock};
use crate::lifecycle::LifecycleResolver;
use crate::post_opinion::PostOpinionQueryWorkflow;
use crate::sla::SlaCalculator;
use crate::store::{AuditStore, CaseDraft, CaseStore, NewAuditEntry, Notifier, QueryStore, StatusChange};
use crate::transition::StatusTransitionValidator;
use crate::workflow::CaseWorkflowResolver;

/// Tunables taken from configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineSettings {
    pub sla: SlaCalculator,
    pub lifecycle: LifecycleResolver,
}

impl From<&LexaConfig> for EngineSettings {
    fn from(config: &LexaConfig) -> Self {
        Self {
            sla: SlaCalculator::new(config.sla.warning_days),
            lifecycle: LifecycleResolver::new(config.lifecycle.legacy_status_policy),
        }
    }
}

/// The collaborators the engine writes through.
#[derive(Clone)]
pub struct Stores {
    pub cases: Arc<dyn CaseStore>,
    pub audit: Arc<dyn AuditStore>,
    pub queries: Arc<dyn QueryStore>,
    pub notifier: Arc<dyn Notifier>,
}

impl Stores {
    /// Use one value for every role.
    pub fn single<S>(store: Arc<S>) -> Self
    where
        S: CaseStore + AuditStore + QueryStore + Notifier + 'static,
    {
        Self {
            cases: store.clone(),
            audit: store.clone(),
            queries: store.clone(),
            notifier: store,
        }
    }
}

pub struct CaseEngine {
    stores: Stores,
    clock: Arc<dyn Clock>,
    workflow: CaseWorkflowResolver,
    settings: EngineSettings,
}

impl CaseEngine {
    pub fn new(stores: Stores, settings: EngineSettings) -> Self {
        Self::with_clock(stores, settings, Arc::new(SystemClock))
    }

    pub fn with_clock(stores: Stores, settings: EngineSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            stores,
            clock,
            workflow: CaseWorkflowResolver::new(settings.sla, settings.lifecycle),
            settings,
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    // ------ Submission and assignment ------

    /// Submit a new request as its client.
    ///
    /// # Errors
    ///
    /// `Unauthorized` for non-clients, `Validation` for an empty title or a
    /// non-positive SLA budget.
    pub async fn create_case(&self, actor: &Actor, input: NewCase) -> Result<Case, CoreError> {
        if actor.role != ActorRole::Client {
            return Err(CoreError::unauthorized(&actor.user_id, "submit a legal request"));
        }
        if input.title.trim().is_empty() {
            return Err(CoreError::Validation("title must not be empty".into()));
        }
        if input.department.sla_hours <= 0 {
            return Err(CoreError::Validation(format!(
                "department {} must have a positive SLA, got {} hours",
                input.department.name, input.department.sla_hours
            )));
        }

        let now = self.clock.now();
        sla_deadline(now, &input.department)?;
        let detail = CaseSubmittedDetail {
            title: input.title.clone(),
            department: input.department.name.clone(),
        };
        let case = self
            .stores
            .cases
            .insert(CaseDraft {
                title: input.title,
                visibility: input.visibility,
                priority: input.priority,
                client_id: actor.user_id.clone(),
                department: input.department,
                created_at: now,
            })
            .await?;

        self.record(actor, &case.id, AuditAction::CaseSubmitted, &detail, now)
            .await?;
        tracing::debug!(case_id = %case.id, "case submitted");
        Ok(case)
    }

    /// Route a submitted case to a lawyer and start its SLA clock.
    ///
    /// Firms, banks, and admins may assign anyone. A lawyer may claim a
    /// public case for themselves.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, `InvalidTransition` unless `submitted`,
    /// `ConcurrencyConflict` if another assignment won.
    pub async fn assign_case(&self, actor: &Actor, case_id: &str, lawyer_id: &str) -> Result<Case, CoreError> {
        let case = self.stores.cases.get_by_id(case_id).await?;

        let claiming = actor.role == ActorRole::Lawyer
            && actor.user_id == lawyer_id
            && case.visibility == Visibility::Public;
        if !actor.role.can_assign() && !claiming {
            return Err(CoreError::unauthorized(&actor.user_id, "assign this case"));
        }
        StatusTransitionValidator::check(case.status, CaseStatus::Assigned)?;

        let now = self.clock.now();
        let deadline = sla_deadline(case.created_at, &case.department)?;

        let change = StatusChange::new(case.status, CaseStatus::Assigned, now)
            .with_assignment(lawyer_id, deadline);
        let updated = self.stores.cases.update_status(case_id, &change).await?;

        let detail = CaseAssignedDetail {
            assignee_id: lawyer_id.to_string(),
            assigned_by: actor.role,
        };
        self.record(actor, case_id, AuditAction::CaseAssigned, &detail, now)
            .await?;
        tracing::debug!(case_id, lawyer_id, "case assigned");

        self.notify(lawyer_id, NotificationKind::CaseAssigned, &updated, format!(
            "You have been assigned: {}",
            updated.title
        ))
        .await;
        Ok(updated)
    }

    // ------ Generic status update ------

    /// Move the case along the transition table as its assigned lawyer.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, `InvalidTransition`, `PreconditionFailed` for targets
    /// owned by a dedicated operation, `ConcurrencyConflict`.
    pub async fn update_status(
        &self,
        actor: &Actor,
        case_id: &str,
        target: CaseStatus,
        notes: Option<String>,
    ) -> Result<Case, CoreError> {
        let case = self.stores.cases.get_by_id(case_id).await?;
        StatusTransitionValidator::validate_update(&case, actor, target)?;

        let now = self.clock.now();
        let mut change = StatusChange::new(case.status, target, now);
        if target == CaseStatus::Completed {
            change = change.with_completed_at(now);
        }
        let updated = self.stores.cases.update_status(case_id, &change).await?;

        let detail = StatusUpdatedDetail {
            from: case.status,
            to: target,
            notes,
        };
        self.record(actor, case_id, AuditAction::StatusUpdated, &detail, now)
            .await?;
        tracing::debug!(case_id, from = %case.status, to = %target, "status updated");

        let message = format!("Your case status changed to {target}");
        self.notify(&updated.client_id, NotificationKind::StatusUpdated, &updated, message)
            .await;
        Ok(updated)
    }

    /// Accept an assigned case: `assigned` -> `in_review`.
    ///
    /// # Errors
    ///
    /// `PreconditionFailed` unless the case is awaiting acceptance and has
    /// not been declined, plus everything [`CaseEngine::update_status`]
    /// returns.
    pub async fn accept_case(&self, actor: &Actor, case_id: &str) -> Result<Case, CoreError> {
        let case = self.stores.cases.get_by_id(case_id).await?;
        Self::require_awaiting_acceptance(&case)?;
        if self.log(case_id).await?.declined() {
            return Err(CoreError::precondition("the assigned lawyer declined this case"));
        }
        self.update_status(actor, case_id, CaseStatus::InReview, Some("accepted".into()))
            .await
    }

    /// Decline an assigned case as its lawyer. The status stays `assigned`;
    /// the decline is recorded and blocks a later accept until the case is
    /// reassigned.
    ///
    /// # Errors
    ///
    /// `Unauthorized` unless the assigned lawyer, `PreconditionFailed` unless
    /// awaiting acceptance or if already declined.
    pub async fn reject_case(&self, actor: &Actor, case_id: &str, note: Option<String>) -> Result<AuditEntry, CoreError> {
        let case = self.stores.cases.get_by_id(case_id).await?;
        Self::require_assigned_lawyer(actor, &case, "decline")?;
        Self::require_awaiting_acceptance(&case)?;
        if self.log(case_id).await?.declined() {
            return Err(CoreError::precondition("case has already been declined"));
        }

        let now = self.clock.now();
        let entry = self
            .record(actor, case_id, AuditAction::RequestRejected, &RequestRejectedDetail { note }, now)
            .await?;
        tracing::debug!(case_id, "case declined");

        self.notify(&case.client_id, NotificationKind::RequestRejected, &case, format!(
            "Your request \"{}\" was declined by the lawyer",
            case.title
        ))
        .await;
        Ok(entry)
    }

    // ------ Documents round trip ------

    /// Ask the client for documents: `in_review` -> `documents_pending`.
    ///
    /// # Errors
    ///
    /// `Unauthorized` unless the assigned lawyer, `InvalidTransition` unless
    /// `in_review`, `ConcurrencyConflict`.
    pub async fn request_documents(&self, actor: &Actor, case_id: &str, message: Option<String>) -> Result<Case, CoreError> {
        let case = self.stores.cases.get_by_id(case_id).await?;
        Self::require_assigned_lawyer(actor, &case, "request documents")?;

        let notice = match message.as_deref() {
            Some(text) => format!("Your lawyer requested documents for {}: {text}", case.title),
            None => format!("Your lawyer requested documents for {}", case.title),
        };
        let updated = self
            .documents_step(actor, &case, CaseStatus::DocumentsPending, AuditAction::DocumentsRequested, message)
            .await?;

        self.notify(&updated.client_id, NotificationKind::DocumentsRequested, &updated, notice)
            .await;
        Ok(updated)
    }

    /// Report the requested documents as uploaded, returning the case to
    /// review: `documents_pending` -> `in_review`.
    ///
    /// # Errors
    ///
    /// `Unauthorized` unless the case's client, `PreconditionFailed` unless
    /// documents are pending, `ConcurrencyConflict`.
    pub async fn documents_uploaded(&self, actor: &Actor, case_id: &str) -> Result<Case, CoreError> {
        let case = self.stores.cases.get_by_id(case_id).await?;
        if actor.role != ActorRole::Client || actor.user_id != case.client_id {
            return Err(CoreError::unauthorized(&actor.user_id, "upload documents"));
        }
        if case.status != CaseStatus::DocumentsPending {
            return Err(CoreError::precondition(format!(
                "case is not waiting for documents (status is {})",
                case.status
            )));
        }

        let updated = self
            .documents_step(actor, &case, CaseStatus::InReview, AuditAction::DocumentsUploaded, None)
            .await?;

        if let Some(lawyer) = updated.assigned_lawyer_id.as_deref() {
            self.notify(lawyer, NotificationKind::DocumentsUploaded, &updated, format!(
                "The client uploaded the requested documents for {}",
                updated.title
            ))
            .await;
        }
        Ok(updated)
    }

    // ------ Clarifications and SLA pauses ------

    /// Ask the client for more information. Pauses the SLA until answered.
    ///
    /// # Errors
    ///
    /// `Unauthorized` unless the assigned lawyer, `PreconditionFailed` on a
    /// terminal case, `Validation` for an empty subject.
    pub async fn request_clarification(&self, actor: &Actor, case_id: &str, subject: &str) -> Result<AuditEntry, CoreError> {
        let case = self.stores.cases.get_by_id(case_id).await?;
        Self::require_assigned_lawyer(actor, &case, "request clarification")?;
        Self::require_open(&case)?;
        if subject.trim().is_empty() {
            return Err(CoreError::Validation("clarification subject must not be empty".into()));
        }

        let now = self.clock.now();
        let detail = ClarificationRequestedDetail {
            subject: subject.to_string(),
        };
        let entry = self
            .record(actor, case_id, AuditAction::ClarificationRequested, &detail, now)
            .await?;

        self.notify(&case.client_id, NotificationKind::ClarificationRequested, &case, format!(
            "Your lawyer needs more information: {subject}"
        ))
        .await;
        Ok(entry)
    }

    /// Answer an outstanding clarification as the client.
    ///
    /// # Errors
    ///
    /// `Unauthorized` unless the case's client, `PreconditionFailed` with no
    /// outstanding request, `Validation` for an empty response.
    pub async fn respond_to_clarification(&self, actor: &Actor, case_id: &str, response: &str) -> Result<AuditEntry, CoreError> {
        let case = self.stores.cases.get_by_id(case_id).await?;
        if actor.role != ActorRole::Client || actor.user_id != case.client_id {
            return Err(CoreError::unauthorized(&actor.user_id, "respond to a clarification"));
        }
        Self::require_open(&case)?;
        if response.trim().is_empty() {
            return Err(CoreError::Validation("clarification response must not be empty".into()));
        }
        let log = self.log(case_id).await?;
        if log.open_clarifications() == 0 {
            return Err(CoreError::precondition("no clarification is outstanding on this case"));
        }

        let now = self.clock.now();
        let detail = ClarificationRespondedDetail {
            response_preview: preview(response),
        };
        let entry = self
            .record(actor, case_id, AuditAction::ClarificationResponded, &detail, now)
            .await?;

        if let Some(lawyer) = case.assigned_lawyer_id.as_deref() {
            self.notify(lawyer, NotificationKind::ClarificationResponded, &case, format!(
                "The client responded to your clarification on {}",
                case.title
            ))
            .await;
        }
        Ok(entry)
    }

    /// Stop the SLA clock.
    ///
    /// # Errors
    ///
    /// `Unauthorized` unless the assigned lawyer, `PreconditionFailed` if
    /// already paused or the case is terminal.
    pub async fn pause_sla(&self, actor: &Actor, case_id: &str, reason: &str) -> Result<AuditEntry, CoreError> {
        let case = self.stores.cases.get_by_id(case_id).await?;
        Self::require_assigned_lawyer(actor, &case, "pause the SLA")?;
        Self::require_open(&case)?;
        if self.log(case_id).await?.sla_paused() {
            return Err(CoreError::precondition("SLA is already paused"));
        }

        let detail = SlaPausedDetail {
            reason: reason.to_string(),
        };
        let now = self.clock.now();
        let entry = self
            .record(actor, case_id, AuditAction::SlaPaused, &detail, now)
            .await?;
        tracing::debug!(case_id, reason, "SLA paused");
        Ok(entry)
    }

    /// Restart the SLA clock after [`CaseEngine::pause_sla`].
    ///
    /// # Errors
    ///
    /// `Unauthorized` unless the assigned lawyer, `PreconditionFailed` if not
    /// paused.
    pub async fn resume_sla(&self, actor: &Actor, case_id: &str) -> Result<AuditEntry, CoreError> {
        let case = self.stores.cases.get_by_id(case_id).await?;
        Self::require_assigned_lawyer(actor, &case, "resume the SLA")?;
        if !self.log(case_id).await?.sla_paused() {
            return Err(CoreError::precondition("SLA is not paused"));
        }

        let now = self.clock.now();
        let entry = self
            .record(actor, case_id, AuditAction::SlaResumed, &serde_json::json!({}), now)
            .await?;
        tracing::debug!(case_id, "SLA resumed");
        Ok(entry)
    }

    // ------ Post-opinion closure protocol ------

    /// # Errors
    ///
    /// See [`PostOpinionQueryWorkflow::check_acknowledge`], plus
    /// `ConcurrencyConflict`.
    pub async fn acknowledge_opinion(&self, actor: &Actor, case_id: &str) -> Result<Case, CoreError> {
        let case = self.stores.cases.get_by_id(case_id).await?;
        PostOpinionQueryWorkflow::check_acknowledge(actor, &case)?;
        self.closure_step(actor, &case, CaseStatus::ClientAcknowledged, AuditAction::ClientAcknowledgedOpinion)
            .await
    }

    /// # Errors
    ///
    /// See [`PostOpinionQueryWorkflow::check_submit_query`].
    pub async fn submit_query(&self, actor: &Actor, case_id: &str, text: &str) -> Result<PostOpinionQuery, CoreError> {
        let case = self.stores.cases.get_by_id(case_id).await?;
        PostOpinionQueryWorkflow::check_submit_query(actor, &case, text)?;

        let now = self.clock.now();
        let query = self
            .stores
            .queries
            .create(case_id, &actor.user_id, text, now)
            .await?;
        let detail = QueryRaisedDetail {
            query_id: query.id.clone(),
            query_preview: preview(text),
        };
        self.record(actor, case_id, AuditAction::PostOpinionQueryRaised, &detail, now)
            .await?;

        if let Some(lawyer) = case.assigned_lawyer_id.as_deref() {
            self.notify(lawyer, NotificationKind::ClientUpdate, &case, format!(
                "New question on {}: {}",
                case.title,
                preview(text)
            ))
            .await;
        }
        Ok(query)
    }

    /// # Errors
    ///
    /// See [`PostOpinionQueryWorkflow::check_resolve`].
    pub async fn resolve_query(&self, actor: &Actor, query_id: &str, response: &str) -> Result<PostOpinionQuery, CoreError> {
        let query = self.stores.queries.get(query_id).await?;
        let case = self.stores.cases.get_by_id(&query.request_id).await?;
        PostOpinionQueryWorkflow::check_resolve(actor, &case, &query, response)?;

        let now = self.clock.now();
        let resolved = self
            .stores
            .queries
            .mark_resolved(query_id, response, &actor.user_id, now)
            .await?;
        let detail = QueryResolvedDetail {
            query_id: query_id.to_string(),
            response_preview: preview(response),
        };
        self.record(actor, &case.id, AuditAction::PostOpinionQueryResolved, &detail, now)
            .await?;

        self.notify(&case.client_id, NotificationKind::ClientUpdate, &case, format!(
            "Your question on {} was answered",
            case.title
        ))
        .await;
        Ok(resolved)
    }

    /// # Errors
    ///
    /// See [`PostOpinionQueryWorkflow::check_confirm`], plus
    /// `ConcurrencyConflict`.
    pub async fn confirm_no_further_questions(&self, actor: &Actor, case_id: &str) -> Result<Case, CoreError> {
        let case = self.stores.cases.get_by_id(case_id).await?;
        let open = self.stores.queries.count_open(case_id).await?;
        PostOpinionQueryWorkflow::check_confirm(actor, &case, open)?;

        let updated = self
            .closure_step(
                actor,
                &case,
                CaseStatus::NoFurtherQueriesConfirmed,
                AuditAction::ClientConfirmedNoQuestions,
            )
            .await?;

        if let Some(lawyer) = updated.assigned_lawyer_id.as_deref() {
            self.notify(lawyer, NotificationKind::ClientUpdate, &updated, format!(
                "Client confirmed no further questions on {}. You can close the case.",
                updated.title
            ))
            .await;
        }
        Ok(updated)
    }

    /// # Errors
    ///
    /// See [`PostOpinionQueryWorkflow::check_close`], plus
    /// `ConcurrencyConflict`.
    pub async fn close_case(&self, actor: &Actor, case_id: &str) -> Result<Case, CoreError> {
        let case = self.stores.cases.get_by_id(case_id).await?;
        let open = self.stores.queries.count_open(case_id).await?;
        PostOpinionQueryWorkflow::check_close(actor, &case, open)?;

        let updated = self
            .closure_step(actor, &case, CaseStatus::CaseClosed, AuditAction::CaseClosed)
            .await?;

        self.notify(&updated.client_id, NotificationKind::StatusUpdated, &updated, format!(
            "{} has been closed",
            updated.title
        ))
        .await;
        Ok(updated)
    }

    // ------ Reads ------

    /// # Errors
    ///
    /// `NotFound` or `Storage`.
    pub async fn get_case(&self, case_id: &str) -> Result<Case, CoreError> {
        self.stores.cases.get_by_id(case_id).await
    }

    /// # Errors
    ///
    /// `Storage`.
    pub async fn list_cases(&self) -> Result<Vec<Case>, CoreError> {
        self.stores.cases.list().await
    }

    /// # Errors
    ///
    /// `Storage`.
    pub async fn list_queries(&self, case_id: &str) -> Result<Vec<PostOpinionQuery>, CoreError> {
        self.stores.queries.list_by_case(case_id).await
    }

    /// Audit entries for a case in time order.
    ///
    /// # Errors
    ///
    /// `NotFound` if the case does not exist, `Storage`.
    pub async fn audit_trail(&self, case_id: &str) -> Result<Vec<AuditEntry>, CoreError> {
        self.stores.cases.get_by_id(case_id).await?;
        Ok(self.log(case_id).await?.into_entries())
    }

    /// # Errors
    ///
    /// `NotFound`, `Storage`, or `Validation` from the calculator.
    pub async fn sla_report(&self, case_id: &str) -> Result<SlaReport, CoreError> {
        let case = self.stores.cases.get_by_id(case_id).await?;
        let log = self.log(case_id).await?;
        self.settings.sla.calculate(&case, &log, self.clock.now())
    }

    /// # Errors
    ///
    /// `NotFound` or `Storage`. Derived parts degrade instead of failing.
    pub async fn case_workflow(&self, case_id: &str) -> Result<CaseWorkflow, CoreError> {
        let case = self.stores.cases.get_by_id(case_id).await?;
        let log = self.log(case_id).await?;
        let queries = self.stores.queries.list_by_case(case_id).await?;
        Ok(self.workflow.resolve(&case, &log, &queries, self.clock.now()))
    }

    /// # Errors
    ///
    /// `NotFound` or `Storage`. Derived parts degrade instead of failing.
    pub async fn case_summary(&self, case_id: &str) -> Result<LifecycleSummary, CoreError> {
        let case = self.stores.cases.get_by_id(case_id).await?;
        let log = self.log(case_id).await?;
        let queries = self.stores.queries.list_by_case(case_id).await?;
        Ok(self.workflow.summary(&case, &log, &queries, self.clock.now()))
    }

    /// # Errors
    ///
    /// `NotFound`, `Storage`, or `Validation` for a log that does not replay.
    pub async fn replay_status(&self, case_id: &str) -> Result<Replay, CoreError> {
        self.stores.cases.get_by_id(case_id).await?;
        self.log(case_id).await?.replay()
    }

    /// Compare the stored status with the one rebuilt from the audit log.
    ///
    /// # Errors
    ///
    /// Same as [`CaseEngine::replay_status`].
    pub async fn verify_replay(&self, case_id: &str) -> Result<ReplayVerification, CoreError> {
        let case = self.stores.cases.get_by_id(case_id).await?;
        let replay = self.log(case_id).await?.replay()?;
        let matches = replay.status == case.status;
        if !matches {
            tracing::warn!(case_id, stored = %case.status, replayed = %replay.status, "audit replay mismatch");
        }
        Ok(ReplayVerification {
            case_id: case.id,
            stored: case.status,
            replayed: replay.status,
            matches,
            events_applied: replay.events_applied,
        })
    }

    // ------ Internals ------

    async fn log(&self, case_id: &str) -> Result<AuditLog, CoreError> {
        Ok(AuditLog::new(self.stores.audit.list_by_case(case_id).await?))
    }

    async fn closure_step(
        &self,
        actor: &Actor,
        case: &Case,
        target: CaseStatus,
        action: AuditAction,
    ) -> Result<Case, CoreError> {
        StatusTransitionValidator::check(case.status, target)?;
        let now = self.clock.now();
        let mut change = StatusChange::new(case.status, target, now);
        if target == CaseStatus::CaseClosed {
            change = change.with_completed_at(now);
        }
        let updated = self.stores.cases.update_status(&case.id, &change).await?;

        let detail = ClosureStepDetail {
            from: case.status,
            to: target,
        };
        self.record(actor, &case.id, action, &detail, now).await?;
        tracing::debug!(case_id = %case.id, from = %case.status, to = %target, "closure step");
        Ok(updated)
    }

    async fn documents_step(
        &self,
        actor: &Actor,
        case: &Case,
        target: CaseStatus,
        action: AuditAction,
        message: Option<String>,
    ) -> Result<Case, CoreError> {
        StatusTransitionValidator::check(case.status, target)?;
        let now = self.clock.now();
        let change = StatusChange::new(case.status, target, now);
        let updated = self.stores.cases.update_status(&case.id, &change).await?;

        let detail = DocumentsDetail {
            from: case.status,
            to: target,
            message,
        };
        self.record(actor, &case.id, action, &detail, now).await?;
        tracing::debug!(case_id = %case.id, from = %case.status, to = %target, "documents step");
        Ok(updated)
    }

    async fn record<T: Serialize + Sync>(
        &self,
        actor: &Actor,
        case_id: &str,
        action: AuditAction,
        detail: &T,
        at: DateTime<Utc>,
    ) -> Result<AuditEntry, CoreError> {
        let details = serde_json::to_value(detail).map_err(|e| CoreError::Other(e.into()))?;
        self.stores
            .audit
            .append(NewAuditEntry {
                user_id: actor.user_id.clone(),
                case_id: case_id.to_string(),
                action,
                details: Some(details),
                created_at: at,
            })
            .await
    }

    async fn notify(&self, user_id: &str, kind: NotificationKind, case: &Case, message: String) {
        let notification = Notification {
            user_id: user_id.to_string(),
            kind,
            message,
            case_id: case.id.clone(),
        };
        if let Err(error) = self.stores.notifier.notify(notification).await {
            tracing::warn!(case_id = %case.id, %kind, %error, "notification failed");
        }
    }

    fn require_assigned_lawyer(actor: &Actor, case: &Case, action: &str) -> Result<(), CoreError> {
        if StatusTransitionValidator::authorized_actor(case, &actor.user_id) {
            Ok(())
        } else {
            Err(CoreError::unauthorized(
                &actor.user_id,
                &format!("{action} on a case not assigned to them"),
            ))
        }
    }

    fn require_awaiting_acceptance(case: &Case) -> Result<(), CoreError> {
        if case.status == CaseStatus::Assigned {
            Ok(())
        } else {
            Err(CoreError::precondition(format!(
                "case is not awaiting acceptance (status is {})",
                case.status
            )))
        }
    }

    fn require_open(case: &Case) -> Result<(), CoreError> {
        if case.status.is_terminal() {
            Err(CoreError::precondition(format!(
                "case {} is {} and can no longer change",
                case.id, case.status
            )))
        } else {
            Ok(())
        }
    }
}

/// `from` plus the department's SLA budget.
fn sla_deadline(from: DateTime<Utc>, department: &Department) -> Result<DateTime<Utc>, CoreError> {
    TimeDelta::try_hours(department.sla_hours)
        .and_then(|budget| from.checked_add_signed(budget))
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "department {} SLA of {} hours is out of range",
                department.name, department.sla_hours
            ))
        })
}
