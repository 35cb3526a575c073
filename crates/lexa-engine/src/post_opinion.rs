//! Guards for the closure protocol that runs after the opinion is ready.
//!
//! ```text
//! opinion_ready --acknowledge--> client_acknowledged
//!     (queries raised and resolved while here)
//! client_acknowledged --confirm (0 open)--> no_further_queries_confirmed
//! no_further_queries_confirmed --close (0 open)--> case_closed
//! ```
//!
//! Each guard is pure. `CaseEngine` runs it, then performs the store calls.

use lexa_core::entities::{Actor, Case, PostOpinionQuery};
use lexa_core::enums::{ActorRole, CaseStatus};
use lexa_core::errors::CoreError;

#[derive(Debug, Clone, Copy, Default)]
pub struct PostOpinionQueryWorkflow;

impl PostOpinionQueryWorkflow {
    fn require_client(actor: &Actor, case: &Case, action: &str) -> Result<(), CoreError> {
        if actor.role == ActorRole::Client && actor.user_id == case.client_id {
            Ok(())
        } else {
            Err(CoreError::unauthorized(&actor.user_id, action))
        }
    }

    fn require_lawyer(actor: &Actor, case: &Case, action: &str) -> Result<(), CoreError> {
        if case.is_assigned_to(&actor.user_id) {
            Ok(())
        } else {
            Err(CoreError::unauthorized(&actor.user_id, action))
        }
    }

    fn require_no_open(open_queries: u32) -> Result<(), CoreError> {
        if open_queries == 0 {
            Ok(())
        } else {
            Err(CoreError::precondition(format!(
                "You have {open_queries} open queries. Please wait for the lawyer to resolve them."
            )))
        }
    }

    /// # Errors
    ///
    /// `Unauthorized` unless the case's client; `PreconditionFailed` unless
    /// the opinion is ready.
    pub fn check_acknowledge(actor: &Actor, case: &Case) -> Result<(), CoreError> {
        Self::require_client(actor, case, "acknowledge the opinion")?;
        if case.status != CaseStatus::OpinionReady {
            return Err(CoreError::precondition(format!(
                "opinion can only be acknowledged when it is ready (status is {})",
                case.status
            )));
        }
        Ok(())
    }

    /// # Errors
    ///
    /// `Unauthorized` unless the case's client; `Validation` for empty text;
    /// `PreconditionFailed` with a status-specific reason otherwise.
    pub fn check_submit_query(actor: &Actor, case: &Case, text: &str) -> Result<(), CoreError> {
        Self::require_client(actor, case, "raise a post-opinion query")?;
        if text.trim().is_empty() {
            return Err(CoreError::Validation("query text must not be empty".into()));
        }
        match case.status {
            CaseStatus::ClientAcknowledged => Ok(()),
            CaseStatus::CaseClosed => Err(CoreError::precondition(
                "case is closed; no further queries can be raised",
            )),
            CaseStatus::NoFurtherQueriesConfirmed => Err(CoreError::precondition(
                "no further queries were confirmed; the case is awaiting closure",
            )),
            other => Err(CoreError::precondition(format!(
                "queries can only be raised after acknowledging the opinion (status is {other})"
            ))),
        }
    }

    /// # Errors
    ///
    /// `PreconditionFailed` if the case is closed or the query already
    /// resolved; `Unauthorized` unless the assigned lawyer; `Validation` for
    /// an empty response.
    pub fn check_resolve(
        actor: &Actor,
        case: &Case,
        query: &PostOpinionQuery,
        response: &str,
    ) -> Result<(), CoreError> {
        if case.status == CaseStatus::CaseClosed {
            return Err(CoreError::precondition(
                "case is closed; queries can no longer be resolved",
            ));
        }
        Self::require_lawyer(actor, case, "resolve a query on a case not assigned to them")?;
        if !query.is_open() {
            return Err(CoreError::precondition(format!(
                "query {} is already resolved",
                query.id
            )));
        }
        if response.trim().is_empty() {
            return Err(CoreError::Validation("response text must not be empty".into()));
        }
        Ok(())
    }

    /// # Errors
    ///
    /// `Unauthorized` unless the case's client; `PreconditionFailed` unless
    /// acknowledged with zero open queries (the message carries the count).
    pub fn check_confirm(actor: &Actor, case: &Case, open_queries: u32) -> Result<(), CoreError> {
        Self::require_client(actor, case, "confirm no further questions")?;
        if case.status != CaseStatus::ClientAcknowledged {
            return Err(CoreError::precondition(format!(
                "the opinion must be acknowledged first (status is {})",
                case.status
            )));
        }
        Self::require_no_open(open_queries)
    }

    /// # Errors
    ///
    /// `Unauthorized` unless the assigned lawyer; `PreconditionFailed` unless
    /// the client confirmed no further questions and no query is open.
    pub fn check_close(actor: &Actor, case: &Case, open_queries: u32) -> Result<(), CoreError> {
        Self::require_lawyer(actor, case, "close a case not assigned to them")?;
        if case.status != CaseStatus::NoFurtherQueriesConfirmed {
            return Err(CoreError::precondition(format!(
                "case can only be closed after the client confirms no further questions (status is {})",
                case.status
            )));
        }
        Self::require_no_open(open_queries)
    }
}
