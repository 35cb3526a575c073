//! Legality and authorization checks for case status changes.
//!
//! The table itself lives on `CaseStatus::allowed_next_states`. This module
//! adds the actor checks and the targets the generic update may not reach.

use lexa_core::entities::{Actor, Case};
use lexa_core::enums::CaseStatus;
use lexa_core::errors::CoreError;

#[derive(Debug, Clone, Copy, Default)]
pub struct StatusTransitionValidator;

impl StatusTransitionValidator {
    /// Whether the table allows `current -> target`.
    #[must_use]
    pub fn can_transition(current: CaseStatus, target: CaseStatus) -> bool {
        current.can_transition_to(target)
    }

    /// Whether `actor_id` is the case's assigned lawyer.
    #[must_use]
    pub fn authorized_actor(case: &Case, actor_id: &str) -> bool {
        case.is_assigned_to(actor_id)
    }

    /// Table check with the full allowed set on rejection.
    ///
    /// # Errors
    ///
    /// `CoreError::InvalidTransition` when the table forbids the move.
    pub fn check(current: CaseStatus, target: CaseStatus) -> Result<(), CoreError> {
        if Self::can_transition(current, target) {
            Ok(())
        } else {
            Err(CoreError::InvalidTransition {
                from: current,
                to: target,
                allowed: current.allowed_next_states().to_vec(),
            })
        }
    }

    /// The dedicated operation that owns `target`, if the generic update may
    /// not move a case there.
    #[must_use]
    pub const fn reserved_for(target: CaseStatus) -> Option<&'static str> {
        match target {
            CaseStatus::Assigned => Some("assign_case"),
            CaseStatus::ClientAcknowledged => Some("acknowledge_opinion"),
            CaseStatus::NoFurtherQueriesConfirmed => Some("confirm_no_further_questions"),
            CaseStatus::CaseClosed => Some("close_case"),
            _ => None,
        }
    }

    /// Full guard for the generic status update: assigned lawyer, table
    /// legality, then reserved targets.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, `InvalidTransition`, or `PreconditionFailed`, in that
    /// order of precedence.
    pub fn validate_update(case: &Case, actor: &Actor, target: CaseStatus) -> Result<(), CoreError> {
        if !Self::authorized_actor(case, &actor.user_id) {
            return Err(CoreError::unauthorized(
                &actor.user_id,
                "update the status of a case not assigned to them",
            ));
        }
        Self::check(case.status, target)?;
        if let Some(operation) = Self::reserved_for(target) {
            return Err(CoreError::precondition(format!(
                "status {target} can only be reached through {operation}"
            )));
        }
        Ok(())
    }
}
