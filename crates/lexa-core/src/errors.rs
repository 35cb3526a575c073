//! Cross-cutting error types for Lexa.
//!
//! `CoreError` is what every engine operation returns. Storage-specific errors
//! (e.g. `DatabaseError`) live in their own crates and convert into
//! `CoreError::Storage` at the trait boundary. `FailureReason` is the
//! structured, user-visible form of an error.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::CaseStatus;

/// Errors that can be raised by any Lexa crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity} {id}")]
    NotFound { entity: String, id: String },

    /// The actor is not allowed to perform the action on this case.
    #[error("Unauthorized: {actor} may not {action}")]
    Unauthorized { actor: String, action: String },

    /// The target status is not reachable from the current status.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        from: CaseStatus,
        to: CaseStatus,
        allowed: Vec<CaseStatus>,
    },

    /// A workflow guard other than the transition table rejected the call.
    #[error("Precondition failed: {reason}")]
    PreconditionFailed { reason: String },

    /// Another writer changed the case status first.
    #[error("Concurrency conflict on case {case_id}: status is no longer {expected}")]
    ConcurrencyConflict {
        case_id: String,
        expected: CaseStatus,
    },

    /// Data failed validation (format, constraints, unknown values).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The backing store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    pub fn not_found(entity: &str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            id: id.into(),
        }
    }

    pub fn unauthorized(actor: impl Into<String>, action: &str) -> Self {
        Self::Unauthorized {
            actor: actor.into(),
            action: action.to_string(),
        }
    }

    pub fn precondition(reason: impl Into<String>) -> Self {
        Self::PreconditionFailed {
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Unauthorized { .. } => "unauthorized",
            Self::InvalidTransition { .. } => "invalid_transition",
            Self::PreconditionFailed { .. } => "precondition_failed",
            Self::ConcurrencyConflict { .. } => "concurrency_conflict",
            Self::Validation(_) => "validation",
            Self::Storage(_) => "storage",
            Self::Other(_) => "internal",
        }
    }

    /// Structured form suitable for returning to a caller.
    #[must_use]
    pub fn reason(&self) -> FailureReason {
        let allowed_targets = match self {
            Self::InvalidTransition { allowed, .. } => allowed.clone(),
            _ => Vec::new(),
        };
        FailureReason {
            code: self.code().to_string(),
            message: self.to_string(),
            allowed_targets,
        }
    }
}

/// A rejected operation as reported to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FailureReason {
    pub code: String,
    pub message: String,
    /// Populated for invalid transitions: every status reachable from the
    /// current one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_targets: Vec<CaseStatus>,
}
