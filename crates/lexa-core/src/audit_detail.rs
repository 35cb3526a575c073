//! Typed audit detail payloads.
//!
//! Each audit action carries a structured `details` JSON blob. These types fix
//! the shape of each blob so the SLA fold, replay, and timeline can decode
//! them without guessing.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ActorRole, CaseStatus};

/// Characters kept from free text when it is copied into an audit entry.
pub const PREVIEW_CHARS: usize = 50;

/// Shorten `text` to [`PREVIEW_CHARS`] characters, appending `...` when cut.
#[must_use]
pub fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        return text.to_string();
    }
    let mut out: String = text.chars().take(PREVIEW_CHARS).collect();
    out.push_str("...");
    out
}

/// Detail for `AuditAction::CaseSubmitted`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CaseSubmittedDetail {
    pub title: String,
    pub department: String,
}

/// Detail for `AuditAction::StatusUpdated`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StatusUpdatedDetail {
    pub from: CaseStatus,
    pub to: CaseStatus,
    pub notes: Option<String>,
}

/// Detail for `AuditAction::CaseAssigned`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CaseAssignedDetail {
    pub assignee_id: String,
    pub assigned_by: ActorRole,
}

/// Detail for `AuditAction::SlaPaused`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SlaPausedDetail {
    pub reason: String,
}

/// Detail for `AuditAction::ClarificationRequested`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ClarificationRequestedDetail {
    pub subject: String,
}

/// Detail for `AuditAction::ClarificationResponded`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ClarificationRespondedDetail {
    pub response_preview: String,
}

/// Detail for `AuditAction::PostOpinionQueryRaised`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct QueryRaisedDetail {
    pub query_id: String,
    pub query_preview: String,
}

/// Detail for `AuditAction::PostOpinionQueryResolved`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct QueryResolvedDetail {
    pub query_id: String,
    pub response_preview: String,
}

/// Detail for `AuditAction::RequestRejected`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RequestRejectedDetail {
    pub note: Option<String>,
}

/// Detail for the documents round trip (`DocumentsRequested`,
/// `DocumentsUploaded`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DocumentsDetail {
    pub from: CaseStatus,
    pub to: CaseStatus,
    pub message: Option<String>,
}

/// Detail for actions that move the closure protocol forward
/// (`ClientAcknowledgedOpinion`, `ClientConfirmedNoQuestions`, `CaseClosed`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ClosureStepDetail {
    pub from: CaseStatus,
    pub to: CaseStatus,
}
