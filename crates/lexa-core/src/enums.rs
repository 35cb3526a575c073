//! Status enums, roles, and audit actions for Lexa.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `CaseStatus` carries the case state machine table in `allowed_next_states()`;
//! every other component consults it rather than keeping its own copy.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// CaseStatus
// ---------------------------------------------------------------------------

/// Canonical status of a legal request.
///
/// ```text
/// submitted → assigned → in_review ⇄ documents_pending
///                                  ⇄ clarification_required
///                                  ⇄ drafting_opinion → opinion_ready
/// opinion_ready → client_acknowledged → no_further_queries_confirmed → case_closed
///               → completed           → completed
///               → in_review           → case_closed
/// any pre-opinion state → cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Submitted,
    Assigned,
    InReview,
    DocumentsPending,
    ClarificationRequired,
    DraftingOpinion,
    OpinionReady,
    ClientAcknowledged,
    NoFurtherQueriesConfirmed,
    CaseClosed,
    Completed,
    Cancelled,
}

impl CaseStatus {
    /// Every status, in table order.
    pub const ALL: [Self; 12] = [
        Self::Submitted,
        Self::Assigned,
        Self::InReview,
        Self::DocumentsPending,
        Self::ClarificationRequired,
        Self::DraftingOpinion,
        Self::OpinionReady,
        Self::ClientAcknowledged,
        Self::NoFurtherQueriesConfirmed,
        Self::CaseClosed,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Submitted => &[Self::Assigned, Self::Cancelled],
            Self::Assigned => &[Self::InReview, Self::Cancelled],
            Self::InReview => &[
                Self::DocumentsPending,
                Self::ClarificationRequired,
                Self::DraftingOpinion,
                Self::Cancelled,
            ],
            Self::DocumentsPending | Self::ClarificationRequired => {
                &[Self::InReview, Self::Cancelled]
            }
            Self::DraftingOpinion => &[Self::OpinionReady, Self::InReview, Self::Cancelled],
            Self::OpinionReady => &[Self::ClientAcknowledged, Self::Completed, Self::InReview],
            Self::ClientAcknowledged => &[
                Self::CaseClosed,
                Self::Completed,
                Self::NoFurtherQueriesConfirmed,
            ],
            Self::NoFurtherQueriesConfirmed => &[Self::CaseClosed],
            Self::CaseClosed | Self::Completed | Self::Cancelled => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Terminal states have no outgoing transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::CaseClosed | Self::Completed | Self::Cancelled)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Assigned => "assigned",
            Self::InReview => "in_review",
            Self::DocumentsPending => "documents_pending",
            Self::ClarificationRequired => "clarification_required",
            Self::DraftingOpinion => "drafting_opinion",
            Self::OpinionReady => "opinion_ready",
            Self::ClientAcknowledged => "client_acknowledged",
            Self::NoFurtherQueriesConfirmed => "no_further_queries_confirmed",
            Self::CaseClosed => "case_closed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse a stored status string, accepting pre-migration values.
    ///
    /// Canonical names map one to one. A fixed alias table covers the values
    /// older rows are known to carry:
    ///
    /// | legacy value                                  | status                   |
    /// |-----------------------------------------------|--------------------------|
    /// | `clarification_requested`                     | `clarification_required` |
    /// | `drafting`                                    | `drafting_opinion`       |
    /// | `review`, `in_progress`, `investigation`      | `in_review`              |
    /// | `accepted`, `claimed`                         | `assigned`               |
    /// | `pending_lawyer_response`, `open`             | `submitted`              |
    /// | `delivered`, `client_review`                  | `opinion_ready`          |
    ///
    /// Anything else returns `(Submitted, false)`. Callers decide whether the
    /// fallback is acceptable; no other repair is attempted.
    #[must_use]
    pub fn parse_legacy(raw: &str) -> (Self, bool) {
        if let Ok(status) = raw.parse::<Self>() {
            return (status, true);
        }
        match raw {
            "clarification_requested" => (Self::ClarificationRequired, true),
            "drafting" => (Self::DraftingOpinion, true),
            "review" | "in_progress" | "investigation" => (Self::InReview, true),
            "accepted" | "claimed" => (Self::Assigned, true),
            "pending_lawyer_response" | "open" => (Self::Submitted, true),
            "delivered" | "client_review" => (Self::OpinionReady, true),
            _ => (Self::Submitted, false),
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseStatus {
    type Err = String;

    /// Strict parse of canonical names only. Use [`CaseStatus::parse_legacy`]
    /// for stored data.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown case status '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// LegacyStatusPolicy
// ---------------------------------------------------------------------------

/// What to do with a status string that is neither canonical nor a known alias.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LegacyStatusPolicy {
    /// Log a warning and treat the case as `submitted`.
    #[default]
    Fallback,
    /// Fail with a validation error.
    Reject,
}

// ---------------------------------------------------------------------------
// Visibility
// ---------------------------------------------------------------------------

/// Whether a request was sent to a chosen lawyer or posted to the marketplace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Private,
    Public,
}

impl Visibility {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Public => "public",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Client-chosen priority of a request.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Base contribution to the dashboard urgency score.
    #[must_use]
    pub const fn weight(self) -> u32 {
        match self {
            Self::Low => 25,
            Self::Medium => 50,
            Self::High => 75,
            Self::Urgent => 100,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ActorRole
// ---------------------------------------------------------------------------

/// Role of the user performing an engine call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Client,
    Lawyer,
    Firm,
    Bank,
    Admin,
}

impl ActorRole {
    /// Roles allowed to route a case to a lawyer.
    #[must_use]
    pub const fn can_assign(self) -> bool {
        matches!(self, Self::Firm | Self::Bank | Self::Admin)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Lawyer => "lawyer",
            Self::Firm => "firm",
            Self::Bank => "bank",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// QueryStatus
// ---------------------------------------------------------------------------

/// Status of a post-opinion query.
///
/// ```text
/// open → resolved
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryStatus {
    Open,
    Resolved,
}

impl QueryStatus {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Open => &[Self::Resolved],
            Self::Resolved => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Resolved => "resolved",
        }
    }
}

impl fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// Type of action recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    CaseSubmitted,
    CaseAssigned,
    StatusUpdated,
    ClarificationRequested,
    ClarificationResponded,
    SlaPaused,
    SlaResumed,
    ClientAcknowledgedOpinion,
    PostOpinionQueryRaised,
    PostOpinionQueryResolved,
    ClientConfirmedNoQuestions,
    CaseClosed,
    RequestRejected,
    DocumentsRequested,
    DocumentsUploaded,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CaseSubmitted => "case_submitted",
            Self::CaseAssigned => "case_assigned",
            Self::StatusUpdated => "status_updated",
            Self::ClarificationRequested => "clarification_requested",
            Self::ClarificationResponded => "clarification_responded",
            Self::SlaPaused => "sla_paused",
            Self::SlaResumed => "sla_resumed",
            Self::ClientAcknowledgedOpinion => "client_acknowledged_opinion",
            Self::PostOpinionQueryRaised => "post_opinion_query_raised",
            Self::PostOpinionQueryResolved => "post_opinion_query_resolved",
            Self::ClientConfirmedNoQuestions => "client_confirmed_no_questions",
            Self::CaseClosed => "case_closed",
            Self::RequestRejected => "request_rejected",
            Self::DocumentsRequested => "documents_requested",
            Self::DocumentsUploaded => "documents_uploaded",
        }
    }

    /// Human-readable label for timelines.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CaseSubmitted => "Request Submitted",
            Self::CaseAssigned => "Case Assigned",
            Self::StatusUpdated => "Status Changed",
            Self::ClarificationRequested => "Clarification Requested",
            Self::ClarificationResponded => "Clarification Responded",
            Self::SlaPaused => "SLA Paused",
            Self::SlaResumed => "SLA Resumed",
            Self::ClientAcknowledgedOpinion => "Opinion Acknowledged",
            Self::PostOpinionQueryRaised => "Query Raised",
            Self::PostOpinionQueryResolved => "Query Resolved",
            Self::ClientConfirmedNoQuestions => "No Further Questions",
            Self::CaseClosed => "Case Closed",
            Self::RequestRejected => "Request Declined",
            Self::DocumentsRequested => "Documents Requested",
            Self::DocumentsUploaded => "Documents Uploaded",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// NotificationKind
// ---------------------------------------------------------------------------

/// Category of a notification handed to the `Notifier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    CaseAssigned,
    StatusUpdated,
    ClarificationRequested,
    ClarificationResponded,
    ClientUpdate,
    RequestRejected,
    DocumentsRequested,
    DocumentsUploaded,
}

impl NotificationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CaseAssigned => "case_assigned",
            Self::StatusUpdated => "status_updated",
            Self::ClarificationRequested => "clarification_requested",
            Self::ClarificationResponded => "clarification_responded",
            Self::ClientUpdate => "client_update",
            Self::RequestRejected => "request_rejected",
            Self::DocumentsRequested => "documents_requested",
            Self::DocumentsUploaded => "documents_uploaded",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(
        status_no_further_queries,
        CaseStatus,
        CaseStatus::NoFurtherQueriesConfirmed,
        "no_further_queries_confirmed"
    );
    test_serde_roundtrip!(
        status_documents_pending,
        CaseStatus,
        CaseStatus::DocumentsPending,
        "documents_pending"
    );
    test_serde_roundtrip!(
        audit_client_acknowledged,
        AuditAction,
        AuditAction::ClientAcknowledgedOpinion,
        "client_acknowledged_opinion"
    );
    test_serde_roundtrip!(priority_urgent, Priority, Priority::Urgent, "urgent");
    test_serde_roundtrip!(policy_reject, LegacyStatusPolicy, LegacyStatusPolicy::Reject, "reject");

    /// The full table as written in the workflow documentation.
    const TABLE: &[(CaseStatus, &[CaseStatus])] = &[
        (CaseStatus::Submitted, &[CaseStatus::Assigned, CaseStatus::Cancelled]),
        (CaseStatus::Assigned, &[CaseStatus::InReview, CaseStatus::Cancelled]),
        (
            CaseStatus::InReview,
            &[
                CaseStatus::DocumentsPending,
                CaseStatus::ClarificationRequired,
                CaseStatus::DraftingOpinion,
                CaseStatus::Cancelled,
            ],
        ),
        (CaseStatus::DocumentsPending, &[CaseStatus::InReview, CaseStatus::Cancelled]),
        (CaseStatus::ClarificationRequired, &[CaseStatus::InReview, CaseStatus::Cancelled]),
        (
            CaseStatus::DraftingOpinion,
            &[CaseStatus::OpinionReady, CaseStatus::InReview, CaseStatus::Cancelled],
        ),
        (
            CaseStatus::OpinionReady,
            &[CaseStatus::ClientAcknowledged, CaseStatus::Completed, CaseStatus::InReview],
        ),
        (
            CaseStatus::ClientAcknowledged,
            &[
                CaseStatus::CaseClosed,
                CaseStatus::Completed,
                CaseStatus::NoFurtherQueriesConfirmed,
            ],
        ),
        (CaseStatus::NoFurtherQueriesConfirmed, &[CaseStatus::CaseClosed]),
        (CaseStatus::CaseClosed, &[]),
        (CaseStatus::Completed, &[]),
        (CaseStatus::Cancelled, &[]),
    ];

    #[test]
    fn every_pair_matches_the_table() {
        for (from, allowed) in TABLE {
            for to in CaseStatus::ALL {
                assert_eq!(
                    from.can_transition_to(to),
                    allowed.contains(&to),
                    "{from} -> {to}"
                );
            }
        }
        assert_eq!(TABLE.len(), CaseStatus::ALL.len());
    }

    #[rstest]
    #[case(CaseStatus::CaseClosed)]
    #[case(CaseStatus::Completed)]
    #[case(CaseStatus::Cancelled)]
    fn terminal_states_have_no_exits(#[case] status: CaseStatus) {
        assert!(status.is_terminal());
        assert!(status.allowed_next_states().is_empty());
    }

    #[test]
    fn every_status_reachable_from_submitted() {
        let mut seen = vec![CaseStatus::Submitted];
        let mut frontier = vec![CaseStatus::Submitted];
        while let Some(next) = frontier.pop() {
            for &to in next.allowed_next_states() {
                if !seen.contains(&to) {
                    seen.push(to);
                    frontier.push(to);
                }
            }
        }
        assert_eq!(seen.len(), CaseStatus::ALL.len());
    }

    #[test]
    fn canonical_names_parse_strictly() {
        for status in CaseStatus::ALL {
            assert_eq!(status.as_str().parse::<CaseStatus>(), Ok(status));
            assert_eq!(CaseStatus::parse_legacy(status.as_str()), (status, true));
        }
        assert!("In_Review".parse::<CaseStatus>().is_err());
    }

    #[rstest]
    #[case("clarification_requested", CaseStatus::ClarificationRequired)]
    #[case("drafting", CaseStatus::DraftingOpinion)]
    #[case("review", CaseStatus::InReview)]
    #[case("investigation", CaseStatus::InReview)]
    #[case("accepted", CaseStatus::Assigned)]
    #[case("pending_lawyer_response", CaseStatus::Submitted)]
    #[case("delivered", CaseStatus::OpinionReady)]
    fn legacy_aliases_are_recognized(#[case] raw: &str, #[case] expected: CaseStatus) {
        assert_eq!(CaseStatus::parse_legacy(raw), (expected, true));
    }

    #[rstest]
    #[case("")]
    #[case("archived")]
    #[case("IN_REVIEW")]
    #[case(" in_review")]
    fn unknown_values_fall_back_to_submitted(#[case] raw: &str) {
        assert_eq!(CaseStatus::parse_legacy(raw), (CaseStatus::Submitted, false));
    }

    #[test]
    fn query_status_is_one_way() {
        assert!(QueryStatus::Open.can_transition_to(QueryStatus::Resolved));
        assert!(!QueryStatus::Resolved.can_transition_to(QueryStatus::Open));
    }

    #[test]
    fn priority_weights_increase() {
        let weights: Vec<u32> = [Priority::Low, Priority::Medium, Priority::High, Priority::Urgent]
            .into_iter()
            .map(Priority::weight)
            .collect();
        assert!(weights.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", CaseStatus::InReview), "in_review");
        assert_eq!(format!("{}", Visibility::Public), "public");
        assert_eq!(format!("{}", ActorRole::Bank), "bank");
        assert_eq!(format!("{}", QueryStatus::Resolved), "resolved");
        assert_eq!(format!("{}", AuditAction::SlaResumed), "sla_resumed");
        assert_eq!(format!("{}", NotificationKind::ClientUpdate), "client_update");
        assert_eq!(format!("{}", AuditAction::RequestRejected), "request_rejected");
        assert_eq!(
            format!("{}", NotificationKind::DocumentsRequested),
            "documents_requested"
        );
    }
}
