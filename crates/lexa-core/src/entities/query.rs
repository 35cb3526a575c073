use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::QueryStatus;

/// A follow-up question raised by the client after acknowledging the opinion.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PostOpinionQuery {
    pub id: String,
    pub request_id: String,
    pub query_text: String,
    pub raised_by: String,
    pub status: QueryStatus,
    pub response_text: Option<String>,
    pub responded_by: Option<String>,
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl PostOpinionQuery {
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == QueryStatus::Open
    }
}
