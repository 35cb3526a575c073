use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ActorRole;

/// The authenticated caller of an engine operation.
///
/// Passed explicitly into every call; the engine keeps no session state.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Actor {
    pub user_id: String,
    pub role: ActorRole,
}

impl Actor {
    pub fn new(user_id: impl Into<String>, role: ActorRole) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    pub fn client(user_id: impl Into<String>) -> Self {
        Self::new(user_id, ActorRole::Client)
    }

    pub fn lawyer(user_id: impl Into<String>) -> Self {
        Self::new(user_id, ActorRole::Lawyer)
    }
}
