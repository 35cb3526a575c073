use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::NotificationKind;

/// A message for a user, handed to the `Notifier` after a committed transition.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Notification {
    pub user_id: String,
    pub kind: NotificationKind,
    pub message: String,
    pub case_id: String,
}
