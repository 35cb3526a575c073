//! ID prefix constants and generation helpers.
//!
//! Every ID is `{prefix}-{8 lowercase hex chars}`. The libSQL store generates
//! them in SQL with `randomblob(4)`; in-process stores use [`generate`].

use crate::errors::CoreError;

pub const PREFIX_CASE: &str = "cas";
pub const PREFIX_AUDIT: &str = "aud";
pub const PREFIX_QUERY: &str = "poq";
pub const PREFIX_NOTIFICATION: &str = "ntf";

/// Generate a fresh `{prefix}-xxxxxxxx` ID from OS randomness.
///
/// # Errors
///
/// Returns `CoreError::Other` if the OS random source is unavailable.
pub fn generate(prefix: &str) -> Result<String, CoreError> {
    let mut buf = [0u8; 4];
    getrandom::fill(&mut buf).map_err(|e| anyhow::anyhow!("random source unavailable: {e}"))?;
    let hex: String = buf.iter().map(|b| format!("{b:02x}")).collect();
    Ok(format!("{prefix}-{hex}"))
}

/// Whether `id` has the `{prefix}-xxxxxxxx` shape.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hex| hex.len() == 8 && hex.bytes().all(|b| b.is_ascii_hexdigit()))
}
