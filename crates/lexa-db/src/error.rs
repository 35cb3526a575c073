//! Database error types for lexa-db.

use thiserror::Error;

use lexa_core::errors::CoreError;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned an unparseable column.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// A stored value the domain model rejects (e.g. an unknown status under
    /// the strict legacy policy).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Message carried by `CoreError::Storage`. The driver's own text goes to the
/// log only.
pub const STORAGE_FAILURE: &str = "the case database could not complete the operation";

impl From<DatabaseError> for CoreError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::InvalidState(msg) => Self::Validation(msg),
            other => {
                tracing::error!(error = %other, "database operation failed");
                Self::Storage(STORAGE_FAILURE.into())
            }
        }
    }
}
