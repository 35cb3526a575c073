//! Embedded schema migrations, run on every open. All statements use
//! `IF NOT EXISTS` so re-running is a no-op.

use crate::LexaDb;
use crate::error::DatabaseError;

/// Cases, audit log, post-opinion queries, notifications.
const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");

impl LexaDb {
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_initial: {e}")))?;
        Ok(())
    }
}
