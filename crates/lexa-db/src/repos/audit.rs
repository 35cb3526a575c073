//! Audit log repository. Append-only; read back in insertion order.

use async_trait::async_trait;

use lexa_core::entities::AuditEntry;
use lexa_core::errors::CoreError;
use lexa_core::ids::PREFIX_AUDIT;
use lexa_engine::store::{AuditStore, NewAuditEntry};

use crate::error::DatabaseError;
use crate::helpers::{format_datetime, get_opt_string, parse_datetime, parse_enum, parse_optional_json};
use crate::store::LibSqlStore;

impl LibSqlStore {
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails, including when the case
    /// does not exist.
    pub async fn append_audit(&self, entry: NewAuditEntry) -> Result<AuditEntry, DatabaseError> {
        let id = self.db().generate_id(PREFIX_AUDIT).await?;
        let details = entry
            .details
            .as_ref()
            .map(std::string::ToString::to_string);
        self.db()
            .conn()
            .execute(
                "INSERT INTO audit_log (id, user_id, case_id, action, details, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    id.as_str(),
                    entry.user_id.as_str(),
                    entry.case_id.as_str(),
                    entry.action.as_str(),
                    details.as_deref(),
                    format_datetime(entry.created_at)
                ],
            )
            .await?;

        Ok(AuditEntry {
            id,
            user_id: entry.user_id,
            case_id: entry.case_id,
            action: entry.action,
            details: entry.details,
            created_at: entry.created_at,
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row does not parse.
    pub async fn audit_for_case(&self, case_id: &str) -> Result<Vec<AuditEntry>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, user_id, case_id, action, details, created_at
                 FROM audit_log WHERE case_id = ?1 ORDER BY rowid",
                [case_id],
            )
            .await?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(AuditEntry {
                id: row.get::<String>(0)?,
                user_id: row.get::<String>(1)?,
                case_id: row.get::<String>(2)?,
                action: parse_enum(&row.get::<String>(3)?)?,
                details: parse_optional_json(get_opt_string(&row, 4)?.as_deref())?,
                created_at: parse_datetime(&row.get::<String>(5)?)?,
            });
        }
        Ok(entries)
    }
}

#[async_trait]
impl AuditStore for LibSqlStore {
    async fn append(&self, entry: NewAuditEntry) -> Result<AuditEntry, CoreError> {
        Ok(self.append_audit(entry).await?)
    }

    async fn list_by_case(&self, case_id: &str) -> Result<Vec<AuditEntry>, CoreError> {
        Ok(self.audit_for_case(case_id).await?)
    }
}
