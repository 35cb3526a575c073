//! Case repository.
//!
//! Status updates are compare-and-swap on the raw stored value, so a row
//! holding a legacy alias can still be moved once it normalizes to the
//! expected status.

use async_trait::async_trait;

use lexa_core::entities::{Case, Department};
use lexa_core::enums::CaseStatus;
use lexa_core::errors::CoreError;
use lexa_core::ids::PREFIX_CASE;
use lexa_engine::store::{CaseDraft, CaseStore, StatusChange};

use crate::error::DatabaseError;
use crate::helpers::{
    format_datetime, get_opt_string, parse_datetime, parse_enum, parse_optional_datetime,
};
use crate::store::LibSqlStore;

const CASE_COLUMNS: &str = "id, title, status, visibility, priority, client_id, \
    assigned_lawyer_id, department_name, department_sla_hours, sla_deadline, \
    completed_at, created_at, updated_at";

impl LibSqlStore {
    fn case_from_row(&self, row: &libsql::Row) -> Result<Case, DatabaseError> {
        let raw_status = row.get::<String>(2)?;
        let status = self
            .lifecycle()
            .normalize_status(&raw_status)
            .map_err(|e| DatabaseError::InvalidState(e.to_string()))?;

        Ok(Case {
            id: row.get::<String>(0)?,
            title: row.get::<String>(1)?,
            status,
            visibility: parse_enum(&row.get::<String>(3)?)?,
            priority: parse_enum(&row.get::<String>(4)?)?,
            client_id: row.get::<String>(5)?,
            assigned_lawyer_id: get_opt_string(row, 6)?,
            department: Department {
                name: row.get::<String>(7)?,
                sla_hours: row.get::<i64>(8)?,
            },
            sla_deadline: parse_optional_datetime(get_opt_string(row, 9)?.as_deref())?,
            completed_at: parse_optional_datetime(get_opt_string(row, 10)?.as_deref())?,
            created_at: parse_datetime(&row.get::<String>(11)?)?,
            updated_at: parse_datetime(&row.get::<String>(12)?)?,
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a column does not parse.
    pub async fn find_case(&self, id: &str) -> Result<Option<Case>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {CASE_COLUMNS} FROM cases WHERE id = ?1"), [id])
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(self.case_from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// The status column exactly as stored.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn raw_status(&self, id: &str) -> Result<Option<String>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT status FROM cases WHERE id = ?1", [id])
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row.get::<String>(0)?)),
            None => Ok(None),
        }
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn insert_case(&self, draft: CaseDraft) -> Result<Case, DatabaseError> {
        let id = self.db().generate_id(PREFIX_CASE).await?;
        let created = format_datetime(draft.created_at);
        self.db()
            .conn()
            .execute(
                "INSERT INTO cases (id, title, status, visibility, priority, client_id,
                    department_name, department_sla_hours, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
                libsql::params![
                    id.as_str(),
                    draft.title.as_str(),
                    CaseStatus::Submitted.as_str(),
                    draft.visibility.as_str(),
                    draft.priority.as_str(),
                    draft.client_id.as_str(),
                    draft.department.name.as_str(),
                    draft.department.sla_hours,
                    created.as_str()
                ],
            )
            .await?;

        Ok(Case {
            id,
            title: draft.title,
            status: CaseStatus::Submitted,
            visibility: draft.visibility,
            priority: draft.priority,
            client_id: draft.client_id,
            assigned_lawyer_id: None,
            department: draft.department,
            sla_deadline: None,
            completed_at: None,
            created_at: draft.created_at,
            updated_at: draft.created_at,
        })
    }

    /// All cases, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row does not parse.
    pub async fn list_all_cases(&self) -> Result<Vec<Case>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {CASE_COLUMNS} FROM cases ORDER BY created_at DESC, id ASC"),
                (),
            )
            .await?;
        let mut cases = Vec::new();
        while let Some(row) = rows.next().await? {
            cases.push(self.case_from_row(&row)?);
        }
        Ok(cases)
    }

    /// Apply `change` only if the stored status is still `raw_expected`.
    /// Returns the number of rows updated (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the UPDATE fails.
    pub async fn swap_status(
        &self,
        id: &str,
        raw_expected: &str,
        change: &StatusChange,
    ) -> Result<u64, DatabaseError> {
        let updated = format_datetime(change.at);
        let deadline = change.sla_deadline.map(format_datetime);
        let completed = change.completed_at.map(format_datetime);
        let affected = self
            .db()
            .conn()
            .execute(
                "UPDATE cases SET
                    status = ?1,
                    updated_at = ?2,
                    assigned_lawyer_id = COALESCE(?3, assigned_lawyer_id),
                    sla_deadline = COALESCE(?4, sla_deadline),
                    completed_at = COALESCE(?5, completed_at)
                 WHERE id = ?6 AND status = ?7",
                libsql::params![
                    change.next.as_str(),
                    updated.as_str(),
                    change.assigned_lawyer_id.as_deref(),
                    deadline.as_deref(),
                    completed.as_deref(),
                    id,
                    raw_expected
                ],
            )
            .await?;
        Ok(affected)
    }
}

#[async_trait]
impl CaseStore for LibSqlStore {
    async fn insert(&self, draft: CaseDraft) -> Result<Case, CoreError> {
        Ok(self.insert_case(draft).await?)
    }

    async fn get_by_id(&self, id: &str) -> Result<Case, CoreError> {
        self.find_case(id)
            .await?
            .ok_or_else(|| CoreError::not_found("case", id))
    }

    async fn list(&self) -> Result<Vec<Case>, CoreError> {
        Ok(self.list_all_cases().await?)
    }

    async fn update_status(&self, id: &str, change: &StatusChange) -> Result<Case, CoreError> {
        let conflict = || CoreError::ConcurrencyConflict {
            case_id: id.to_string(),
            expected: change.expected,
        };

        let raw = self
            .raw_status(id)
            .await?
            .ok_or_else(|| CoreError::not_found("case", id))?;
        if self.lifecycle().normalize_status(&raw)? != change.expected {
            return Err(conflict());
        }
        if self.swap_status(id, &raw, change).await? == 0 {
            tracing::debug!(case_id = id, expected = %change.expected, "status swap lost the race");
            return Err(conflict());
        }

        self.find_case(id)
            .await?
            .ok_or_else(|| CoreError::not_found("case", id))
    }
}
