//! Post-opinion query repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use lexa_core::entities::PostOpinionQuery;
use lexa_core::enums::QueryStatus;
use lexa_core::errors::CoreError;
use lexa_core::ids::PREFIX_QUERY;
use lexa_engine::store::QueryStore;

use crate::error::DatabaseError;
use crate::helpers::{
    format_datetime, get_opt_string, parse_datetime, parse_enum, parse_optional_datetime,
};
use crate::store::LibSqlStore;

const QUERY_COLUMNS: &str = "id, request_id, query_text, raised_by, status, response_text, \
    responded_by, responded_at, created_at";

fn query_from_row(row: &libsql::Row) -> Result<PostOpinionQuery, DatabaseError> {
    Ok(PostOpinionQuery {
        id: row.get::<String>(0)?,
        request_id: row.get::<String>(1)?,
        query_text: row.get::<String>(2)?,
        raised_by: row.get::<String>(3)?,
        status: parse_enum(&row.get::<String>(4)?)?,
        response_text: get_opt_string(row, 5)?,
        responded_by: get_opt_string(row, 6)?,
        responded_at: parse_optional_datetime(get_opt_string(row, 7)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

impl LibSqlStore {
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn insert_query(
        &self,
        request_id: &str,
        raised_by: &str,
        query_text: &str,
        at: DateTime<Utc>,
    ) -> Result<PostOpinionQuery, DatabaseError> {
        let id = self.db().generate_id(PREFIX_QUERY).await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO post_opinion_queries (id, request_id, query_text, raised_by, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    id.as_str(),
                    request_id,
                    query_text,
                    raised_by,
                    QueryStatus::Open.as_str(),
                    format_datetime(at)
                ],
            )
            .await?;

        Ok(PostOpinionQuery {
            id,
            request_id: request_id.to_string(),
            query_text: query_text.to_string(),
            raised_by: raised_by.to_string(),
            status: QueryStatus::Open,
            response_text: None,
            responded_by: None,
            responded_at: None,
            created_at: at,
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or the row does not parse.
    pub async fn find_query(&self, id: &str) -> Result<Option<PostOpinionQuery>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {QUERY_COLUMNS} FROM post_opinion_queries WHERE id = ?1"),
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(query_from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Queries for a case, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row does not parse.
    pub async fn queries_for_case(&self, case_id: &str) -> Result<Vec<PostOpinionQuery>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {QUERY_COLUMNS} FROM post_opinion_queries
                     WHERE request_id = ?1 ORDER BY created_at, rowid"
                ),
                [case_id],
            )
            .await?;
        let mut queries = Vec::new();
        while let Some(row) = rows.next().await? {
            queries.push(query_from_row(&row)?);
        }
        Ok(queries)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_open_queries(&self, case_id: &str) -> Result<u32, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT COUNT(*) FROM post_opinion_queries WHERE request_id = ?1 AND status = ?2",
                libsql::params![case_id, QueryStatus::Open.as_str()],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let count = row.get::<i64>(0)?;
        u32::try_from(count)
            .map_err(|e| DatabaseError::Query(format!("open query count {count}: {e}")))
    }

    /// Resolve the query if it is still open. Returns rows updated.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the UPDATE fails.
    pub async fn resolve_open_query(
        &self,
        id: &str,
        response: &str,
        responder: &str,
        at: DateTime<Utc>,
    ) -> Result<u64, DatabaseError> {
        Ok(self
            .db()
            .conn()
            .execute(
                "UPDATE post_opinion_queries
                 SET status = ?1, response_text = ?2, responded_by = ?3, responded_at = ?4
                 WHERE id = ?5 AND status = ?6",
                libsql::params![
                    QueryStatus::Resolved.as_str(),
                    response,
                    responder,
                    format_datetime(at),
                    id,
                    QueryStatus::Open.as_str()
                ],
            )
            .await?)
    }
}

#[async_trait]
impl QueryStore for LibSqlStore {
    async fn create(
        &self,
        request_id: &str,
        raised_by: &str,
        query_text: &str,
        at: DateTime<Utc>,
    ) -> Result<PostOpinionQuery, CoreError> {
        Ok(self.insert_query(request_id, raised_by, query_text, at).await?)
    }

    async fn get(&self, id: &str) -> Result<PostOpinionQuery, CoreError> {
        self.find_query(id)
            .await?
            .ok_or_else(|| CoreError::not_found("post_opinion_query", id))
    }

    async fn list_by_case(&self, case_id: &str) -> Result<Vec<PostOpinionQuery>, CoreError> {
        Ok(self.queries_for_case(case_id).await?)
    }

    async fn count_open(&self, case_id: &str) -> Result<u32, CoreError> {
        Ok(self.count_open_queries(case_id).await?)
    }

    async fn mark_resolved(
        &self,
        id: &str,
        response: &str,
        responder: &str,
        at: DateTime<Utc>,
    ) -> Result<PostOpinionQuery, CoreError> {
        if self.resolve_open_query(id, response, responder, at).await? == 0 {
            return match self.find_query(id).await? {
                Some(_) => Err(CoreError::precondition(format!(
                    "query {id} is already resolved"
                ))),
                None => Err(CoreError::not_found("post_opinion_query", id)),
            };
        }
        QueryStore::get(self, id).await
    }
}
