//! Notification outbox. Each delivered notification is stored as a row for
//! a downstream sender to pick up.

use async_trait::async_trait;

use lexa_core::entities::Notification;
use lexa_core::errors::CoreError;
use lexa_core::ids::PREFIX_NOTIFICATION;
use lexa_engine::store::Notifier;

use crate::error::DatabaseError;
use crate::helpers::parse_enum;
use crate::store::LibSqlStore;

impl LibSqlStore {
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn insert_notification(&self, notification: &Notification) -> Result<String, DatabaseError> {
        let id = self.db().generate_id(PREFIX_NOTIFICATION).await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO notifications (id, user_id, kind, message, case_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![
                    id.as_str(),
                    notification.user_id.as_str(),
                    notification.kind.as_str(),
                    notification.message.as_str(),
                    notification.case_id.as_str()
                ],
            )
            .await?;
        Ok(id)
    }

    /// Notifications addressed to `user_id`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row does not parse.
    pub async fn notifications_for(&self, user_id: &str) -> Result<Vec<Notification>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT user_id, kind, message, case_id FROM notifications
                 WHERE user_id = ?1 ORDER BY rowid",
                [user_id],
            )
            .await?;
        let mut out = Vec::new();
        while let Some(row) = rows.next().await? {
            out.push(Notification {
                user_id: row.get::<String>(0)?,
                kind: parse_enum(&row.get::<String>(1)?)?,
                message: row.get::<String>(2)?,
                case_id: row.get::<String>(3)?,
            });
        }
        Ok(out)
    }
}

#[async_trait]
impl Notifier for LibSqlStore {
    async fn notify(&self, notification: Notification) -> Result<(), CoreError> {
        let id = self.insert_notification(&notification).await?;
        tracing::debug!(notification_id = %id, user_id = %notification.user_id, kind = %notification.kind, "notification queued");
        Ok(())
    }
}
