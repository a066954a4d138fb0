//! PostgreSQL-backed `NotificationRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::notification::{Notification, NotificationId};
use crate::domain::ports::{NotificationPersistenceError, NotificationRepository};
use crate::domain::user::UserId;

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::NotificationRow;
use super::pool::DbPool;
use super::schema::notifications;

/// Diesel-backed implementation of the `NotificationRepository` port.
#[derive(Clone)]
pub struct DieselNotificationRepository {
    pool: DbPool,
}

impl DieselNotificationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: diesel::result::Error) -> NotificationPersistenceError {
    map_diesel_error(
        error,
        NotificationPersistenceError::query,
        NotificationPersistenceError::connection,
    )
}

#[async_trait]
impl NotificationRepository for DieselNotificationRepository {
    async fn list_for_user(
        &self,
        user: UserId,
        unread_only: bool,
    ) -> Result<Vec<Notification>, NotificationPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, NotificationPersistenceError::connection))?;

        let mut query = notifications::table
            .filter(notifications::user_id.eq(user.as_uuid()))
            .order(notifications::created_at.desc())
            .into_boxed();
        if unread_only {
            query = query.filter(notifications::read.eq(false));
        }

        let rows: Vec<NotificationRow> = query
            .select(NotificationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_error)?;

        Ok(rows.into_iter().map(Notification::from).collect())
    }

    async fn mark_read(
        &self,
        id: NotificationId,
    ) -> Result<u64, NotificationPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, NotificationPersistenceError::connection))?;

        // Matches the row whether or not it is already read, which is what
        // makes the operation idempotent for callers.
        let affected = diesel::update(notifications::table.filter(notifications::id.eq(id.as_uuid())))
            .set(notifications::read.eq(true))
            .execute(&mut conn)
            .await
            .map_err(map_error)?;

        Ok(affected as u64)
    }
}
