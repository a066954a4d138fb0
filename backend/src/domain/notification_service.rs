//! Notification domain service: unread listing and idempotent mark-read.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::notification::{Notification, NotificationId};
use crate::domain::ports::{
    NotificationCommand, NotificationPersistenceError, NotificationQuery, NotificationRepository,
};
use crate::domain::user::UserId;

/// Notification service over a repository.
#[derive(Clone)]
pub struct NotificationService<N> {
    notifications: Arc<N>,
}

impl<N> NotificationService<N> {
    /// Create a new service with the given repository.
    pub fn new(notifications: Arc<N>) -> Self {
        Self { notifications }
    }
}

fn map_notification_persistence_error(error: NotificationPersistenceError) -> Error {
    match error {
        NotificationPersistenceError::Connection { message } => {
            Error::service_unavailable(message)
        }
        NotificationPersistenceError::Query { message } => Error::internal(message),
    }
}

#[async_trait]
impl<N> NotificationQuery for NotificationService<N>
where
    N: NotificationRepository,
{
    async fn list_for_user(
        &self,
        user: UserId,
        unread_only: bool,
    ) -> Result<Vec<Notification>, Error> {
        self.notifications
            .list_for_user(user, unread_only)
            .await
            .map_err(map_notification_persistence_error)
    }
}

#[async_trait]
impl<N> NotificationCommand for NotificationService<N>
where
    N: NotificationRepository,
{
    async fn mark_read(&self, id: NotificationId) -> Result<(), Error> {
        let affected = self
            .notifications
            .mark_read(id)
            .await
            .map_err(map_notification_persistence_error)?;

        // A read notification stays read; zero matched rows means the id
        // itself is unknown.
        if affected == 0 {
            return Err(Error::not_found(format!("notification {id} not found")));
        }
        Ok(())
    }
}
