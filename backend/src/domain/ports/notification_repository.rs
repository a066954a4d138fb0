//! Port abstraction for notification persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::notification::{Notification, NotificationId};
use crate::domain::user::UserId;

/// Persistence errors raised by notification repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotificationPersistenceError {
    /// Repository connection could not be established.
    #[error("notification repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("notification repository query failed: {message}")]
    Query { message: String },
}

impl NotificationPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Driven port for notification persistence.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// List a user's notifications, newest first, optionally unread only.
    async fn list_for_user(
        &self,
        user: UserId,
        unread_only: bool,
    ) -> Result<Vec<Notification>, NotificationPersistenceError>;

    /// Set the read flag on one notification; returns the number of rows
    /// matched. Marking an already-read row matches it and changes nothing.
    async fn mark_read(&self, id: NotificationId)
    -> Result<u64, NotificationPersistenceError>;
}
