//! Driving ports for notification use-cases.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::notification::{Notification, NotificationId};
use crate::domain::user::UserId;

/// Read-only notification use-cases.
#[async_trait]
pub trait NotificationQuery: Send + Sync {
    /// A user's notifications, newest first, optionally unread only.
    async fn list_for_user(
        &self,
        user: UserId,
        unread_only: bool,
    ) -> Result<Vec<Notification>, Error>;
}

/// Mutating notification use-cases.
#[async_trait]
pub trait NotificationCommand: Send + Sync {
    /// Mark one notification read. Idempotent: marking an already-read
    /// notification succeeds without changing state.
    async fn mark_read(&self, id: NotificationId) -> Result<(), Error>;
}
