//! Domain ports: driving use-case traits and driven persistence traits.

mod account_service;
mod notification_ports;
mod notification_repository;
mod password_hasher;
mod proposal_ports;
mod proposal_repository;
mod user_repository;

pub use self::account_service::AccountService;
pub use self::notification_ports::{NotificationCommand, NotificationQuery};
pub use self::notification_repository::{NotificationPersistenceError, NotificationRepository};
pub use self::password_hasher::{PasswordHashError, PasswordHasher};
pub use self::proposal_ports::{ProposalCommand, ProposalQuery};
pub use self::proposal_repository::{ProposalPersistenceError, ProposalRepository};
pub use self::user_repository::{UserPersistenceError, UserRepository};
