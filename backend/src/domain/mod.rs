//! Domain entities, ports, and services.
//!
//! Everything in this module is transport- and storage-agnostic: the HTTP
//! adapter and the persistence adapters depend on it, never the other way
//! round. Business rules are written exactly once, in the services, and
//! apply identically to every storage adapter behind the ports.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod notification;
pub mod notification_service;
pub mod ports;
pub mod proposal;
pub mod proposal_service;
pub mod user;

pub use self::account_service::PartnerAccountService;
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode};
pub use self::notification::{Notification, NotificationId};
pub use self::notification_service::NotificationService;
pub use self::proposal::{
    InvalidStatus, NewProposal, Proposal, ProposalFilter, ProposalId, ProposalRef, ProposalStats,
    ProposalStatus, ProposalValidationError,
};
pub use self::proposal_service::ProposalService;
pub use self::user::{NewUser, Registration, RegistrationValidationError, User, UserId};

/// Convenient domain result alias.
pub type DomainResult<T> = Result<T, Error>;
