//! Persistence adapters for the domain's repository ports.
//!
//! The Diesel adapters back the ports with PostgreSQL through a shared
//! bb8 pool. [`MemoryStore`] implements the same ports in process memory
//! and is selected when no database is configured.

mod diesel_notification_repository;
mod diesel_proposal_repository;
mod diesel_user_repository;
mod error_mapping;
mod memory;
mod pool;

pub mod models;
pub mod schema;

pub use diesel_notification_repository::DieselNotificationRepository;
pub use diesel_proposal_repository::DieselProposalRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use memory::MemoryStore;
pub use pool::{DbPool, PoolConfig, PoolError};
