//! Driving port for partner account use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! register and authenticate partners without knowing the backing
//! infrastructure, so HTTP handler tests can substitute memory-backed
//! implementations instead of wiring a database.

use async_trait::async_trait;

use crate::domain::auth::LoginCredentials;
use crate::domain::error::Error;
use crate::domain::user::{Registration, User, UserId};

/// Domain use-case port for registration and authentication.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Register a new partner and return the assigned id. Duplicate email
    /// surfaces as [`crate::domain::ErrorCode::Conflict`]; the password
    /// hash never appears in the result.
    async fn register(&self, registration: Registration) -> Result<UserId, Error>;

    /// Validate credentials and return the user record with no password
    /// material. Unknown email and wrong password produce the identical
    /// generic unauthorized error.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}
