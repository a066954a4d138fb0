//! Port for one-way password hashing.
//!
//! The domain never sees hashing internals; it hands a raw password to this
//! port and stores whatever opaque string comes back. Verification must be
//! constant-time with respect to the stored hash, which the Argon2 adapter
//! guarantees by construction.

/// Errors raised while hashing a password.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("password hashing failed: {message}")]
pub struct PasswordHashError {
    /// Adapter-specific failure description.
    pub message: String,
}

impl PasswordHashError {
    /// Create an error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Driven port for salted one-way password hashing.
pub trait PasswordHasher: Send + Sync {
    /// Hash a raw password into an opaque, salted storage string.
    fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Verify a raw password against a stored hash. A malformed stored
    /// hash verifies as false rather than erroring, so login failures
    /// stay indistinguishable to the caller.
    fn verify(&self, password: &str, stored_hash: &str) -> bool;
}
