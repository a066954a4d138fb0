//! Argon2id adapter for the `PasswordHasher` port.
//!
//! Hashes are salted PHC strings (`$argon2id$...`); the salt travels inside
//! the string, so verification needs no separate salt storage. The
//! underlying verifier compares digests in constant time.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString};

use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Argon2id implementation of the hashing port, using the library's
/// recommended default parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| PasswordHashError::new(err.to_string()))
    }

    fn verify(&self, password: &str, stored_hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored_hash) else {
            // A malformed stored hash is a data problem, not a caller
            // problem; treat it as a failed match.
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}
