//! Security adapters: password hashing.

mod argon2_hasher;

pub use self::argon2_hasher::Argon2PasswordHasher;
