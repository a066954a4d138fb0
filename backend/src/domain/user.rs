//! Partner user entity and registration input.
//!
//! Partners are the brokerage's sales agents: they register, log in, and
//! submit financing proposals on behalf of clients. The password only ever
//! exists in the domain as an Argon2id hash; [`Registration`] carries the
//! raw password in a zeroizing wrapper for the short hop to the hasher.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

/// Identifier of a partner user.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Wrap an existing identifier.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a fresh v4 identifier for a new user.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A registered partner user.
///
/// `password_hash` is the stored Argon2id PHC string. It is deliberately
/// excluded from serialisation so no handler can leak it by returning the
/// entity directly.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub tax_id: String,
    pub phone: String,
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validation failures raised while building a [`Registration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// One of the required fields was missing or blank once trimmed.
    MissingField(&'static str),
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

impl RegistrationValidationError {
    /// Name of the offending field, in the camelCase form the API documents.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MissingField(field) => field,
        }
    }
}

/// Validated registration input for a new partner account.
///
/// ## Invariants
/// - All five fields are non-blank; `email` is trimmed and lowercased so the
///   storage-level uniqueness constraint is effectively case-insensitive.
#[derive(Debug, Clone)]
pub struct Registration {
    name: String,
    email: String,
    tax_id: String,
    phone: String,
    password: Zeroizing<String>,
}

impl Registration {
    /// Build a registration from raw form fields, validating presence.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        tax_id: &str,
        phone: &str,
        password: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let name = non_blank(name, "name")?;
        let email = non_blank(email, "email")?.to_lowercase();
        let tax_id = non_blank(tax_id, "taxId")?;
        let phone = non_blank(phone, "phone")?;
        if password.is_empty() {
            return Err(RegistrationValidationError::MissingField("password"));
        }

        Ok(Self {
            name,
            email,
            tax_id,
            phone,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Partner display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalised email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// CPF/CNPJ tax identifier as typed (mask preserved).
    #[must_use]
    pub fn tax_id(&self) -> &str {
        &self.tax_id
    }

    /// Contact phone as typed.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Raw password, only ever read by the hashing port.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

fn non_blank(value: &str, field: &'static str) -> Result<String, RegistrationValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RegistrationValidationError::MissingField(field));
    }
    Ok(trimmed.to_owned())
}

/// Storage-facing record for inserting a new user.
///
/// Built by the account service after hashing; repositories persist it
/// verbatim and rely on the unique email index to reject duplicates.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub tax_id: String,
    pub phone: String,
    pub password_hash: String,
}
