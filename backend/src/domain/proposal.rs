//! Financing proposal entity, status enumeration, and query types.
//!
//! A proposal is one submission of the partner's financing form: client
//! data, vehicle data, and financing terms. Monetary and document values
//! are carried as the client-formatted strings the form produced; the
//! backend never re-interprets them, so they round-trip unchanged.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserId;

/// Identifier of a proposal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(transparent)]
pub struct ProposalId(Uuid);

impl ProposalId {
    /// Wrap an existing identifier.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a fresh v4 identifier for a new proposal.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Derive the public-facing proposal code, e.g. `FIN-9F3A2C18`.
    ///
    /// The code is what partners quote over the phone; get and update
    /// operations accept it interchangeably with the internal id.
    #[must_use]
    pub fn public_code(&self) -> String {
        let simple = self.0.simple().to_string();
        let prefix: String = simple.chars().take(8).collect();
        format!("FIN-{}", prefix.to_uppercase())
    }
}

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Review status of a proposal. Exactly three values exist; anything else
/// inbound is rejected rather than stored.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    /// Awaiting review; the default at creation.
    Pending,
    /// Approved by the assigned specialist.
    Approved,
    /// Rejected by the assigned specialist.
    Rejected,
}

impl ProposalStatus {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when an inbound status value is not one of the three
/// enumerated values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("status must be one of pending, approved, rejected (got {value})")]
pub struct InvalidStatus {
    /// The offending inbound value.
    pub value: String,
}

impl FromStr for ProposalStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(InvalidStatus {
                value: other.to_owned(),
            }),
        }
    }
}

/// A submitted financing proposal.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: ProposalId,
    /// Public-facing code partners quote, derived from the id at creation.
    pub code: String,
    /// Owning partner user.
    pub user_id: UserId,

    pub client_name: String,
    pub client_tax_id: String,
    pub client_phone: Option<String>,
    pub client_email: Option<String>,
    pub client_profession: Option<String>,
    pub client_income: Option<String>,
    pub client_postal_code: Option<String>,
    pub client_address: Option<String>,

    pub vehicle_type: String,
    pub vehicle_brand: Option<String>,
    pub vehicle_model: Option<String>,
    pub vehicle_year: Option<String>,
    pub vehicle_plate: Option<String>,
    pub vehicle_value: Option<String>,
    pub vehicle_condition: Option<String>,

    pub finance_value: Option<String>,
    pub down_payment: Option<String>,
    pub product_type: Option<String>,
    /// Staff specialist assigned to handle the proposal.
    pub specialist: String,

    pub status: ProposalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validation failures raised while checking a [`NewProposal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProposalValidationError {
    /// Name of the missing required field, in the API's camelCase form.
    pub field: &'static str,
}

impl fmt::Display for ProposalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "missing required field: {}", self.field)
    }
}

impl std::error::Error for ProposalValidationError {}

/// Input for creating a proposal. Status is not part of the input: every
/// proposal starts out pending.
#[derive(Debug, Clone, Default)]
pub struct NewProposal {
    pub user_id: Option<UserId>,

    pub client_name: String,
    pub client_tax_id: String,
    pub client_phone: Option<String>,
    pub client_email: Option<String>,
    pub client_profession: Option<String>,
    pub client_income: Option<String>,
    pub client_postal_code: Option<String>,
    pub client_address: Option<String>,

    pub vehicle_type: String,
    pub vehicle_brand: Option<String>,
    pub vehicle_model: Option<String>,
    pub vehicle_year: Option<String>,
    pub vehicle_plate: Option<String>,
    pub vehicle_value: Option<String>,
    pub vehicle_condition: Option<String>,

    pub finance_value: Option<String>,
    pub down_payment: Option<String>,
    pub product_type: Option<String>,
    pub specialist: String,
}

impl NewProposal {
    /// Check the required-field set, naming the first missing field.
    pub fn validate(&self) -> Result<UserId, ProposalValidationError> {
        let user_id = self
            .user_id
            .ok_or(ProposalValidationError { field: "userId" })?;
        for (value, field) in [
            (&self.client_name, "clientName"),
            (&self.client_tax_id, "clientTaxId"),
            (&self.vehicle_type, "vehicleType"),
            (&self.specialist, "specialist"),
        ] {
            if value.trim().is_empty() {
                return Err(ProposalValidationError { field });
            }
        }
        Ok(user_id)
    }
}

/// Reference to a proposal as supplied by a caller: either the internal id
/// or the public code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProposalRef {
    /// Internal UUID.
    Id(ProposalId),
    /// Public `FIN-...` code.
    Code(String),
}

impl ProposalRef {
    /// Interpret a raw path segment. Values that parse as UUIDs match the
    /// internal id; anything else is treated as a public code.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match Uuid::parse_str(raw) {
            Ok(id) => Self::Id(ProposalId::from_uuid(id)),
            Err(_) => Self::Code(raw.to_owned()),
        }
    }
}

impl fmt::Display for ProposalRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Code(code) => f.write_str(code),
        }
    }
}

/// Selection mode for listing proposals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProposalFilter {
    /// Every proposal, newest first.
    All,
    /// Proposals owned by one partner.
    Owner(UserId),
    /// Proposals assigned to one specialist.
    Specialist(String),
    /// Proposals for one vehicle type.
    VehicleType(String),
}

/// Per-owner dashboard aggregation. A pure read; computing it never
/// mutates storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProposalStats {
    pub total: u64,
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("pending", ProposalStatus::Pending)]
    #[case("approved", ProposalStatus::Approved)]
    #[case("rejected", ProposalStatus::Rejected)]
    fn status_parses_enumerated_values(#[case] raw: &str, #[case] expected: ProposalStatus) {
        assert_eq!(raw.parse::<ProposalStatus>(), Ok(expected));
    }

    #[rstest]
    #[case("archived")]
    #[case("PENDING")]
    #[case("")]
    fn status_rejects_anything_else(#[case] raw: &str) {
        let err = raw.parse::<ProposalStatus>().expect_err("must reject");
        assert_eq!(err.value, raw);
    }

    #[rstest]
    fn public_code_is_stable_and_prefixed() {
        let id = ProposalId::generate();
        let code = id.public_code();
        assert!(code.starts_with("FIN-"));
        assert_eq!(code.len(), 12);
        assert_eq!(code, id.public_code());
    }

    #[rstest]
    fn refs_distinguish_ids_from_codes() {
        let id = ProposalId::generate();
        assert_eq!(ProposalRef::parse(&id.to_string()), ProposalRef::Id(id));
        assert_eq!(
            ProposalRef::parse("FIN-9F3A2C18"),
            ProposalRef::Code("FIN-9F3A2C18".to_owned())
        );
    }

    fn minimal_proposal() -> NewProposal {
        NewProposal {
            user_id: Some(UserId::generate()),
            client_name: "Carlos Silva".into(),
            client_tax_id: "123.456.789-00".into(),
            vehicle_type: "car".into(),
            specialist: "Marina".into(),
            ..NewProposal::default()
        }
    }

    #[rstest]
    fn minimal_required_set_validates() {
        minimal_proposal().validate().expect("must validate");
    }

    #[rstest]
    #[case("clientName")]
    #[case("clientTaxId")]
    #[case("vehicleType")]
    #[case("specialist")]
    fn missing_required_fields_are_named(#[case] field: &str) {
        let mut input = minimal_proposal();
        match field {
            "clientName" => input.client_name.clear(),
            "clientTaxId" => input.client_tax_id.clear(),
            "vehicleType" => input.vehicle_type.clear(),
            _ => input.specialist.clear(),
        }
        let err = input.validate().expect_err("must fail");
        assert_eq!(err.field, field);
    }

    #[rstest]
    fn missing_owner_is_named_first() {
        let mut input = minimal_proposal();
        input.user_id = None;
        let err = input.validate().expect_err("must fail");
        assert_eq!(err.field, "userId");
    }
}
