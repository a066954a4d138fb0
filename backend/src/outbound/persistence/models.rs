//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Notification, NotificationId, Proposal, ProposalId, ProposalStatus, User, UserId,
};

use super::schema::{notifications, proposals, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub tax_id: String,
    pub phone: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::from_uuid(row.id),
            name: row.name,
            email: row.email,
            tax_id: row.tax_id,
            phone: row.phone,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub tax_id: &'a str,
    pub phone: &'a str,
    pub password_hash: &'a str,
}

/// Row struct for reading from the proposals table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = proposals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProposalRow {
    pub id: Uuid,
    pub code: String,
    pub user_id: Uuid,
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
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProposalRow {
    /// Convert to the domain entity. A status value outside the
    /// enumeration cannot be written through this crate; if one appears it
    /// is logged and read back as pending rather than crashing reads.
    pub(crate) fn into_domain(self) -> Proposal {
        let status = match self.status.parse::<ProposalStatus>() {
            Ok(status) => status,
            Err(err) => {
                tracing::warn!(proposal_id = %self.id, %err, "unrecognised status in storage");
                ProposalStatus::Pending
            }
        };
        Proposal {
            id: ProposalId::from_uuid(self.id),
            code: self.code,
            user_id: UserId::from_uuid(self.user_id),
            client_name: self.client_name,
            client_tax_id: self.client_tax_id,
            client_phone: self.client_phone,
            client_email: self.client_email,
            client_profession: self.client_profession,
            client_income: self.client_income,
            client_postal_code: self.client_postal_code,
            client_address: self.client_address,
            vehicle_type: self.vehicle_type,
            vehicle_brand: self.vehicle_brand,
            vehicle_model: self.vehicle_model,
            vehicle_year: self.vehicle_year,
            vehicle_plate: self.vehicle_plate,
            vehicle_value: self.vehicle_value,
            vehicle_condition: self.vehicle_condition,
            finance_value: self.finance_value,
            down_payment: self.down_payment,
            product_type: self.product_type,
            specialist: self.specialist,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Insertable struct for creating new proposal records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = proposals)]
pub(crate) struct NewProposalRow {
    pub id: Uuid,
    pub code: String,
    pub user_id: Uuid,
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
    pub status: String,
}

/// Row struct for reading from the notifications table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NotificationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Self {
            id: NotificationId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            message: row.message,
            read: row.read,
            created_at: row.created_at,
        }
    }
}
