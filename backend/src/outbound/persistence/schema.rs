//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`
//! exactly; Diesel uses them for compile-time query validation.

diesel::table! {
    /// Partner user accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Partner display name.
        name -> Varchar,
        /// Lowercased email; carries a unique index.
        email -> Varchar,
        /// CPF/CNPJ tax identifier as typed.
        tax_id -> Varchar,
        /// Contact phone as typed.
        phone -> Varchar,
        /// Argon2id PHC hash string.
        password_hash -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Financing proposals, one row per form submission.
    proposals (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Public-facing code, unique, derived from the id at creation.
        code -> Varchar,
        /// Owning partner user.
        user_id -> Uuid,
        client_name -> Varchar,
        client_tax_id -> Varchar,
        client_phone -> Nullable<Varchar>,
        client_email -> Nullable<Varchar>,
        client_profession -> Nullable<Varchar>,
        client_income -> Nullable<Varchar>,
        client_postal_code -> Nullable<Varchar>,
        client_address -> Nullable<Varchar>,
        vehicle_type -> Varchar,
        vehicle_brand -> Nullable<Varchar>,
        vehicle_model -> Nullable<Varchar>,
        vehicle_year -> Nullable<Varchar>,
        vehicle_plate -> Nullable<Varchar>,
        vehicle_value -> Nullable<Varchar>,
        vehicle_condition -> Nullable<Varchar>,
        finance_value -> Nullable<Varchar>,
        down_payment -> Nullable<Varchar>,
        product_type -> Nullable<Varchar>,
        /// Assigned staff specialist.
        specialist -> Varchar,
        /// One of `pending`, `approved`, `rejected`.
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Partner dashboard notifications.
    notifications (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning partner user.
        user_id -> Uuid,
        /// Human-readable payload text.
        message -> Text,
        /// Read flag; set once, never reverted.
        read -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(proposals -> users (user_id));
diesel::joinable!(notifications -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, proposals, notifications);
