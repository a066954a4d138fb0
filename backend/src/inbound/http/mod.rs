//! HTTP inbound adapter exposing the REST endpoints.

pub mod accounts;
pub mod error;
pub mod health;
pub mod notifications;
pub mod proposals;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
