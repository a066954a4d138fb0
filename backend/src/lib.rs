//! Vehicle financing brokerage backend.
//!
//! Hexagonal layout: `domain` holds the entities, ports, and services;
//! `inbound::http` adapts them to REST; `outbound` provides the Diesel and
//! in-memory persistence adapters plus password hashing; `server` wires it
//! all together.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by tooling.
pub use doc::ApiDoc;
