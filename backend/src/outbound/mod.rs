//! Driven adapters: implementations of the domain's outbound ports.

pub mod persistence;
pub mod security;
