//! Driving adapters: entry points that call into the domain ports.

pub mod http;
