//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountService, NotificationCommand, NotificationQuery, ProposalCommand, ProposalQuery,
};

/// Dependency bundle for HTTP handlers: one `Arc<dyn Port>` per use-case
/// family, so tests can wire memory-backed services in place of the
/// database-backed ones.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountService>,
    pub proposal_commands: Arc<dyn ProposalCommand>,
    pub proposal_queries: Arc<dyn ProposalQuery>,
    pub notification_queries: Arc<dyn NotificationQuery>,
    pub notification_commands: Arc<dyn NotificationCommand>,
}
