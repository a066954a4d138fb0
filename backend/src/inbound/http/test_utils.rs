//! Shared fixtures for HTTP handler tests.
//!
//! Wires the real domain services over the in-memory store so handler
//! tests exercise full request-to-storage behaviour without a database.

use std::sync::Arc;

use crate::domain::{NotificationService, PartnerAccountService, ProposalService};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::MemoryStore;
use crate::outbound::security::Argon2PasswordHasher;

/// A memory-backed state bundle plus the store itself for seeding.
pub struct TestHarness {
    pub state: HttpState,
    pub store: MemoryStore,
}

/// Build an `HttpState` over a fresh [`MemoryStore`].
pub fn memory_state() -> TestHarness {
    let store = MemoryStore::new();
    let repo = Arc::new(store.clone());
    let accounts = Arc::new(PartnerAccountService::new(
        Arc::clone(&repo),
        Arc::new(Argon2PasswordHasher),
    ));
    let proposals = Arc::new(ProposalService::new(Arc::clone(&repo), Arc::clone(&repo)));
    let notifications = Arc::new(NotificationService::new(Arc::clone(&repo)));

    let state = HttpState {
        accounts,
        proposal_commands: Arc::clone(&proposals) as Arc<dyn crate::domain::ports::ProposalCommand>,
        proposal_queries: proposals,
        notification_queries: Arc::clone(&notifications) as Arc<dyn crate::domain::ports::NotificationQuery>,
        notification_commands: notifications,
    };
    TestHarness { state, store }
}
