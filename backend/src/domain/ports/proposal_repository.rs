//! Port abstraction for proposal persistence adapters and their errors.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::proposal::{
    NewProposal, Proposal, ProposalFilter, ProposalRef, ProposalStats, ProposalStatus,
};
use crate::domain::user::UserId;

/// Persistence errors raised by proposal repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProposalPersistenceError {
    /// Repository connection could not be established.
    #[error("proposal repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("proposal repository query failed: {message}")]
    Query { message: String },
}

impl ProposalPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Driven port for proposal persistence.
///
/// Listing order is creation time descending in every mode. Writes touch
/// only the named row; there are no cascades and no delete operation.
#[async_trait]
pub trait ProposalRepository: Send + Sync {
    /// Insert a validated proposal with pending status and return the
    /// stored row.
    async fn create(
        &self,
        owner: UserId,
        proposal: NewProposal,
    ) -> Result<Proposal, ProposalPersistenceError>;

    /// Serve one page of proposals for the filter, plus the total match
    /// count across all pages.
    async fn list(
        &self,
        filter: &ProposalFilter,
        page: PageRequest,
    ) -> Result<(Vec<Proposal>, u64), ProposalPersistenceError>;

    /// Fetch one proposal by internal id or public code.
    async fn find_by_ref(
        &self,
        reference: &ProposalRef,
    ) -> Result<Option<Proposal>, ProposalPersistenceError>;

    /// Single-statement status update stamping `updated_at`; returns the
    /// number of rows that matched the reference.
    async fn update_status(
        &self,
        reference: &ProposalRef,
        status: ProposalStatus,
    ) -> Result<u64, ProposalPersistenceError>;

    /// Status counts for one owner's proposals.
    async fn stats_for_owner(&self, owner: UserId)
    -> Result<ProposalStats, ProposalPersistenceError>;
}
