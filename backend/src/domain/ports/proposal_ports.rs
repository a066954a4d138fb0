//! Driving ports for proposal use-cases.

use async_trait::async_trait;
use pagination::{PageRequest, Paginated};

use crate::domain::error::Error;
use crate::domain::proposal::{
    NewProposal, Proposal, ProposalFilter, ProposalRef, ProposalStats, ProposalStatus,
};
use crate::domain::user::UserId;

/// Mutating proposal use-cases.
#[async_trait]
pub trait ProposalCommand: Send + Sync {
    /// Validate and persist a new proposal; status defaults to pending.
    async fn create(&self, proposal: NewProposal) -> Result<Proposal, Error>;

    /// Replace the status of the referenced proposal. Any enumerated status
    /// may replace any other; there is deliberately no transition graph.
    async fn update_status(
        &self,
        reference: &ProposalRef,
        status: ProposalStatus,
    ) -> Result<(), Error>;
}

/// Read-only proposal use-cases.
#[async_trait]
pub trait ProposalQuery: Send + Sync {
    /// One page of proposals for the filter, newest first, with the
    /// pagination envelope block.
    async fn list(
        &self,
        filter: ProposalFilter,
        page: PageRequest,
    ) -> Result<Paginated<Proposal>, Error>;

    /// One proposal by internal id or public code.
    async fn get(&self, reference: &ProposalRef) -> Result<Proposal, Error>;

    /// Per-owner dashboard status counts.
    async fn stats_for_owner(&self, owner: UserId) -> Result<ProposalStats, Error>;
}
