//! Proposal domain service: creation, listing, status updates, and
//! per-owner dashboard statistics.
//!
//! Implements the [`ProposalCommand`] and [`ProposalQuery`] driving ports.
//! Business rules live here, written once; the repository adapters behind
//! the port only move rows.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{PageRequest, Paginated};
use serde_json::json;
use tracing::debug;

use crate::domain::error::Error;
use crate::domain::ports::{
    ProposalCommand, ProposalPersistenceError, ProposalQuery, ProposalRepository,
    UserPersistenceError, UserRepository,
};
use crate::domain::proposal::{
    NewProposal, Proposal, ProposalFilter, ProposalRef, ProposalStats, ProposalStatus,
};
use crate::domain::user::UserId;

/// Proposal service over the proposal and user repositories.
///
/// The user repository is only consulted to reject proposals for unknown
/// owners; it is never mutated here.
#[derive(Clone)]
pub struct ProposalService<P, U> {
    proposals: Arc<P>,
    users: Arc<U>,
}

impl<P, U> ProposalService<P, U> {
    /// Create a new service with the given repositories.
    pub fn new(proposals: Arc<P>, users: Arc<U>) -> Self {
        Self { proposals, users }
    }
}

fn map_proposal_persistence_error(error: ProposalPersistenceError) -> Error {
    match error {
        ProposalPersistenceError::Connection { message } => Error::service_unavailable(message),
        ProposalPersistenceError::Query { message } => Error::internal(message),
    }
}

fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        // The user repository is read-only from this service.
        UserPersistenceError::DuplicateEmail => {
            Error::internal("unexpected duplicate email on read")
        }
    }
}

#[async_trait]
impl<P, U> ProposalCommand for ProposalService<P, U>
where
    P: ProposalRepository,
    U: UserRepository,
{
    async fn create(&self, proposal: NewProposal) -> Result<Proposal, Error> {
        let owner = proposal.validate().map_err(|err| {
            Error::invalid_input(err.to_string())
                .with_details(json!({ "field": err.field, "code": "missing_field" }))
        })?;

        let owner_exists = self
            .users
            .find_by_id(owner)
            .await
            .map_err(map_user_persistence_error)?
            .is_some();
        if !owner_exists {
            return Err(Error::invalid_input("unknown proposal owner")
                .with_details(json!({ "field": "userId", "code": "unknown_user" })));
        }

        let created = self
            .proposals
            .create(owner, proposal)
            .await
            .map_err(map_proposal_persistence_error)?;

        debug!(proposal_id = %created.id, code = %created.code, "proposal created");
        Ok(created)
    }

    async fn update_status(
        &self,
        reference: &ProposalRef,
        status: ProposalStatus,
    ) -> Result<(), Error> {
        let affected = self
            .proposals
            .update_status(reference, status)
            .await
            .map_err(map_proposal_persistence_error)?;

        if affected == 0 {
            return Err(Error::not_found(format!("proposal {reference} not found")));
        }

        debug!(%reference, %status, "proposal status updated");
        Ok(())
    }
}

#[async_trait]
impl<P, U> ProposalQuery for ProposalService<P, U>
where
    P: ProposalRepository,
    U: UserRepository,
{
    async fn list(
        &self,
        filter: ProposalFilter,
        page: PageRequest,
    ) -> Result<Paginated<Proposal>, Error> {
        let (items, total) = self
            .proposals
            .list(&filter, page)
            .await
            .map_err(map_proposal_persistence_error)?;
        Ok(Paginated::new(items, page, total))
    }

    async fn get(&self, reference: &ProposalRef) -> Result<Proposal, Error> {
        self.proposals
            .find_by_ref(reference)
            .await
            .map_err(map_proposal_persistence_error)?
            .ok_or_else(|| Error::not_found(format!("proposal {reference} not found")))
    }

    async fn stats_for_owner(&self, owner: UserId) -> Result<ProposalStats, Error> {
        self.proposals
            .stats_for_owner(owner)
            .await
            .map_err(map_proposal_persistence_error)
    }
}
