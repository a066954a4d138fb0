//! In-memory adapter implementing all three repository ports.
//!
//! This is the consolidated descendant of the original deployment's
//! browser-local fallback store: the same entity rules applied to a local
//! map instead of a database. The server selects it when no database is
//! configured (degraded-but-functional mode, nothing survives a restart)
//! and the test suites use it as a deterministic double.
//!
//! All operations take one mutex; email uniqueness is checked and the row
//! inserted under the same guard, so racing registrations resolve inside
//! the store exactly as the database's unique index would.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use pagination::PageRequest;

use crate::domain::notification::{Notification, NotificationId};
use crate::domain::ports::{
    NotificationPersistenceError, NotificationRepository, ProposalPersistenceError,
    ProposalRepository, UserPersistenceError, UserRepository,
};
use crate::domain::proposal::{
    NewProposal, Proposal, ProposalFilter, ProposalId, ProposalRef, ProposalStats, ProposalStatus,
};
use crate::domain::user::{NewUser, User, UserId};

#[derive(Default)]
struct State {
    users: Vec<User>,
    proposals: Vec<(u64, Proposal)>,
    notifications: Vec<(u64, Notification)>,
    sequence: u64,
}

impl State {
    fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }
}

/// Shared in-memory store; cheap to clone, all clones see the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A poisoned lock means a panic mid-mutation; the store is test
        // and fallback infrastructure, so recover the guard and carry on.
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Seed a notification, used by tests and the degraded-mode bootstrap.
    pub fn insert_notification(&self, user: UserId, message: &str) -> Notification {
        let mut state = self.lock();
        let sequence = state.next_sequence();
        let notification = Notification {
            id: NotificationId::generate(),
            user_id: user,
            message: message.to_owned(),
            read: false,
            created_at: Utc::now(),
        };
        state.notifications.push((sequence, notification.clone()));
        notification
    }
}

fn matches_filter(filter: &ProposalFilter, proposal: &Proposal) -> bool {
    match filter {
        ProposalFilter::All => true,
        ProposalFilter::Owner(owner) => proposal.user_id == *owner,
        ProposalFilter::Specialist(name) => proposal.specialist == *name,
        ProposalFilter::VehicleType(kind) => proposal.vehicle_type == *kind,
    }
}

fn matches_ref(reference: &ProposalRef, proposal: &Proposal) -> bool {
    match reference {
        ProposalRef::Id(id) => proposal.id == *id,
        ProposalRef::Code(code) => proposal.code == *code,
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: NewUser) -> Result<User, UserPersistenceError> {
        let mut state = self.lock();
        if state.users.iter().any(|existing| existing.email == user.email) {
            return Err(UserPersistenceError::DuplicateEmail);
        }
        let now = Utc::now();
        let stored = User {
            id: UserId::generate(),
            name: user.name,
            email: user.email,
            tax_id: user.tax_id,
            phone: user.phone,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        state.users.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock().users.iter().find(|user| user.id == id).cloned())
    }
}

#[async_trait]
impl ProposalRepository for MemoryStore {
    async fn create(
        &self,
        owner: UserId,
        proposal: NewProposal,
    ) -> Result<Proposal, ProposalPersistenceError> {
        let mut state = self.lock();
        let sequence = state.next_sequence();
        let id = ProposalId::generate();
        let now = Utc::now();
        let stored = Proposal {
            id,
            code: id.public_code(),
            user_id: owner,
            client_name: proposal.client_name,
            client_tax_id: proposal.client_tax_id,
            client_phone: proposal.client_phone,
            client_email: proposal.client_email,
            client_profession: proposal.client_profession,
            client_income: proposal.client_income,
            client_postal_code: proposal.client_postal_code,
            client_address: proposal.client_address,
            vehicle_type: proposal.vehicle_type,
            vehicle_brand: proposal.vehicle_brand,
            vehicle_model: proposal.vehicle_model,
            vehicle_year: proposal.vehicle_year,
            vehicle_plate: proposal.vehicle_plate,
            vehicle_value: proposal.vehicle_value,
            vehicle_condition: proposal.vehicle_condition,
            finance_value: proposal.finance_value,
            down_payment: proposal.down_payment,
            product_type: proposal.product_type,
            specialist: proposal.specialist,
            status: ProposalStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        state.proposals.push((sequence, stored.clone()));
        Ok(stored)
    }

    async fn list(
        &self,
        filter: &ProposalFilter,
        page: PageRequest,
    ) -> Result<(Vec<Proposal>, u64), ProposalPersistenceError> {
        let state = self.lock();
        // Insertion sequence breaks created-at ties, so "newest first" is
        // deterministic even within one timestamp tick.
        let mut matched: Vec<&(u64, Proposal)> = state
            .proposals
            .iter()
            .filter(|(_, proposal)| matches_filter(filter, proposal))
            .collect();
        matched.sort_by(|a, b| (b.1.created_at, b.0).cmp(&(a.1.created_at, a.0)));

        let total = matched.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let items = matched
            .into_iter()
            .skip(offset)
            .take(page.limit() as usize)
            .map(|(_, proposal)| proposal.clone())
            .collect();
        Ok((items, total))
    }

    async fn find_by_ref(
        &self,
        reference: &ProposalRef,
    ) -> Result<Option<Proposal>, ProposalPersistenceError> {
        Ok(self
            .lock()
            .proposals
            .iter()
            .find(|(_, proposal)| matches_ref(reference, proposal))
            .map(|(_, proposal)| proposal.clone()))
    }

    async fn update_status(
        &self,
        reference: &ProposalRef,
        status: ProposalStatus,
    ) -> Result<u64, ProposalPersistenceError> {
        let mut state = self.lock();
        let mut affected = 0;
        for (_, proposal) in &mut state.proposals {
            if matches_ref(reference, proposal) {
                proposal.status = status;
                proposal.updated_at = Utc::now();
                affected += 1;
            }
        }
        Ok(affected)
    }

    async fn stats_for_owner(
        &self,
        owner: UserId,
    ) -> Result<ProposalStats, ProposalPersistenceError> {
        let state = self.lock();
        let mut stats = ProposalStats::default();
        for (_, proposal) in state
            .proposals
            .iter()
            .filter(|(_, proposal)| proposal.user_id == owner)
        {
            stats.total += 1;
            match proposal.status {
                ProposalStatus::Pending => stats.pending += 1,
                ProposalStatus::Approved => stats.approved += 1,
                ProposalStatus::Rejected => stats.rejected += 1,
            }
        }
        Ok(stats)
    }
}

#[async_trait]
impl NotificationRepository for MemoryStore {
    async fn list_for_user(
        &self,
        user: UserId,
        unread_only: bool,
    ) -> Result<Vec<Notification>, NotificationPersistenceError> {
        let state = self.lock();
        let mut matched: Vec<&(u64, Notification)> = state
            .notifications
            .iter()
            .filter(|(_, notification)| {
                notification.user_id == user && (!unread_only || !notification.read)
            })
            .collect();
        matched.sort_by(|a, b| (b.1.created_at, b.0).cmp(&(a.1.created_at, a.0)));
        Ok(matched
            .into_iter()
            .map(|(_, notification)| notification.clone())
            .collect())
    }

    async fn mark_read(
        &self,
        id: NotificationId,
    ) -> Result<u64, NotificationPersistenceError> {
        let mut state = self.lock();
        let mut affected = 0;
        for (_, notification) in &mut state.notifications {
            if notification.id == id {
                notification.read = true;
                affected += 1;
            }
        }
        Ok(affected)
    }
}
