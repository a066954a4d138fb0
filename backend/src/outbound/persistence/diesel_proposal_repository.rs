//! PostgreSQL-backed `ProposalRepository` implementation using Diesel.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;

use crate::domain::ports::{ProposalPersistenceError, ProposalRepository};
use crate::domain::proposal::{
    NewProposal, Proposal, ProposalFilter, ProposalId, ProposalRef, ProposalStats, ProposalStatus,
};
use crate::domain::user::UserId;

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewProposalRow, ProposalRow};
use super::pool::DbPool;
use super::schema::proposals;

/// Diesel-backed implementation of the `ProposalRepository` port.
#[derive(Clone)]
pub struct DieselProposalRepository {
    pool: DbPool,
}

impl DieselProposalRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Apply the selection mode as a boxed query so listing and counting
    /// share one filter definition.
    fn filtered(filter: &ProposalFilter) -> proposals::BoxedQuery<'static, diesel::pg::Pg> {
        let query = proposals::table.into_boxed();
        match filter {
            ProposalFilter::All => query,
            ProposalFilter::Owner(owner) => {
                query.filter(proposals::user_id.eq(owner.as_uuid()))
            }
            ProposalFilter::Specialist(name) => {
                query.filter(proposals::specialist.eq(name.clone()))
            }
            ProposalFilter::VehicleType(kind) => {
                query.filter(proposals::vehicle_type.eq(kind.clone()))
            }
        }
    }
}

fn map_error(error: diesel::result::Error) -> ProposalPersistenceError {
    map_diesel_error(
        error,
        ProposalPersistenceError::query,
        ProposalPersistenceError::connection,
    )
}

fn clamped_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl ProposalRepository for DieselProposalRepository {
    async fn create(
        &self,
        owner: UserId,
        proposal: NewProposal,
    ) -> Result<Proposal, ProposalPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ProposalPersistenceError::connection))?;

        let id = ProposalId::generate();
        let row = NewProposalRow {
            id: id.as_uuid(),
            code: id.public_code(),
            user_id: owner.as_uuid(),
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
            status: ProposalStatus::Pending.as_str().to_owned(),
        };

        let inserted: ProposalRow = diesel::insert_into(proposals::table)
            .values(&row)
            .returning(ProposalRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_error)?;

        Ok(inserted.into_domain())
    }

    async fn list(
        &self,
        filter: &ProposalFilter,
        page: PageRequest,
    ) -> Result<(Vec<Proposal>, u64), ProposalPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ProposalPersistenceError::connection))?;

        let total: i64 = Self::filtered(filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_error)?;

        let rows: Vec<ProposalRow> = Self::filtered(filter)
            .order(proposals::created_at.desc())
            .limit(i64::from(page.limit()))
            .offset(clamped_i64(page.offset()))
            .select(ProposalRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_error)?;

        let items = rows.into_iter().map(ProposalRow::into_domain).collect();
        Ok((items, u64::try_from(total).unwrap_or(0)))
    }

    async fn find_by_ref(
        &self,
        reference: &ProposalRef,
    ) -> Result<Option<Proposal>, ProposalPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ProposalPersistenceError::connection))?;

        let row = match reference {
            ProposalRef::Id(id) => {
                proposals::table
                    .filter(proposals::id.eq(id.as_uuid()))
                    .select(ProposalRow::as_select())
                    .first(&mut conn)
                    .await
                    .optional()
            }
            ProposalRef::Code(code) => {
                proposals::table
                    .filter(proposals::code.eq(code))
                    .select(ProposalRow::as_select())
                    .first(&mut conn)
                    .await
                    .optional()
            }
        }
        .map_err(map_error)?;

        Ok(row.map(ProposalRow::into_domain))
    }

    async fn update_status(
        &self,
        reference: &ProposalRef,
        status: ProposalStatus,
    ) -> Result<u64, ProposalPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ProposalPersistenceError::connection))?;

        let changes = (
            proposals::status.eq(status.as_str()),
            proposals::updated_at.eq(Utc::now()),
        );

        let affected = match reference {
            ProposalRef::Id(id) => {
                diesel::update(proposals::table.filter(proposals::id.eq(id.as_uuid())))
                    .set(changes)
                    .execute(&mut conn)
                    .await
            }
            ProposalRef::Code(code) => {
                diesel::update(proposals::table.filter(proposals::code.eq(code)))
                    .set(changes)
                    .execute(&mut conn)
                    .await
            }
        }
        .map_err(map_error)?;

        Ok(affected as u64)
    }

    async fn stats_for_owner(
        &self,
        owner: UserId,
    ) -> Result<ProposalStats, ProposalPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ProposalPersistenceError::connection))?;

        let statuses: Vec<String> = proposals::table
            .filter(proposals::user_id.eq(owner.as_uuid()))
            .select(proposals::status)
            .load(&mut conn)
            .await
            .map_err(map_error)?;

        let mut stats = ProposalStats::default();
        for status in &statuses {
            stats.total += 1;
            match status.as_str() {
                "approved" => stats.approved += 1,
                "rejected" => stats.rejected += 1,
                _ => stats.pending += 1,
            }
        }
        Ok(stats)
    }
}
