//! Per-partner API handlers.
//!
//! ```text
//! GET /api/v1/users/{userId}/proposals
//! GET /api/v1/users/{userId}/dashboard
//! ```
//!
//! These power the partner dashboard: the partner's own proposals and the
//! per-status counts. An unknown owner yields an empty list and zeroed
//! counts, never an error.

use actix_web::{get, web};
use pagination::{MAX_LIMIT, PageRequest};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Error, Proposal, ProposalFilter, ProposalStats, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::proposals::map_page_error;
use crate::inbound::http::state::HttpState;

/// The partner's own proposals, newest first.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct OwnerProposalsResponse {
    pub proposals: Vec<Proposal>,
}

/// List the proposals owned by one partner.
#[utoipa::path(
    get,
    path = "/api/v1/users/{userId}/proposals",
    params(("userId" = Uuid, Path, description = "Owning partner id")),
    responses(
        (status = 200, description = "The partner's proposals", body = OwnerProposalsResponse),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "listOwnerProposals"
)]
#[get("/users/{userId}/proposals")]
pub async fn owner_proposals(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<OwnerProposalsResponse>> {
    let owner = UserId::from_uuid(path.into_inner());
    let page = PageRequest::from_params(None, Some(MAX_LIMIT)).map_err(map_page_error)?;
    let envelope = state
        .proposal_queries
        .list(ProposalFilter::Owner(owner), page)
        .await?;
    Ok(web::Json(OwnerProposalsResponse {
        proposals: envelope.data,
    }))
}

/// Per-status proposal counts for the partner dashboard.
#[utoipa::path(
    get,
    path = "/api/v1/users/{userId}/dashboard",
    params(("userId" = Uuid, Path, description = "Owning partner id")),
    responses(
        (status = 200, description = "Status counts", body = ProposalStats),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "dashboardStats"
)]
#[get("/users/{userId}/dashboard")]
pub async fn dashboard_stats(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<ProposalStats>> {
    let owner = UserId::from_uuid(path.into_inner());
    let stats = state.proposal_queries.stats_for_owner(owner).await?;
    Ok(web::Json(stats))
}
