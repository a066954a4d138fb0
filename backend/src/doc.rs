//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] aggregates every HTTP endpoint and the schemas their bodies
//! reference. Debug builds serve the generated document as JSON at
//! `/api-docs/openapi.json`.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, Notification, Proposal, ProposalStats, ProposalStatus, User};
use crate::inbound::http::accounts::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
};
use crate::inbound::http::notifications::NotificationsResponse;
use crate::inbound::http::proposals::{
    CreateProposalRequest, CreateProposalResponse, UpdateStatusRequest,
};
use crate::inbound::http::users::OwnerProposalsResponse;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vehicle financing brokerage API",
        description = "Partner accounts, financing proposals, and notifications."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::proposals::create_proposal,
        crate::inbound::http::proposals::list_proposals,
        crate::inbound::http::proposals::get_proposal,
        crate::inbound::http::proposals::update_proposal_status,
        crate::inbound::http::users::owner_proposals,
        crate::inbound::http::users::dashboard_stats,
        crate::inbound::http::notifications::list_notifications,
        crate::inbound::http::notifications::mark_notification_read,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        Proposal,
        ProposalStatus,
        ProposalStats,
        Notification,
        RegisterRequest,
        RegisterResponse,
        LoginRequest,
        LoginResponse,
        CreateProposalRequest,
        CreateProposalResponse,
        UpdateStatusRequest,
        OwnerProposalsResponse,
        NotificationsResponse,
    )),
    tags(
        (name = "accounts", description = "Partner registration and login"),
        (name = "proposals", description = "Financing proposal submission and review"),
        (name = "users", description = "Per-partner listings and dashboard"),
        (name = "notifications", description = "Partner notifications"),
        (name = "health", description = "Probes for orchestration")
    )
)]
pub struct ApiDoc;
