//! Proposal API handlers.
//!
//! ```text
//! POST /api/v1/proposals
//! GET  /api/v1/proposals?page&limit&ownerId&specialist&vehicleType
//! GET  /api/v1/proposals/{idOrCode}
//! PUT  /api/v1/proposals/{idOrCode} {"status":"approved"}
//! ```
//!
//! Get and update accept the internal UUID and the public `FIN-...` code
//! interchangeably in the path segment.

use actix_web::{HttpResponse, get, post, put, web};
use pagination::{PageRequest, PageRequestError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::{
    Error, NewProposal, Proposal, ProposalFilter, ProposalId, ProposalRef, ProposalStatus, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Proposal creation request body. Absent fields deserialise as empty so
/// the domain validation can name the missing field instead of a generic
/// JSON parse failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateProposalRequest {
    pub user_id: Option<UserId>,

    pub client_name: String,
    pub client_tax_id: String,
    pub client_phone: Option<String>,
    pub client_email: Option<String>,
    pub client_profession: Option<String>,
    pub client_income: Option<String>,
    pub client_postal_code: Option<String>,
    pub client_address: Option<String>,

    pub vehicle_type: String,
    pub vehicle_brand: Option<String>,
    pub vehicle_model: Option<String>,
    pub vehicle_year: Option<String>,
    pub vehicle_plate: Option<String>,
    pub vehicle_value: Option<String>,
    pub vehicle_condition: Option<String>,

    pub finance_value: Option<String>,
    pub down_payment: Option<String>,
    pub product_type: Option<String>,
    pub specialist: String,
}

impl From<CreateProposalRequest> for NewProposal {
    fn from(value: CreateProposalRequest) -> Self {
        Self {
            user_id: value.user_id,
            client_name: value.client_name,
            client_tax_id: value.client_tax_id,
            client_phone: value.client_phone,
            client_email: value.client_email,
            client_profession: value.client_profession,
            client_income: value.client_income,
            client_postal_code: value.client_postal_code,
            client_address: value.client_address,
            vehicle_type: value.vehicle_type,
            vehicle_brand: value.vehicle_brand,
            vehicle_model: value.vehicle_model,
            vehicle_year: value.vehicle_year,
            vehicle_plate: value.vehicle_plate,
            vehicle_value: value.vehicle_value,
            vehicle_condition: value.vehicle_condition,
            finance_value: value.finance_value,
            down_payment: value.down_payment,
            product_type: value.product_type,
            specialist: value.specialist,
        }
    }
}

/// Proposal creation response: the internal id plus the public code the
/// partner quotes to the client.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProposalResponse {
    pub success: bool,
    pub proposal_id: ProposalId,
    pub code: String,
}

/// Listing query parameters. Filters are mutually exclusive in practice;
/// when several are supplied, owner wins over specialist over vehicle type.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub owner_id: Option<UserId>,
    pub specialist: Option<String>,
    pub vehicle_type: Option<String>,
}

impl ListParams {
    fn filter(&self) -> ProposalFilter {
        if let Some(owner) = self.owner_id {
            ProposalFilter::Owner(owner)
        } else if let Some(name) = self.specialist.clone() {
            ProposalFilter::Specialist(name)
        } else if let Some(kind) = self.vehicle_type.clone() {
            ProposalFilter::VehicleType(kind)
        } else {
            ProposalFilter::All
        }
    }
}

/// Status update request body.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UpdateStatusRequest {
    /// One of `pending`, `approved`, `rejected`.
    pub status: String,
}

pub(super) fn map_page_error(err: PageRequestError) -> Error {
    let field = match err {
        PageRequestError::ZeroPage => "page",
        PageRequestError::ZeroLimit => "limit",
    };
    Error::invalid_input(err.to_string()).with_details(json!({ "field": field }))
}

/// Submit a new financing proposal; its status starts out pending.
#[utoipa::path(
    post,
    path = "/api/v1/proposals",
    request_body = CreateProposalRequest,
    responses(
        (status = 201, description = "Proposal created", body = CreateProposalResponse),
        (status = 400, description = "Missing required field or unknown owner", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["proposals"],
    operation_id = "createProposal"
)]
#[post("/proposals")]
pub async fn create_proposal(
    state: web::Data<HttpState>,
    payload: web::Json<CreateProposalRequest>,
) -> ApiResult<HttpResponse> {
    let proposal = state
        .proposal_commands
        .create(NewProposal::from(payload.into_inner()))
        .await?;
    info!(proposal_id = %proposal.id, code = %proposal.code, "proposal created");
    Ok(HttpResponse::Created().json(CreateProposalResponse {
        success: true,
        proposal_id: proposal.id,
        code: proposal.code,
    }))
}

/// List proposals, newest first, in a pagination envelope.
#[utoipa::path(
    get,
    path = "/api/v1/proposals",
    params(ListParams),
    responses(
        (status = 200, description = "One page of proposals with a pagination block"),
        (status = 400, description = "Invalid pagination parameters", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["proposals"],
    operation_id = "listProposals"
)]
#[get("/proposals")]
pub async fn list_proposals(
    state: web::Data<HttpState>,
    params: web::Query<ListParams>,
) -> ApiResult<HttpResponse> {
    let page = PageRequest::from_params(params.page, params.limit).map_err(map_page_error)?;
    let envelope = state.proposal_queries.list(params.filter(), page).await?;
    Ok(HttpResponse::Ok().json(envelope))
}

/// Fetch one proposal by internal id or public code.
#[utoipa::path(
    get,
    path = "/api/v1/proposals/{idOrCode}",
    params(("idOrCode" = String, Path, description = "Internal UUID or public FIN- code")),
    responses(
        (status = 200, description = "The proposal", body = Proposal),
        (status = 404, description = "No such proposal", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["proposals"],
    operation_id = "getProposal"
)]
#[get("/proposals/{idOrCode}")]
pub async fn get_proposal(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Proposal>> {
    let reference = ProposalRef::parse(&path);
    let proposal = state.proposal_queries.get(&reference).await?;
    Ok(web::Json(proposal))
}

/// Replace the status of a proposal.
#[utoipa::path(
    put,
    path = "/api/v1/proposals/{idOrCode}",
    params(("idOrCode" = String, Path, description = "Internal UUID or public FIN- code")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated"),
        (status = 400, description = "Unknown status value", body = Error),
        (status = 404, description = "No such proposal", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["proposals"],
    operation_id = "updateProposalStatus"
)]
#[put("/proposals/{idOrCode}")]
pub async fn update_proposal_status(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateStatusRequest>,
) -> ApiResult<HttpResponse> {
    let status: ProposalStatus = payload.status.parse().map_err(|err: crate::domain::InvalidStatus| {
        Error::invalid_input(err.to_string()).with_details(json!({ "field": "status" }))
    })?;
    let reference = ProposalRef::parse(&path);
    state
        .proposal_commands
        .update_status(&reference, status)
        .await?;
    info!(reference = %reference, status = %status, "proposal status updated");
    Ok(HttpResponse::Ok().json(json!({ "message": "status updated" })))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::ports::ProposalRepository;
    use crate::inbound::http::test_utils::{TestHarness, memory_state};
    use crate::outbound::persistence::MemoryStore;

    fn test_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().app_data(web::Data::new(state)).service(
            web::scope("/api/v1")
                .service(create_proposal)
                .service(list_proposals)
                .service(get_proposal)
                .service(update_proposal_status),
        )
    }

    async fn seed_owner(store: &MemoryStore) -> UserId {
        use crate::domain::NewUser;
        use crate::domain::ports::UserRepository;
        let user = UserRepository::create(
            store,
            NewUser {
                name: "Ana".into(),
                email: "ana@example.com".into(),
                tax_id: "123.456.789-00".into(),
                phone: "(85) 99999-0000".into(),
                password_hash: "$argon2id$stub".into(),
            },
        )
        .await
        .expect("owner seeded");
        user.id
    }

    fn proposal_body(owner: UserId) -> Value {
        json!({
            "userId": owner,
            "clientName": "Carlos Silva",
            "clientTaxId": "987.654.321-00",
            "clientIncome": "R$ 7.500,00",
            "vehicleType": "car",
            "vehicleValue": "R$ 95.000,00",
            "financeValue": "R$ 80.000,00",
            "specialist": "Marina"
        })
    }

    #[actix_web::test]
    async fn create_then_list_shows_pending_proposal_once() {
        let TestHarness { state, store } = memory_state();
        let owner = seed_owner(&store).await;
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/proposals")
            .set_json(proposal_body(owner))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: Value = actix_test::read_body_json(response).await;
        let code = created["code"].as_str().expect("code").to_owned();
        assert!(code.starts_with("FIN-"));

        let request = actix_test::TestRequest::get()
            .uri("/api/v1/proposals")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        let data = body["data"].as_array().expect("data array");
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["status"], "pending");
        assert_eq!(data[0]["code"], code);
        assert_eq!(body["pagination"]["total"], 1);
    }

    #[actix_web::test]
    async fn missing_client_name_is_named_and_nothing_persists() {
        let TestHarness { state, store } = memory_state();
        let owner = seed_owner(&store).await;
        let app = actix_test::init_service(test_app(state)).await;

        let mut body = proposal_body(owner);
        body["clientName"] = json!("");
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/proposals")
            .set_json(body)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["details"]["field"], "clientName");

        let (items, total) = store
            .list(&ProposalFilter::All, PageRequest::default())
            .await
            .expect("list");
        assert!(items.is_empty());
        assert_eq!(total, 0);
    }

    #[actix_web::test]
    async fn unknown_owner_is_rejected() {
        let TestHarness { state, .. } = memory_state();
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/proposals")
            .set_json(proposal_body(UserId::generate()))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["details"]["field"], "userId");
    }

    #[actix_web::test]
    async fn listing_pages_120_rows_into_three_pages() {
        let TestHarness { state, store } = memory_state();
        let owner = seed_owner(&store).await;
        for _ in 0..120 {
            ProposalRepository::create(
                &store,
                owner,
                NewProposal {
                    user_id: Some(owner),
                    client_name: "Carlos Silva".into(),
                    client_tax_id: "987.654.321-00".into(),
                    vehicle_type: "car".into(),
                    specialist: "Marina".into(),
                    ..NewProposal::default()
                },
            )
            .await
            .expect("seeded");
        }
        let app = actix_test::init_service(test_app(state)).await;

        for (page, expected_len) in [(1, 50), (2, 50), (3, 20)] {
            let request = actix_test::TestRequest::get()
                .uri(&format!("/api/v1/proposals?page={page}"))
                .to_request();
            let response = actix_test::call_service(&app, request).await;
            assert_eq!(response.status(), StatusCode::OK);
            let body: Value = actix_test::read_body_json(response).await;
            assert_eq!(body["data"].as_array().map(Vec::len), Some(expected_len));
            assert_eq!(body["pagination"]["pages"], 3);
            assert_eq!(body["pagination"]["total"], 120);
        }
    }

    #[rstest]
    #[case("page=0", "page")]
    #[case("limit=0", "limit")]
    #[actix_web::test]
    async fn zero_pagination_parameters_are_rejected(#[case] query: &str, #[case] field: &str) {
        let TestHarness { state, .. } = memory_state();
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::get()
            .uri(&format!("/api/v1/proposals?{query}"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["details"]["field"], field);
    }

    #[actix_web::test]
    async fn update_then_get_reads_the_new_status_by_code() {
        let TestHarness { state, store } = memory_state();
        let owner = seed_owner(&store).await;
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/proposals")
            .set_json(proposal_body(owner))
            .to_request();
        let created: Value =
            actix_test::read_body_json(actix_test::call_service(&app, request).await).await;
        let code = created["code"].as_str().expect("code");

        let request = actix_test::TestRequest::put()
            .uri(&format!("/api/v1/proposals/{code}"))
            .set_json(json!({"status": "approved"}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let request = actix_test::TestRequest::get()
            .uri(&format!("/api/v1/proposals/{code}"))
            .to_request();
        let body: Value =
            actix_test::read_body_json(actix_test::call_service(&app, request).await).await;
        assert_eq!(body["status"], "approved");
        // Formatted values round-trip unchanged.
        assert_eq!(body["clientIncome"], "R$ 7.500,00");
        assert_eq!(body["financeValue"], "R$ 80.000,00");
    }

    #[actix_web::test]
    async fn unknown_reference_is_not_found() {
        let TestHarness { state, .. } = memory_state();
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::put()
            .uri("/api/v1/proposals/FIN-00000000")
            .set_json(json!({"status": "rejected"}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn non_enumerated_status_is_rejected() {
        let TestHarness { state, .. } = memory_state();
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::put()
            .uri("/api/v1/proposals/FIN-00000000")
            .set_json(json!({"status": "archived"}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["details"]["field"], "status");
    }
}
