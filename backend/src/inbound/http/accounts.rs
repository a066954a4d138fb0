//! Partner account API handlers.
//!
//! ```text
//! POST /api/v1/auth/register {"name":...,"email":...,"taxId":...,"phone":...,"password":...}
//! POST /api/v1/auth/login {"email":...,"password":...}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::{
    Error, LoginCredentials, LoginValidationError, Registration, RegistrationValidationError,
    User, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Registration request body for `POST /api/v1/auth/register`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub tax_id: String,
    pub phone: String,
    pub password: String,
}

/// Registration response: the id the partner logs in against.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub success: bool,
    pub user_id: UserId,
}

/// Login request body for `POST /api/v1/auth/login`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response carrying the authenticated user without password material.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub user: User,
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = RegistrationValidationError;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            &value.name,
            &value.email,
            &value.tax_id,
            &value.phone,
            &value.password,
        )
    }
}

fn map_registration_validation_error(err: RegistrationValidationError) -> Error {
    Error::invalid_input(err.to_string())
        .with_details(json!({ "field": err.field(), "code": "missing_field" }))
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => Error::invalid_input("email must not be empty")
            .with_details(json!({ "field": "email", "code": "empty_email" })),
        LoginValidationError::EmptyPassword => Error::invalid_input("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Register a new partner account.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Missing required field", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "register"
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration =
        Registration::try_from(payload.into_inner()).map_err(map_registration_validation_error)?;
    let user_id = state.accounts.register(registration).await?;
    info!(%user_id, "partner registered");
    Ok(HttpResponse::Created().json(RegisterResponse {
        success: true,
        user_id,
    }))
}

/// Authenticate a partner by email and password.
///
/// Unknown email and wrong password produce the identical generic 401 so
/// the endpoint cannot be used to probe which emails exist.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "login"
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from_parts(&payload.email, &payload.password)
        .map_err(map_login_validation_error)?;
    let user = state.accounts.authenticate(&credentials).await?;
    Ok(HttpResponse::Ok().json(LoginResponse {
        success: true,
        user,
    }))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::inbound::http::test_utils::memory_state;

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
        App::new()
            .app_data(web::Data::new(state))
            .service(web::scope("/api/v1").service(register).service(login))
    }

    fn register_body(email: &str) -> Value {
        json!({
            "name": "Ana Souza",
            "email": email,
            "taxId": "123.456.789-00",
            "phone": "(85) 99999-0000",
            "password": "s3cret"
        })
    }

    #[actix_web::test]
    async fn register_returns_created_with_user_id() {
        let harness = memory_state();
        let app = actix_test::init_service(test_app(harness.state)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_body("ana@example.com"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("success").and_then(Value::as_bool), Some(true));
        assert!(body.get("userId").and_then(Value::as_str).is_some());
    }

    #[actix_web::test]
    async fn duplicate_email_conflicts() {
        let harness = memory_state();
        let app = actix_test::init_service(test_app(harness.state)).await;

        for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
            let request = actix_test::TestRequest::post()
                .uri("/api/v1/auth/register")
                .set_json(register_body("ana@example.com"))
                .to_request();
            let response = actix_test::call_service(&app, request).await;
            assert_eq!(response.status(), expected);
        }
    }

    #[rstest]
    #[case(json!({"name":"", "email":"a@b.c", "taxId":"1", "phone":"5", "password":"pw"}), "name")]
    #[case(json!({"name":"Ana", "email":"a@b.c", "taxId":" ", "phone":"5", "password":"pw"}), "taxId")]
    #[case(json!({"name":"Ana", "email":"a@b.c", "taxId":"1", "phone":"5", "password":""}), "password")]
    #[actix_web::test]
    async fn register_names_the_missing_field(#[case] body: Value, #[case] field: &str) {
        let harness = memory_state();
        let app = actix_test::init_service(test_app(harness.state)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(body)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["code"], "invalid_input");
        assert_eq!(value["details"]["field"], field);
    }

    #[actix_web::test]
    async fn login_succeeds_and_omits_password_hash() {
        let harness = memory_state();
        let app = actix_test::init_service(test_app(harness.state)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_body("Ana@Example.com"))
            .to_request();
        assert!(actix_test::call_service(&app, request).await.status().is_success());

        // Login uses a different case; email comparison is case-insensitive.
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({"email": "ana@example.com", "password": "s3cret"}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["user"]["email"], "ana@example.com");
        assert!(body["user"].get("passwordHash").is_none());
    }

    #[rstest]
    #[case("nobody@example.com", "s3cret")]
    #[case("ana@example.com", "wrong")]
    #[actix_web::test]
    async fn unknown_email_and_wrong_password_are_indistinguishable(
        #[case] email: &str,
        #[case] password: &str,
    ) {
        let harness = memory_state();
        let app = actix_test::init_service(test_app(harness.state)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_body("ana@example.com"))
            .to_request();
        assert!(actix_test::call_service(&app, request).await.status().is_success());

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({"email": email, "password": password}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["message"], "incorrect email or password");
    }
}
