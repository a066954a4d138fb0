//! Notification API handlers.
//!
//! ```text
//! GET /api/v1/users/{userId}/notifications?unreadOnly=true
//! PUT /api/v1/notifications/{id}/read
//! ```

use actix_web::{HttpResponse, get, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, Notification, NotificationId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Notification listing query parameters.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct NotificationParams {
    /// When true, only notifications not yet marked read are returned.
    pub unread_only: Option<bool>,
}

/// Notification listing response.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct NotificationsResponse {
    pub notifications: Vec<Notification>,
}

/// List a partner's notifications, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/users/{userId}/notifications",
    params(
        ("userId" = Uuid, Path, description = "Partner id"),
        NotificationParams
    ),
    responses(
        (status = 200, description = "The partner's notifications", body = NotificationsResponse),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["notifications"],
    operation_id = "listNotifications"
)]
#[get("/users/{userId}/notifications")]
pub async fn list_notifications(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    params: web::Query<NotificationParams>,
) -> ApiResult<web::Json<NotificationsResponse>> {
    let user = UserId::from_uuid(path.into_inner());
    let notifications = state
        .notification_queries
        .list_for_user(user, params.unread_only.unwrap_or(false))
        .await?;
    Ok(web::Json(NotificationsResponse { notifications }))
}

/// Mark one notification read. Repeating the call is harmless.
#[utoipa::path(
    put,
    path = "/api/v1/notifications/{id}/read",
    params(("id" = Uuid, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Marked read"),
        (status = 404, description = "No such notification", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["notifications"],
    operation_id = "markNotificationRead"
)]
#[put("/notifications/{id}/read")]
pub async fn mark_notification_read(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let id = NotificationId::from_uuid(path.into_inner());
    state.notification_commands.mark_read(id).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use serde_json::Value;

    use super::*;
    use crate::inbound::http::test_utils::{TestHarness, memory_state};

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
                .service(list_notifications)
                .service(mark_notification_read),
        )
    }

    #[actix_web::test]
    async fn unread_filter_hides_read_notifications() {
        let TestHarness { state, store } = memory_state();
        let user = UserId::generate();
        let read_one = store.insert_notification(user, "proposal FIN-1 approved");
        store.insert_notification(user, "proposal FIN-2 rejected");
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::put()
            .uri(&format!("/api/v1/notifications/{}/read", read_one.id))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["success"], true);

        let request = actix_test::TestRequest::get()
            .uri(&format!("/api/v1/users/{user}/notifications?unreadOnly=true"))
            .to_request();
        let body: Value =
            actix_test::read_body_json(actix_test::call_service(&app, request).await).await;
        let notifications = body["notifications"].as_array().expect("array");
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0]["message"], "proposal FIN-2 rejected");

        let request = actix_test::TestRequest::get()
            .uri(&format!("/api/v1/users/{user}/notifications"))
            .to_request();
        let body: Value =
            actix_test::read_body_json(actix_test::call_service(&app, request).await).await;
        assert_eq!(body["notifications"].as_array().map(Vec::len), Some(2));
    }

    #[actix_web::test]
    async fn marking_twice_succeeds_both_times() {
        let TestHarness { state, store } = memory_state();
        let user = UserId::generate();
        let notification = store.insert_notification(user, "proposal FIN-1 approved");
        let app = actix_test::init_service(test_app(state)).await;

        for _ in 0..2 {
            let request = actix_test::TestRequest::put()
                .uri(&format!("/api/v1/notifications/{}/read", notification.id))
                .to_request();
            let response = actix_test::call_service(&app, request).await;
            assert_eq!(response.status(), StatusCode::OK);
        }
    }

    #[actix_web::test]
    async fn unknown_notification_is_not_found() {
        let TestHarness { state, .. } = memory_state();
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::put()
            .uri(&format!("/api/v1/notifications/{}/read", Uuid::new_v4()))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
