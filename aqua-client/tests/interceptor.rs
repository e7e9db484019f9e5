// aqua-client/tests/interceptor.rs
// Status-to-notification mapping and envelope normalization over real HTTP

mod common;

use aqua_client::{ClientError, NotificationLevel, SessionStore};
use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::Json;
use common::{RequestLog, client, dead_url, seed_session, spawn, user_json};
use serde_json::{Value, json};
use shared::ErrorCategory;
use shared::models::Plant;

fn status_router() -> Router {
    Router::new().route(
        "/probe/{code}",
        get(|axum::extract::Path(code): axum::extract::Path<u16>| async move {
            let status = StatusCode::from_u16(code).unwrap();
            (status, Json(json!({ "success": false, "message": "server says no" })))
        }),
    )
}

#[tokio::test]
async fn test_each_mapped_status_notifies_once() {
    let cases = [
        (403, ErrorCategory::PermissionDenied, "You do not have permission to perform this action."),
        (404, ErrorCategory::NotFound, "The requested resource was not found."),
        (422, ErrorCategory::ValidationFailed, "Validation failed. Please check your input."),
        (429, ErrorCategory::RateLimited, "Too many requests. Please slow down and try again."),
        (500, ErrorCategory::ServerFault, "Server error. Please try again later."),
    ];
    let base = spawn(status_router(), RequestLog::default()).await;

    for (code, category, message) in cases {
        let c = client(&base);
        let err = c.api.get(&format!("probe/{code}")).await.unwrap_err();
        assert_eq!(err.category(), category, "status {code}");
        assert!(err.is_surfaced());

        let notes = c.notifications.drain();
        assert_eq!(notes.len(), 1, "status {code}: {notes:?}");
        assert_eq!(notes[0].message, message);
        assert_eq!(notes[0].level, NotificationLevel::Error);
        assert_eq!(notes[0].category, Some(category));
        assert!(c.redirects.peek().is_none());
    }
}

#[tokio::test]
async fn test_401_clears_session_and_redirects() {
    let base = spawn(status_router(), RequestLog::default()).await;
    let c = client(&base);
    seed_session(&c, "stale-token", &user_json("u1", "owner", "free"));
    c.store.set("refreshToken", "r1").unwrap();
    c.manager.init(false).await;
    assert!(c.api.session().is_authenticated());

    let err = c.api.get("probe/401").await.unwrap_err();
    assert!(matches!(err, ClientError::SessionExpired));

    let notes = c.notifications.drain();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].message, "Your session has expired. Please sign in again.");
    assert_eq!(c.redirects.take().as_deref(), Some("/signin"));

    assert!(c.store.get("token").is_none());
    assert!(c.store.get("refreshToken").is_none());
    assert!(c.store.get("user").is_none());
    assert!(c.api.session().token().is_none());
    assert!(!c.api.session().is_authenticated());
}

#[tokio::test]
async fn test_422_lists_field_messages_in_one_notification() {
    let router = Router::new().route(
        "/plants",
        axum::routing::post(|| async {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "success": false,
                    "message": "Validation failed",
                    "errors": [
                        {"param": "businessName", "msg": "Business name is required"},
                        {"path": "licenseNumber", "msg": "License number is invalid"}
                    ]
                })),
            )
        }),
    );
    let base = spawn(router, RequestLog::default()).await;
    let c = client(&base);

    let err = c.api.post("plants", &json!({})).await.unwrap_err();
    let ClientError::Validation { fields, .. } = &err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(fields.len(), 2);

    let notes = c.notifications.drain();
    assert_eq!(notes.len(), 1);
    assert!(notes[0].message.contains("Business name is required"));
    assert!(notes[0].message.contains("License number is invalid"));

    // feature code must not add a second notification
    c.api.report_failure("register plant", &err);
    assert!(c.notifications.is_empty());
}

#[tokio::test]
async fn test_no_response_is_a_network_error() {
    let c = client(&dead_url().await);
    let err = c.api.get("plants/my").await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));

    let notes = c.notifications.drain();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].message, "Network error. Please check your connection.");
}

#[tokio::test]
async fn test_unmapped_status_left_to_feature_code() {
    let base = spawn(status_router(), RequestLog::default()).await;
    let c = client(&base);

    let err = c.api.get("probe/409").await.unwrap_err();
    assert!(matches!(err, ClientError::Status { status: 409, .. }));
    assert!(c.notifications.is_empty());

    c.api.report_failure("assign complaint", &err);
    let notes = c.notifications.drain();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].category, Some(ErrorCategory::OperationFailed));
    assert!(notes[0].message.starts_with("Failed to assign complaint"));
}

#[tokio::test]
async fn test_bearer_token_attached_when_present() {
    let log = RequestLog::default();
    let router = Router::new().route(
        "/auth/me",
        get(|headers: HeaderMap| async move {
            match headers.get("authorization").and_then(|v| v.to_str().ok()) {
                Some("Bearer jwt-live") => (
                    StatusCode::OK,
                    Json(json!({ "success": true, "data": { "user": user_json("u7", "inspector", "pro") } })),
                ),
                _ => (StatusCode::UNAUTHORIZED, Json(json!({ "message": "no token" }))),
            }
        }),
    );
    let base = spawn(router, log.clone()).await;

    let anonymous = client(&base);
    assert!(anonymous.api.me().await.is_err());
    assert_eq!(log.hits()[0].authorization, None);

    let c = client(&base);
    seed_session(&c, "jwt-live", &user_json("u7", "inspector", "free"));
    c.manager.init(true).await;
    let state = c.manager.state();
    assert!(state.is_authenticated);
    // re-validation replaced the stored user
    assert_eq!(
        state.user.unwrap().subscription_tier,
        shared::models::SubscriptionTier::Pro
    );
    assert_eq!(log.hits()[1].authorization.as_deref(), Some("Bearer jwt-live"));
}

#[tokio::test]
async fn test_inconsistent_envelopes_normalize() {
    let plant = |id: &str| json!({ "_id": id, "businessName": id, "status": "active" });
    let shapes: Vec<(&str, Value)> = vec![
        ("nested", json!({ "success": true, "data": { "plants": [plant("a"), plant("b")] } })),
        ("flat", json!({ "success": true, "plants": [plant("a"), plant("b")] })),
        ("data-array", json!({ "success": true, "data": [plant("a"), plant("b")] })),
        ("bare", json!([plant("a"), plant("b")])),
        ("junk", json!({ "success": true, "data": { "count": 2 } })),
    ];

    let mut router = Router::new();
    for (name, body) in shapes.clone() {
        router = router.route(
            &format!("/shapes/{name}"),
            get(move || {
                let body = body.clone();
                async move { Json(body) }
            }),
        );
    }
    let base = spawn(router, RequestLog::default()).await;
    let c = client(&base);

    for (name, _) in shapes {
        let plants: Vec<Plant> = c.api.get_list(&format!("shapes/{name}")).await.unwrap();
        let expected = if name == "junk" { 0 } else { 2 };
        assert_eq!(plants.len(), expected, "shape {name}");
    }
    assert!(c.notifications.is_empty());
}
