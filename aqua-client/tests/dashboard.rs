// aqua-client/tests/dashboard.rs
// Fault-isolated loads, full refetch after mutation, cancellation on teardown

mod common;

use aqua_client::ClientError;
use aqua_client::dashboard::{
    AdminDashboard, DashboardView, InspectionReport, InspectorDashboard, Modal, ModalType,
    OwnerDashboard, RefetchPolicy,
};
use aqua_client::upload::Attachment;
use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use common::{RequestLog, client, spawn};
use serde_json::{Value, json};
use shared::ErrorCategory;
use shared::models::ComplaintStatus;
use std::time::Duration;

fn plants() -> Value {
    json!({ "success": true, "data": { "plants": [
        { "_id": "p1", "businessName": "Crystal Springs", "status": "pending" },
        { "_id": "p2", "businessName": "Blue Drop", "status": "active" }
    ]}})
}

fn complaints() -> Value {
    json!({ "success": true, "data": [
        { "_id": "c1", "status": "investigating", "priority": "high", "description": "Cloudy water" },
        { "_id": "c2", "status": "quarantined", "description": "Mystery status" }
    ]})
}

fn users() -> Value {
    json!({ "users": [
        { "_id": "i1", "name": "Inspector One", "email": "i1@example.com", "role": "inspector" },
        { "_id": "a1", "name": "Admin", "email": "a1@example.com", "role": "admin" }
    ]})
}

fn admin_router(complaints_status: StatusCode) -> Router {
    Router::new()
        .route("/admin/plants", get(|| async { Json(plants()) }))
        .route(
            "/admin/complaints",
            get(move || async move {
                if complaints_status.is_success() {
                    (complaints_status, Json(complaints()))
                } else {
                    (complaints_status, Json(json!({ "message": "boom" })))
                }
            }),
        )
        .route("/admin/users", get(|| async { Json(users()) }))
        .route("/lab/bookings", get(|| async { Json(json!({ "data": [] })) }))
}

#[tokio::test]
async fn test_partial_failure_still_renders() {
    let base = spawn(admin_router(StatusCode::INTERNAL_SERVER_ERROR), RequestLog::default()).await;
    let c = client(&base);

    let view = DashboardView::open(c.api.clone(), AdminDashboard).await.unwrap();
    let snapshot = view.snapshot().unwrap();
    assert_eq!(snapshot.plants.len(), 2);
    assert!(snapshot.complaints.is_empty());
    assert_eq!(snapshot.inspectors().count(), 1);
    assert_eq!(snapshot.plant_stats.pending(), 1);
    assert_eq!(snapshot.complaint_stats.total, 0);

    let notes = c.notifications.drain();
    assert_eq!(notes.len(), 1, "{notes:?}");
    assert_eq!(notes[0].category, Some(ErrorCategory::ServerFault));
}

#[tokio::test]
async fn test_unmapped_fetch_failure_notifies_once() {
    let base = spawn(admin_router(StatusCode::BAD_GATEWAY), RequestLog::default()).await;
    let c = client(&base);

    let view = DashboardView::open(c.api.clone(), AdminDashboard).await.unwrap();
    assert!(view.snapshot().unwrap().complaints.is_empty());

    let notes = c.notifications.drain();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].category, Some(ErrorCategory::OperationFailed));
    assert!(notes[0].message.contains("load complaints"));
}

#[tokio::test]
async fn test_unknown_status_kept_and_counted() {
    let base = spawn(admin_router(StatusCode::OK), RequestLog::default()).await;
    let c = client(&base);

    let view = DashboardView::open(c.api.clone(), AdminDashboard).await.unwrap();
    let snapshot = view.snapshot().unwrap();
    assert_eq!(snapshot.complaints.len(), 2);
    assert_eq!(snapshot.complaints[1].status, ComplaintStatus::Unrecognized);
    assert_eq!(snapshot.complaint_stats.unrecognized, 1);
    assert_eq!(snapshot.complaint_stats.open, 1);
}

#[tokio::test]
async fn test_mutation_always_refetches() {
    let log = RequestLog::default();
    let router = admin_router(StatusCode::OK).route(
        "/complaints/{id}/assign",
        put(|| async { Json(json!({ "success": true })) }),
    );
    let base = spawn(router, log.clone()).await;
    let c = client(&base);

    let mut view = DashboardView::open(c.api.clone(), AdminDashboard).await.unwrap();
    assert_eq!(view.policy(), RefetchPolicy::FullRefetch);
    assert_eq!(view.loads(), 1);
    assert_eq!(log.count("GET", "/api/admin/complaints"), 1);

    view.assign_complaint("c1", "i1").await.unwrap();
    assert_eq!(view.loads(), 2);
    for path in ["/api/admin/plants", "/api/admin/complaints", "/api/admin/users", "/api/lab/bookings"] {
        assert_eq!(log.count("GET", path), 2, "{path}");
    }
    assert_eq!(log.count("PUT", "/api/complaints/c1/assign"), 1);

    let notes = c.notifications.drain();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, shared::NotificationLevel::Success);
}

#[tokio::test]
async fn test_failed_mutation_leaves_state_untouched() {
    let log = RequestLog::default();
    let router = admin_router(StatusCode::OK).route(
        "/complaints/{id}/assign",
        put(|| async { (StatusCode::CONFLICT, Json(json!({ "message": "already assigned" }))) }),
    );
    let base = spawn(router, log.clone()).await;
    let c = client(&base);

    let mut view = DashboardView::open(c.api.clone(), AdminDashboard).await.unwrap();
    let before = view.snapshot().cloned();

    let err = view.assign_complaint("c1", "i1").await.unwrap_err();
    assert!(matches!(err, ClientError::Status { status: 409, .. }));
    assert_eq!(view.loads(), 1);
    assert_eq!(view.snapshot().cloned(), before);
    assert_eq!(log.count("GET", "/api/admin/complaints"), 1);

    let notes = c.notifications.drain();
    assert_eq!(notes.len(), 1);
    assert!(notes[0].message.starts_with("Failed to assign complaint"));
}

#[tokio::test]
async fn test_disallowed_transition_never_sent() {
    let log = RequestLog::default();
    let router = admin_router(StatusCode::OK).route(
        "/complaints/{id}/status",
        put(|| async { Json(json!({ "success": true })) }),
    );
    let base = spawn(router, log.clone()).await;
    let c = client(&base);

    let mut view = DashboardView::open(c.api.clone(), AdminDashboard).await.unwrap();
    let modal = Modal::new(ModalType::UpdateStatus, "c1").with("status", "received");
    assert!(view.submit_modal(modal).await.is_err());
    assert_eq!(log.count("PUT", "/api/complaints/c1/status"), 0);

    let modal = Modal::new(ModalType::UpdateStatus, "c1")
        .with("status", "lab_testing")
        .with("note", "Samples collected");
    view.submit_modal(modal).await.unwrap();
    assert_eq!(log.count("PUT", "/api/complaints/c1/status"), 1);
    assert_eq!(view.loads(), 2);
}

#[tokio::test]
async fn test_unrecognized_status_can_still_be_updated() {
    let log = RequestLog::default();
    let router = admin_router(StatusCode::OK).route(
        "/complaints/{id}/status",
        put(|| async { Json(json!({ "success": true })) }),
    );
    let base = spawn(router, log.clone()).await;
    let c = client(&base);

    let mut view = DashboardView::open(c.api.clone(), AdminDashboard).await.unwrap();
    assert_eq!(
        view.snapshot().unwrap().complaint("c2").unwrap().status,
        ComplaintStatus::Unrecognized
    );

    let modal = Modal::new(ModalType::UpdateStatus, "c2").with("status", "resolved");
    view.submit_modal(modal).await.unwrap();
    assert_eq!(log.count("PUT", "/api/complaints/c2/status"), 1);
    assert_eq!(view.loads(), 2);
}

#[tokio::test]
async fn test_teardown_discards_late_response() {
    let router = Router::new()
        .route(
            "/inspector/complaints",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                Json(complaints())
            }),
        )
        .route("/inspections", get(|| async { Json(json!([])) }))
        .route("/plants", get(|| async { Json(plants()) }));
    let base = spawn(router, RequestLog::default()).await;
    let c = client(&base);

    let mut view = DashboardView::new(c.api.clone(), InspectorDashboard);
    let token = view.cancellation_token();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();
    });

    let err = view.refresh().await.unwrap_err();
    assert!(err.is_cancelled());
    assert!(view.snapshot().is_none());
    assert_eq!(view.loads(), 0);
    assert!(view.is_closed());
    assert!(matches!(view.refresh().await, Err(ClientError::Cancelled)));
}

#[tokio::test]
async fn test_inspector_queries_pending_plants() {
    let log = RequestLog::default();
    let router = Router::new()
        .route("/inspector/complaints", get(|| async { Json(complaints()) }))
        .route("/inspections", get(|| async { Json(json!({ "data": { "inspections": [] } })) }))
        .route("/plants", get(|| async { Json(plants()) }));
    let base = spawn(router, log.clone()).await;
    let c = client(&base);

    let view = DashboardView::open(c.api.clone(), InspectorDashboard).await.unwrap();
    assert_eq!(view.snapshot().unwrap().complaints.len(), 2);
    let hit = log.hits().into_iter().find(|h| h.path == "/api/plants").unwrap();
    assert_eq!(hit.query.as_deref(), Some("status=pending"));
}

#[tokio::test]
async fn test_invalid_report_rejected_without_notification() {
    let log = RequestLog::default();
    let router = Router::new()
        .route("/inspector/complaints", get(|| async { Json(complaints()) }))
        .route("/inspections", get(|| async { Json(json!({ "data": { "inspections": [] } })) }))
        .route("/plants", get(|| async { Json(plants()) }))
        .route("/complaints/{id}/report", post(|| async { Json(json!({ "success": true })) }));
    let base = spawn(router, log.clone()).await;
    let c = client(&base);

    let mut view = DashboardView::open(c.api.clone(), InspectorDashboard).await.unwrap();
    c.notifications.drain();

    let blank = InspectionReport {
        findings: "   ".into(),
        ..Default::default()
    };
    let err = view.submit_report("c1", blank).await.unwrap_err();
    assert!(matches!(err, ClientError::Form(_)));

    let crowded = InspectionReport {
        findings: "Broken seal on storage tank".into(),
        recommendations: None,
        photos: (0..6)
            .map(|i| Attachment::new(format!("site-{i}.jpg"), vec![0xFF, 0xD8]).unwrap())
            .collect(),
    };
    let err = view.submit_report("c1", crowded).await.unwrap_err();
    assert!(err.is_local());

    assert_eq!(log.count("POST", "/api/complaints/c1/report"), 0);
    assert!(c.notifications.is_empty());
    assert_eq!(view.loads(), 1);
}

#[tokio::test]
async fn test_owner_books_lab_test_then_refetches() {
    let log = RequestLog::default();
    let body_log = log.clone();
    let router = Router::new()
        .route("/plants/my", get(|| async { Json(plants()) }))
        .route("/lab/bookings/my", get(|| async { Json(json!({ "bookings": [] })) }))
        .route(
            "/lab/bookings",
            post(move |Json(body): Json<Value>| {
                let log = body_log.clone();
                async move {
                    log.record_body("/lab/bookings", body);
                    Json(json!({ "success": true, "data": { "booking": {
                        "_id": "b1", "plant": "p2", "testType": "full_panel", "status": "scheduled"
                    }}}))
                }
            }),
        );
    let base = spawn(router, log.clone()).await;
    let c = client(&base);

    let mut view = DashboardView::open(c.api.clone(), OwnerDashboard).await.unwrap();
    assert_eq!(view.snapshot().unwrap().bookable_plants().count(), 1);

    let modal = Modal::new(ModalType::BookLabTest, "")
        .with("plantId", "p2")
        .with("testType", "full_panel")
        .with("scheduledDate", "2026-11-02");
    let booking = view.submit_modal(modal).await.unwrap();
    assert_eq!(booking.id, "b1");
    assert_eq!(view.loads(), 2);

    let bodies = log.bodies("/lab/bookings");
    assert_eq!(
        bodies,
        vec![json!({ "plantId": "p2", "testType": "full_panel", "scheduledDate": "2026-11-02" })]
    );
}
