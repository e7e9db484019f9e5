// aqua-client/tests/complaints.rs
// Complaint submission (multipart) and the exclusive tracking strategies

mod common;

use aqua_client::complaints::{self, ComplaintForm, TrackingForm, TrackingMethod};
use aqua_client::upload::Attachment;
use axum::Json;
use axum::Router;
use axum::extract::{Multipart, Path};
use axum::routing::{get, post};
use common::{RequestLog, client, spawn};
use serde_json::{Value, json};
use shared::models::{ComplaintCategory, ComplaintStatus};

fn complaint_json(id: &str) -> Value {
    json!({
        "_id": id,
        "complaintNumber": "CMP-2026-000042",
        "status": "under_review",
        "category": "contamination",
        "description": "Sediment in bottled water",
        "statusHistory": [
            { "status": "received", "changedAt": "2026-10-01T09:00:00Z" },
            { "status": "under_review", "note": "Assigned for triage", "changedAt": "2026-10-02T09:00:00Z" }
        ]
    })
}

fn tracking_router(log: RequestLog) -> Router {
    Router::new()
        .route(
            "/complaints/track/{token}",
            get(|Path(token): Path<String>| async move {
                Json(json!({ "success": true, "data": { "complaint": complaint_json(&token) } }))
            }),
        )
        .route(
            "/complaints/track",
            post(move |Json(body): Json<Value>| {
                let log = log.clone();
                async move {
                    log.record_body("/complaints/track", body);
                    Json(json!({ "success": true, "data": complaint_json("by-credentials") }))
                }
            }),
        )
}

#[tokio::test]
async fn test_token_lookup_only_hits_token_endpoint() {
    let log = RequestLog::default();
    let base = spawn(tracking_router(log.clone()), log.clone()).await;
    let c = client(&base);

    let form = TrackingForm {
        method: TrackingMethod::Token,
        token: "trk-9f3a".into(),
        complaint_id: "CMP-2026-000042".into(),
        email: "resident@example.com".into(),
        ..Default::default()
    };
    let complaint = complaints::track(&c.api, &form).await.unwrap();
    assert_eq!(complaint.id, "trk-9f3a");
    assert_eq!(complaint.status, ComplaintStatus::UnderReview);
    assert_eq!(complaint.status_history.len(), 2);

    assert_eq!(log.paths(), vec!["GET /api/complaints/track/trk-9f3a"]);
    assert!(log.bodies("/complaints/track").is_empty());
}

#[tokio::test]
async fn test_token_with_reserved_characters_stays_one_segment() {
    let log = RequestLog::default();
    let base = spawn(tracking_router(log.clone()), log.clone()).await;
    let c = client(&base);

    for token in ["a/b?c", "trk/../../admin/users", "trk#frag"] {
        let form = TrackingForm {
            method: TrackingMethod::Token,
            token: token.into(),
            ..Default::default()
        };
        let complaint = complaints::track(&c.api, &form).await.unwrap();
        assert_eq!(complaint.id, token);
    }

    assert_eq!(
        log.paths(),
        vec![
            "GET /api/complaints/track/a%2Fb%3Fc",
            "GET /api/complaints/track/trk%2F..%2F..%2Fadmin%2Fusers",
            "GET /api/complaints/track/trk%23frag",
        ]
    );
    assert!(log.hits().iter().all(|h| h.query.is_none()));
}

#[tokio::test]
async fn test_dot_token_is_rejected_locally() {
    let log = RequestLog::default();
    let base = spawn(tracking_router(log.clone()), log.clone()).await;
    let c = client(&base);

    let form = TrackingForm {
        method: TrackingMethod::Token,
        token: "..".into(),
        ..Default::default()
    };
    let err = complaints::track(&c.api, &form).await.unwrap_err();
    assert!(matches!(err, aqua_client::ClientError::Form(_)));
    assert!(log.paths().is_empty());
}

#[tokio::test]
async fn test_credential_lookups_send_exactly_two_fields() {
    let log = RequestLog::default();
    let base = spawn(tracking_router(log.clone()), log.clone()).await;
    let c = client(&base);

    let by_email = TrackingForm {
        method: TrackingMethod::Email,
        token: "ignored".into(),
        complaint_id: "CMP-2026-000042".into(),
        email: "resident@example.com".into(),
        phone: "+254700111222".into(),
    };
    let by_phone = TrackingForm {
        method: TrackingMethod::Phone,
        ..by_email.clone()
    };

    complaints::track(&c.api, &by_email).await.unwrap();
    complaints::track(&c.api, &by_phone).await.unwrap();

    assert_eq!(
        log.paths(),
        vec!["POST /api/complaints/track", "POST /api/complaints/track"]
    );
    assert_eq!(
        log.bodies("/complaints/track"),
        vec![
            json!({ "complaintId": "CMP-2026-000042", "email": "resident@example.com" }),
            json!({ "complaintId": "CMP-2026-000042", "phone": "+254700111222" }),
        ]
    );
}

#[tokio::test]
async fn test_missing_fields_send_nothing() {
    let log = RequestLog::default();
    let base = spawn(tracking_router(log.clone()), log.clone()).await;
    let c = client(&base);

    let form = TrackingForm {
        method: TrackingMethod::Phone,
        complaint_id: "CMP-1".into(),
        ..Default::default()
    };
    assert!(complaints::track(&c.api, &form).await.is_err());
    assert!(log.hits().is_empty());
}

#[tokio::test]
async fn test_submission_uploads_fields_and_photos() {
    let log = RequestLog::default();
    let fields_log = log.clone();
    let router = Router::new().route(
        "/complaints",
        post(move |mut multipart: Multipart| {
            let log = fields_log.clone();
            async move {
                let mut fields = serde_json::Map::new();
                let mut photos = Vec::new();
                while let Some(field) = multipart.next_field().await.unwrap() {
                    let name = field.name().unwrap_or_default().to_string();
                    if name == "photos" {
                        let file = field.file_name().unwrap_or_default().to_string();
                        let kind = field.content_type().unwrap_or_default().to_string();
                        field.bytes().await.unwrap();
                        photos.push(json!({ "file": file, "type": kind }));
                    } else {
                        fields.insert(name, Value::String(field.text().await.unwrap()));
                    }
                }
                log.record_body("/complaints", json!({ "fields": fields, "photos": photos }));
                Json(json!({ "success": true, "data": {
                    "complaintId": "CMP-2026-000099",
                    "trackingToken": "trk-new",
                    "status": "received"
                }}))
            }
        }),
    );
    let base = spawn(router, log.clone()).await;
    let c = client(&base);

    let mut form = ComplaintForm {
        category: ComplaintCategory::Hygiene,
        description: "Refill station floor is flooded and dirty".into(),
        plant_name: Some("Blue Drop".into()),
        location: "Githurai 45".into(),
        coordinates: Some([36.91, -1.20]),
        is_anonymous: true,
        contact_email: Some("should-not-be-sent@example.com".into()),
        ..Default::default()
    };
    form.add_photo(Attachment::new("floor.jpg", vec![0xFF, 0xD8, 0xFF]).unwrap())
        .unwrap();
    form.add_photo(Attachment::new("tap.png", vec![0x89, 0x50]).unwrap())
        .unwrap();

    let receipt = complaints::submit(&c.api, form).await.unwrap();
    assert_eq!(receipt.complaint_id, "CMP-2026-000099");
    assert_eq!(receipt.tracking_token.as_deref(), Some("trk-new"));

    let body = &log.bodies("/complaints")[0];
    assert_eq!(body["fields"]["category"], "hygiene");
    assert_eq!(body["fields"]["isAnonymous"], "true");
    assert_eq!(body["fields"]["plantName"], "Blue Drop");
    assert_eq!(body["fields"]["longitude"], "36.91");
    assert!(body["fields"].get("contactEmail").is_none());
    assert_eq!(
        body["photos"],
        json!([
            { "file": "floor.jpg", "type": "image/jpeg" },
            { "file": "tap.png", "type": "image/png" }
        ])
    );

    let notes = c.notifications.drain();
    assert_eq!(notes.len(), 1);
    assert!(notes[0].message.contains("trk-new"));
}

#[tokio::test]
async fn test_invalid_submission_never_uploads() {
    let log = RequestLog::default();
    let base = spawn(Router::new(), log.clone()).await;
    let c = client(&base);

    let form = ComplaintForm {
        description: "too short".into(),
        location: "Thika".into(),
        ..Default::default()
    };
    assert!(complaints::submit(&c.api, form).await.is_err());
    assert!(log.hits().is_empty());
    assert!(c.notifications.is_empty());
}
