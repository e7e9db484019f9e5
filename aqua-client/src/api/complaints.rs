// aqua-client/src/api/complaints.rs
// Complaint intake, tracking and the inspector/admin workflow

use chrono::NaiveDate;
use reqwest::multipart::Form;
use serde_json::json;
use shared::models::{Complaint, ComplaintReceipt, ComplaintStatus};

use crate::error::{ClientError, ClientResult};
use crate::http::{ApiClient, invalid_response, segment};

/// One tracking lookup; the strategies are mutually exclusive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackingLookup {
    /// Opaque tracking token issued on submission
    Token(String),
    ByEmail { complaint_id: String, email: String },
    ByPhone { complaint_id: String, phone: String },
}

impl ApiClient {
    /// POST complaints (multipart, photos attached by the caller)
    pub async fn submit_complaint(&self, form: Form) -> ClientResult<ComplaintReceipt> {
        self.post_multipart("complaints", form)
            .await?
            .into_item()
            .map_err(invalid_response)
    }

    /// Look a complaint up with exactly one strategy
    ///
    /// The token goes to `GET complaints/track/{token}`; credential pairs go
    /// to `POST complaints/track` carrying only the two provided fields.
    pub async fn track_complaint(&self, lookup: &TrackingLookup) -> ClientResult<Complaint> {
        let envelope = match lookup {
            TrackingLookup::Token(token) => {
                self.get(&format!("complaints/track/{}", segment(token.trim())?))
                    .await?
            }
            TrackingLookup::ByEmail {
                complaint_id,
                email,
            } => {
                self.post(
                    "complaints/track",
                    &json!({ "complaintId": complaint_id, "email": email }),
                )
                .await?
            }
            TrackingLookup::ByPhone {
                complaint_id,
                phone,
            } => {
                self.post(
                    "complaints/track",
                    &json!({ "complaintId": complaint_id, "phone": phone }),
                )
                .await?
            }
        };
        envelope.into_item().map_err(invalid_response)
    }

    /// PUT complaints/{id}/assign
    pub async fn assign_complaint(&self, complaint_id: &str, inspector_id: &str) -> ClientResult<()> {
        tracing::debug!(complaint_id = %complaint_id, inspector_id = %inspector_id, "Assigning complaint");
        self.put(
            &format!("complaints/{}/assign", segment(complaint_id)?),
            &json!({ "inspectorId": inspector_id }),
        )
        .await?;
        Ok(())
    }

    /// PUT complaints/{id}/status
    ///
    /// `current` is checked against the lifecycle before anything is sent.
    pub async fn update_complaint_status(
        &self,
        complaint_id: &str,
        current: ComplaintStatus,
        next: ComplaintStatus,
        note: Option<&str>,
    ) -> ClientResult<()> {
        if !current.can_transition_to(next) {
            return Err(ClientError::Form(format!(
                "Cannot move a complaint from {} to {}",
                current.label(),
                next.label()
            )));
        }
        self.put(
            &format!("complaints/{}/status", segment(complaint_id)?),
            &json!({ "status": next, "note": note }),
        )
        .await?;
        Ok(())
    }

    /// POST complaints/{id}/schedule-visit
    pub async fn schedule_visit(
        &self,
        complaint_id: &str,
        date: NaiveDate,
        notes: Option<&str>,
    ) -> ClientResult<()> {
        self.post(
            &format!("complaints/{}/schedule-visit", segment(complaint_id)?),
            &json!({ "scheduledDate": date, "notes": notes }),
        )
        .await?;
        Ok(())
    }

    /// POST complaints/{id}/report (multipart)
    pub async fn submit_report(&self, complaint_id: &str, form: Form) -> ClientResult<()> {
        self.post_multipart(&format!("complaints/{}/report", segment(complaint_id)?), form)
            .await?;
        Ok(())
    }
}
