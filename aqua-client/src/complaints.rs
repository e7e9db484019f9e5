//! Complaint submission and tracking
//!
//! Consumers only create complaints (initial `received`) and read them back.
//! Every later transition happens through inspector and admin actions on the
//! dashboards.

use reqwest::multipart::Form;
use shared::models::{Complaint, ComplaintCategory, ComplaintReceipt};
use validator::{Validate, ValidationError};

use crate::api::TrackingLookup;
use crate::error::{ClientError, ClientResult};
use crate::http::ApiClient;
use crate::location::{LocationError, LocationProvider};
use crate::upload::{self, Attachment};

/// Public complaint form
#[derive(Debug, Clone, Default, Validate)]
#[validate(schema(function = "contact_or_anonymous"))]
pub struct ComplaintForm {
    pub category: ComplaintCategory,
    #[validate(length(min = 10, message = "Please describe the problem in at least 10 characters"))]
    pub description: String,
    pub plant_name: Option<String>,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    /// `[longitude, latitude]` when captured
    pub coordinates: Option<[f64; 2]>,
    pub is_anonymous: bool,
    pub contact_name: Option<String>,
    #[validate(email(message = "Enter a valid email address"))]
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub photos: Vec<Attachment>,
}

fn contact_or_anonymous(form: &ComplaintForm) -> Result<(), ValidationError> {
    let blank = |v: &Option<String>| v.as_deref().is_none_or(|s| s.trim().is_empty());
    if !form.is_anonymous && blank(&form.contact_email) && blank(&form.contact_phone) {
        return Err(ValidationError::new("contact")
            .with_message("Provide an email or phone number, or submit anonymously".into()));
    }
    Ok(())
}

impl ComplaintForm {
    pub fn add_photo(&mut self, photo: Attachment) -> ClientResult<()> {
        self.photos.push(photo);
        if let Err(e) = upload::check_count(&self.photos) {
            self.photos.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Fill coordinates from the device position; manual fields are untouched
    pub async fn capture_location(
        &mut self,
        provider: &dyn LocationProvider,
    ) -> Result<(), LocationError> {
        let point = provider.current_position().await?;
        self.coordinates = Some(point.lng_lat());
        Ok(())
    }

    /// Validate and encode as multipart
    pub fn into_multipart(self) -> ClientResult<Form> {
        self.validate()?;
        upload::check_count(&self.photos)?;

        let mut form = Form::new()
            .text("category", self.category.as_str())
            .text("description", self.description.trim().to_string())
            .text("location", self.location.trim().to_string())
            .text("isAnonymous", self.is_anonymous.to_string());

        if let Some(plant) = self.plant_name.filter(|p| !p.trim().is_empty()) {
            form = form.text("plantName", plant);
        }
        if let Some([lng, lat]) = self.coordinates {
            form = form
                .text("longitude", lng.to_string())
                .text("latitude", lat.to_string());
        }
        if !self.is_anonymous {
            for (key, value) in [
                ("contactName", self.contact_name),
                ("contactEmail", self.contact_email),
                ("contactPhone", self.contact_phone),
            ] {
                if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
                    form = form.text(key, value);
                }
            }
        }

        upload::attach(form, "photos", self.photos)
    }
}

/// Validate, upload and report a complaint
///
/// Local validation errors come back without a notification so the form can
/// show them inline.
pub async fn submit(api: &ApiClient, form: ComplaintForm) -> ClientResult<ComplaintReceipt> {
    let photos = form.photos.len();
    let multipart = form.into_multipart()?;

    match api.submit_complaint(multipart).await {
        Ok(receipt) => {
            tracing::info!(complaint_id = %receipt.complaint_id, photos, "Complaint submitted");
            let message = match &receipt.tracking_token {
                Some(token) => format!("Complaint {} received. Tracking token: {token}", receipt.complaint_id),
                None => format!("Complaint {} received.", receipt.complaint_id),
            };
            api.report_success("Complaint submitted", message);
            Ok(receipt)
        }
        Err(e) => {
            api.report_failure("submit complaint", &e);
            Err(e)
        }
    }
}

/// Tracking strategy picked by the visitor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrackingMethod {
    #[default]
    Token,
    Email,
    Phone,
}

/// Tracking form; only the fields of the chosen method are read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackingForm {
    pub method: TrackingMethod,
    pub token: String,
    pub complaint_id: String,
    pub email: String,
    pub phone: String,
}

impl TrackingForm {
    fn required(value: &str, label: &str) -> ClientResult<String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ClientError::Form(format!("{label} is required")));
        }
        Ok(value.to_string())
    }

    /// Resolve the single lookup this submission performs
    ///
    /// Presence of the required fields is the only local check; matching is
    /// up to the server.
    pub fn lookup(&self) -> ClientResult<TrackingLookup> {
        match self.method {
            TrackingMethod::Token => Ok(TrackingLookup::Token(Self::required(
                &self.token,
                "Tracking token",
            )?)),
            TrackingMethod::Email => Ok(TrackingLookup::ByEmail {
                complaint_id: Self::required(&self.complaint_id, "Complaint ID")?,
                email: Self::required(&self.email, "Email")?,
            }),
            TrackingMethod::Phone => Ok(TrackingLookup::ByPhone {
                complaint_id: Self::required(&self.complaint_id, "Complaint ID")?,
                phone: Self::required(&self.phone, "Phone number")?,
            }),
        }
    }
}

pub async fn track(api: &ApiClient, form: &TrackingForm) -> ClientResult<Complaint> {
    let lookup = form.lookup()?;
    match api.track_complaint(&lookup).await {
        Ok(complaint) => Ok(complaint),
        Err(e) => {
            api.report_failure("track complaint", &e);
            Err(e)
        }
    }
}
