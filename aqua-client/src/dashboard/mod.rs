//! Role dashboards
//!
//! Every dashboard has the same shape:
//!
//! 1. its collections are fetched together, each one fault-isolated
//!    ([`fetch_or_default`]) so a failing endpoint only empties its own list
//! 2. statistics are derived client-side ([`stats`])
//! 3. actions open a [`Modal`] whose fields depend on its [`ModalType`]
//! 4. every mutation is one REST call followed by a reload chosen by
//!    [`RefetchPolicy`]
//!
//! A [`DashboardView`] owns a cancellation token for its lifetime. Loads race
//! the token, so nothing arriving after teardown is applied.

pub mod admin;
pub mod inspector;
pub mod owner;
pub mod stats;

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::models::Role;
use std::collections::BTreeMap;
use std::future::Future;
use tokio_util::sync::CancellationToken;

use crate::error::{ClientError, ClientResult};
use crate::http::ApiClient;
use crate::upload::Attachment;

pub use admin::{AdminDashboard, AdminSnapshot, AdminTab};
pub use inspector::{InspectionReport, InspectorDashboard, InspectorSnapshot, InspectorTab};
pub use owner::{OwnerDashboard, OwnerSnapshot, OwnerTab};

/// What happens after a successful mutation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RefetchPolicy {
    /// Reload every collection of the dashboard; no optimistic or partial update
    #[default]
    FullRefetch,
}

/// Data behind one dashboard
#[async_trait]
pub trait DashboardSource: Send + Sync {
    type Snapshot: Send + Sync;

    /// Label used in logs
    const NAME: &'static str;

    /// Roles allowed to open the dashboard
    fn roles(&self) -> &'static [Role];

    /// Fetch every collection; individual failures degrade to empty lists
    async fn load(&self, api: &ApiClient) -> Self::Snapshot;
}

/// Await one collection, substituting an empty list on failure
///
/// The failure is reported once: by the interceptor for mapped statuses, or
/// here as "Failed to load {what}" otherwise.
pub async fn fetch_or_default<T, F>(api: &ApiClient, what: &str, fetch: F) -> Vec<T>
where
    F: Future<Output = ClientResult<Vec<T>>>,
{
    match fetch.await {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(collection = %what, error = %e, "Collection failed to load, using empty list");
            api.report_failure(&format!("load {what}"), &e);
            Vec::new()
        }
    }
}

/// A mounted dashboard
pub struct DashboardView<S: DashboardSource> {
    api: ApiClient,
    source: S,
    policy: RefetchPolicy,
    token: CancellationToken,
    snapshot: Option<S::Snapshot>,
    loads: u64,
}

impl<S: DashboardSource> std::fmt::Debug for DashboardView<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardView")
            .field("name", &S::NAME)
            .field("policy", &self.policy)
            .field("loaded", &self.snapshot.is_some())
            .field("loads", &self.loads)
            .field("cancelled", &self.token.is_cancelled())
            .finish()
    }
}

impl<S: DashboardSource> DashboardView<S> {
    pub fn new(api: ApiClient, source: S) -> Self {
        Self {
            api,
            source,
            policy: RefetchPolicy::FullRefetch,
            token: CancellationToken::new(),
            snapshot: None,
            loads: 0,
        }
    }

    /// Mount and run the initial load
    pub async fn open(api: ApiClient, source: S) -> ClientResult<Self> {
        let mut view = Self::new(api, source);
        view.refresh().await?;
        Ok(view)
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn policy(&self) -> RefetchPolicy {
        self.policy
    }

    pub fn snapshot(&self) -> Option<&S::Snapshot> {
        self.snapshot.as_ref()
    }

    /// Completed loads, initial one included
    pub fn loads(&self) -> u64 {
        self.loads
    }

    /// Token tied to this view; cancelling it tears the view down
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn close(&self) {
        self.token.cancel();
    }

    /// Reload everything, replacing the snapshot wholesale
    pub async fn refresh(&mut self) -> ClientResult<&S::Snapshot> {
        if self.token.is_cancelled() {
            return Err(ClientError::Cancelled);
        }

        let loaded = tokio::select! {
            _ = self.token.cancelled() => {
                tracing::debug!(dashboard = S::NAME, "Dashboard closed during load, discarding");
                return Err(ClientError::Cancelled);
            }
            snapshot = self.source.load(&self.api) => snapshot,
        };

        self.loads += 1;
        tracing::debug!(dashboard = S::NAME, loads = self.loads, "Dashboard loaded");
        Ok(self.snapshot.insert(loaded))
    }

    /// Run one mutation, then reload per the refetch policy
    ///
    /// On failure the error is reported and the snapshot is left as it was.
    pub async fn mutate<T, F>(&mut self, operation: &str, request: F) -> ClientResult<T>
    where
        F: Future<Output = ClientResult<T>>,
    {
        if self.token.is_cancelled() {
            return Err(ClientError::Cancelled);
        }

        let outcome = tokio::select! {
            _ = self.token.cancelled() => return Err(ClientError::Cancelled),
            outcome = request => outcome,
        };

        match outcome {
            Ok(value) => {
                tracing::info!(dashboard = S::NAME, operation = %operation, "Mutation succeeded");
                self.api
                    .report_success("Saved", format!("{} succeeded", sentence_case(operation)));
                match self.policy {
                    RefetchPolicy::FullRefetch => {
                        self.refresh().await?;
                    }
                }
                Ok(value)
            }
            Err(e) => {
                self.api.report_failure(operation, &e);
                Err(e)
            }
        }
    }
}

impl<S: DashboardSource> Drop for DashboardView<S> {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

fn sentence_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ========== Modals ==========

/// Which action form a modal shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalType {
    AssignComplaint,
    UpdateStatus,
    SendNotification,
    ScheduleVisit,
    RejectPlant,
    SubmitReport,
    BookLabTest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    /// `YYYY-MM-DD`
    Date,
    /// One of a set the dashboard supplies
    Select,
    Photos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

const fn field(name: &'static str, label: &'static str, kind: FieldKind, required: bool) -> FormField {
    FormField {
        name,
        label,
        kind,
        required,
    }
}

impl ModalType {
    pub fn title(&self) -> &'static str {
        match self {
            Self::AssignComplaint => "Assign complaint",
            Self::UpdateStatus => "Update complaint status",
            Self::SendNotification => "Send notification",
            Self::ScheduleVisit => "Schedule site visit",
            Self::RejectPlant => "Reject plant",
            Self::SubmitReport => "Submit inspection report",
            Self::BookLabTest => "Book lab test",
        }
    }

    /// Fields of the form, in display order
    pub fn fields(&self) -> &'static [FormField] {
        match self {
            Self::AssignComplaint => ASSIGN_FIELDS,
            Self::UpdateStatus => UPDATE_STATUS_FIELDS,
            Self::SendNotification => SEND_NOTIFICATION_FIELDS,
            Self::ScheduleVisit => SCHEDULE_VISIT_FIELDS,
            Self::RejectPlant => REJECT_PLANT_FIELDS,
            Self::SubmitReport => SUBMIT_REPORT_FIELDS,
            Self::BookLabTest => BOOK_LAB_TEST_FIELDS,
        }
    }
}

const ASSIGN_FIELDS: &[FormField] = &[field("inspectorId", "Inspector", FieldKind::Select, true)];

const UPDATE_STATUS_FIELDS: &[FormField] = &[
    field("status", "New status", FieldKind::Select, true),
    field("note", "Note", FieldKind::TextArea, false),
];

const SEND_NOTIFICATION_FIELDS: &[FormField] = &[
    field("recipientId", "Recipient", FieldKind::Select, true),
    field("template", "Template", FieldKind::Select, true),
];

const SCHEDULE_VISIT_FIELDS: &[FormField] = &[
    field("scheduledDate", "Visit date", FieldKind::Date, true),
    field("notes", "Notes", FieldKind::TextArea, false),
];

const REJECT_PLANT_FIELDS: &[FormField] = &[field("reason", "Reason", FieldKind::TextArea, true)];

const SUBMIT_REPORT_FIELDS: &[FormField] = &[
    field("findings", "Findings", FieldKind::TextArea, true),
    field("recommendations", "Recommendations", FieldKind::TextArea, false),
    field("photos", "Photos", FieldKind::Photos, false),
];

const BOOK_LAB_TEST_FIELDS: &[FormField] = &[
    field("plantId", "Plant", FieldKind::Select, true),
    field("testType", "Test type", FieldKind::Select, true),
    field("scheduledDate", "Preferred date", FieldKind::Date, true),
    field("notes", "Notes", FieldKind::TextArea, false),
];

/// Open action form
#[derive(Debug, Clone, PartialEq)]
pub struct Modal {
    pub kind: ModalType,
    /// Entity the action applies to (complaint or plant id)
    pub target: String,
    values: BTreeMap<String, String>,
    photos: Vec<Attachment>,
}

impl Modal {
    pub fn new(kind: ModalType, target: impl Into<String>) -> Self {
        Self {
            kind,
            target: target.into(),
            values: BTreeMap::new(),
            photos: Vec::new(),
        }
    }

    /// Set a field; unknown names are kept (template variables)
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn attach(&mut self, photo: Attachment) -> ClientResult<()> {
        self.photos.push(photo);
        if let Err(e) = crate::upload::check_count(&self.photos) {
            self.photos.pop();
            return Err(e);
        }
        Ok(())
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    pub(crate) fn take_photos(&mut self) -> Vec<Attachment> {
        std::mem::take(&mut self.photos)
    }

    /// Labels of required fields left blank
    pub fn missing_required(&self) -> Vec<&'static str> {
        self.kind
            .fields()
            .iter()
            .filter(|f| f.required && self.value(f.name).is_none())
            .map(|f| f.label)
            .collect()
    }

    /// Fail with a form error when required fields are blank
    pub fn check(&self) -> ClientResult<()> {
        if self.target.trim().is_empty() && self.kind != ModalType::BookLabTest {
            return Err(ClientError::Form(format!("{}: no target selected", self.kind.title())));
        }
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(ClientError::Form(format!(
                "{}: {} required",
                self.kind.title(),
                missing.join(", ")
            )));
        }
        Ok(())
    }

    pub(crate) fn required(&self, name: &str) -> ClientResult<String> {
        self.value(name).map(str::to_string).ok_or_else(|| {
            ClientError::Form(format!("{}: {name} is required", self.kind.title()))
        })
    }

    pub(crate) fn date(&self, name: &str) -> ClientResult<NaiveDate> {
        let raw = self.required(name)?;
        NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map_err(|_| ClientError::Form(format!("{raw:?} is not a date (YYYY-MM-DD)")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_fields_by_type() {
        let names: Vec<_> = ModalType::UpdateStatus.fields().iter().map(|f| f.name).collect();
        assert_eq!(names, ["status", "note"]);
        assert!(ModalType::SubmitReport
            .fields()
            .iter()
            .any(|f| f.kind == FieldKind::Photos));
    }

    #[test]
    fn test_every_modal_has_a_required_field() {
        for kind in [
            ModalType::AssignComplaint,
            ModalType::UpdateStatus,
            ModalType::SendNotification,
            ModalType::ScheduleVisit,
            ModalType::RejectPlant,
            ModalType::SubmitReport,
            ModalType::BookLabTest,
        ] {
            let fields: &'static [FormField] = kind.fields();
            assert!(fields.iter().any(|f| f.required), "{kind:?}");
        }
    }

    #[test]
    fn test_modal_required_fields() {
        let modal = Modal::new(ModalType::ScheduleVisit, "c1").with("notes", "bring sampling kit");
        assert_eq!(modal.missing_required(), ["Visit date"]);
        assert!(modal.check().is_err());

        let modal = modal.with("scheduledDate", "2026-11-03");
        assert!(modal.check().is_ok());
        assert_eq!(
            modal.date("scheduledDate").unwrap(),
            NaiveDate::from_ymd_opt(2026, 11, 3).unwrap()
        );
    }

    #[test]
    fn test_modal_needs_target() {
        let modal = Modal::new(ModalType::RejectPlant, " ").with("reason", "expired licence");
        assert!(matches!(modal.check(), Err(ClientError::Form(_))));
    }

    #[test]
    fn test_bad_date() {
        let modal = Modal::new(ModalType::ScheduleVisit, "c1").with("scheduledDate", "03/11/2026");
        assert!(modal.date("scheduledDate").is_err());
    }

    #[test]
    fn test_sentence_case() {
        assert_eq!(sentence_case("assign complaint"), "Assign complaint");
        assert_eq!(sentence_case(""), "");
    }
}
