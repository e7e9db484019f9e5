//! Inspector dashboard: assigned complaints, inspections and plants
//! awaiting review

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use reqwest::multipart::Form;
use shared::models::{Complaint, ComplaintStatus, Inspection, Plant, PlantStatus, Role};

use super::stats::{ComplaintStats, PlantStats};
use super::{DashboardSource, DashboardView, Modal, ModalType, fetch_or_default};
use crate::error::{ClientError, ClientResult};
use crate::http::ApiClient;
use crate::upload::{self, Attachment};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InspectorTab {
    #[default]
    Overview,
    Complaints,
    Inspections,
    PendingPlants,
}

impl InspectorTab {
    pub const ALL: [InspectorTab; 4] = [
        Self::Overview,
        Self::Complaints,
        Self::Inspections,
        Self::PendingPlants,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Complaints => "Assigned complaints",
            Self::Inspections => "Inspections",
            Self::PendingPlants => "Pending plants",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InspectorSnapshot {
    pub complaints: Vec<Complaint>,
    pub inspections: Vec<Inspection>,
    pub pending_plants: Vec<Plant>,
    pub complaint_stats: ComplaintStats,
    pub plant_stats: PlantStats,
}

impl InspectorSnapshot {
    pub fn complaint(&self, id: &str) -> Option<&Complaint> {
        self.complaints.iter().find(|c| c.id == id)
    }
}

/// Inspection report body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InspectionReport {
    pub findings: String,
    pub recommendations: Option<String>,
    pub photos: Vec<Attachment>,
}

impl InspectionReport {
    fn into_multipart(self) -> ClientResult<Form> {
        if self.findings.trim().is_empty() {
            return Err(ClientError::Form("Findings are required".into()));
        }
        let mut form = Form::new().text("findings", self.findings.trim().to_string());
        if let Some(rec) = self.recommendations.filter(|r| !r.trim().is_empty()) {
            form = form.text("recommendations", rec);
        }
        upload::attach(form, "photos", self.photos)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InspectorDashboard;

#[async_trait]
impl DashboardSource for InspectorDashboard {
    type Snapshot = InspectorSnapshot;

    const NAME: &'static str = "inspector";

    fn roles(&self) -> &'static [Role] {
        &[Role::Inspector, Role::Admin]
    }

    async fn load(&self, api: &ApiClient) -> InspectorSnapshot {
        let (complaints, inspections, pending_plants) = tokio::join!(
            fetch_or_default(api, "complaints", api.assigned_complaints()),
            fetch_or_default(api, "inspections", api.inspections()),
            fetch_or_default(api, "pending plants", api.plants_by_status(PlantStatus::Pending)),
        );

        let now = Utc::now();
        InspectorSnapshot {
            complaint_stats: ComplaintStats::compute(&complaints, now),
            plant_stats: PlantStats::compute(&pending_plants, now),
            complaints,
            inspections,
            pending_plants,
        }
    }
}

impl DashboardView<InspectorDashboard> {
    pub async fn update_status(
        &mut self,
        complaint_id: &str,
        next: ComplaintStatus,
        note: Option<&str>,
    ) -> ClientResult<()> {
        let current = self
            .snapshot()
            .and_then(|s| s.complaint(complaint_id))
            .map(|c| c.status)
            .ok_or_else(|| ClientError::Form(format!("Complaint {complaint_id} is not assigned to you")))?;
        let api = self.api().clone();
        let id = complaint_id.to_string();
        let note = note.map(str::to_string);
        self.mutate("update status", async move {
            api.update_complaint_status(&id, current, next, note.as_deref())
                .await
        })
        .await
    }

    pub async fn schedule_visit(
        &mut self,
        complaint_id: &str,
        date: NaiveDate,
        notes: Option<&str>,
    ) -> ClientResult<()> {
        let api = self.api().clone();
        let id = complaint_id.to_string();
        let notes = notes.map(str::to_string);
        self.mutate("schedule visit", async move {
            api.schedule_visit(&id, date, notes.as_deref()).await
        })
        .await
    }

    pub async fn submit_report(&mut self, complaint_id: &str, report: InspectionReport) -> ClientResult<()> {
        let form = report.into_multipart()?;
        let api = self.api().clone();
        let id = complaint_id.to_string();
        self.mutate("submit report", async move { api.submit_report(&id, form).await })
            .await
    }

    pub async fn approve_plant(&mut self, plant_id: &str) -> ClientResult<()> {
        let api = self.api().clone();
        let id = plant_id.to_string();
        self.mutate("approve plant", async move { api.approve_plant(&id).await })
            .await
    }

    pub async fn reject_plant(&mut self, plant_id: &str, reason: &str) -> ClientResult<()> {
        let api = self.api().clone();
        let (id, reason) = (plant_id.to_string(), reason.to_string());
        self.mutate("reject plant", async move { api.reject_plant(&id, &reason).await })
            .await
    }

    pub async fn submit_modal(&mut self, mut modal: Modal) -> ClientResult<()> {
        modal.check()?;
        match modal.kind {
            ModalType::UpdateStatus => {
                let status: ComplaintStatus = modal
                    .required("status")?
                    .parse()
                    .map_err(ClientError::Form)?;
                self.update_status(&modal.target, status, modal.value("note"))
                    .await
            }
            ModalType::ScheduleVisit => {
                let date = modal.date("scheduledDate")?;
                self.schedule_visit(&modal.target, date, modal.value("notes"))
                    .await
            }
            ModalType::SubmitReport => {
                let report = InspectionReport {
                    findings: modal.required("findings")?,
                    recommendations: modal.value("recommendations").map(str::to_string),
                    photos: modal.take_photos(),
                };
                let target = modal.target.clone();
                self.submit_report(&target, report).await
            }
            ModalType::RejectPlant => {
                let reason = modal.required("reason")?;
                self.reject_plant(&modal.target, &reason).await
            }
            ModalType::AssignComplaint | ModalType::SendNotification | ModalType::BookLabTest => {
                Err(ClientError::Form(format!(
                    "{} is not available on the inspector dashboard",
                    modal.kind.title()
                )))
            }
        }
    }
}
