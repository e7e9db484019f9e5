//! Admin dashboard: every plant, complaint, user and lab booking

use async_trait::async_trait;
use chrono::Utc;
use shared::models::{
    Complaint, ComplaintStatus, LabBooking, NotificationTemplate, Plant, Role,
    SendNotificationRequest, User,
};
use std::collections::BTreeMap;

use super::stats::{ComplaintStats, LabStats, PlantStats};
use super::{DashboardSource, DashboardView, Modal, ModalType, fetch_or_default};
use crate::error::{ClientError, ClientResult};
use crate::http::ApiClient;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AdminTab {
    #[default]
    Overview,
    Plants,
    Complaints,
    Users,
    LabSamples,
}

impl AdminTab {
    pub const ALL: [AdminTab; 5] = [
        Self::Overview,
        Self::Plants,
        Self::Complaints,
        Self::Users,
        Self::LabSamples,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Plants => "Plants",
            Self::Complaints => "Complaints",
            Self::Users => "Users",
            Self::LabSamples => "Lab samples",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminSnapshot {
    pub plants: Vec<Plant>,
    pub complaints: Vec<Complaint>,
    pub users: Vec<User>,
    pub lab_bookings: Vec<LabBooking>,
    pub plant_stats: PlantStats,
    pub complaint_stats: ComplaintStats,
    pub lab_stats: LabStats,
}

impl AdminSnapshot {
    pub fn inspectors(&self) -> impl Iterator<Item = &User> {
        self.users.iter().filter(|u| u.role == Role::Inspector)
    }

    pub fn complaint(&self, id: &str) -> Option<&Complaint> {
        self.complaints.iter().find(|c| c.id == id)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AdminDashboard;

#[async_trait]
impl DashboardSource for AdminDashboard {
    type Snapshot = AdminSnapshot;

    const NAME: &'static str = "admin";

    fn roles(&self) -> &'static [Role] {
        &[Role::Admin]
    }

    async fn load(&self, api: &ApiClient) -> AdminSnapshot {
        let (plants, complaints, users, lab_bookings) = tokio::join!(
            fetch_or_default(api, "plants", api.admin_plants()),
            fetch_or_default(api, "complaints", api.admin_complaints()),
            fetch_or_default(api, "users", api.admin_users()),
            fetch_or_default(api, "lab bookings", api.all_lab_bookings()),
        );

        let now = Utc::now();
        AdminSnapshot {
            plant_stats: PlantStats::compute(&plants, now),
            complaint_stats: ComplaintStats::compute(&complaints, now),
            lab_stats: LabStats::compute(&lab_bookings, now),
            plants,
            complaints,
            users,
            lab_bookings,
        }
    }
}

impl DashboardView<AdminDashboard> {
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

    pub async fn assign_complaint(&mut self, complaint_id: &str, inspector_id: &str) -> ClientResult<()> {
        let api = self.api().clone();
        let (id, inspector) = (complaint_id.to_string(), inspector_id.to_string());
        self.mutate("assign complaint", async move {
            api.assign_complaint(&id, &inspector).await
        })
        .await
    }

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
            .ok_or_else(|| ClientError::Form(format!("Complaint {complaint_id} is not loaded")))?;
        let api = self.api().clone();
        let id = complaint_id.to_string();
        let note = note.map(str::to_string);
        self.mutate("update status", async move {
            api.update_complaint_status(&id, current, next, note.as_deref())
                .await
        })
        .await
    }

    pub async fn send_notification(&mut self, request: SendNotificationRequest) -> ClientResult<()> {
        let api = self.api().clone();
        self.mutate("send notification", async move {
            api.send_notification(&request).await
        })
        .await
    }

    pub async fn schedule_visit(
        &mut self,
        complaint_id: &str,
        date: chrono::NaiveDate,
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

    /// Dispatch a submitted modal to its action
    pub async fn submit_modal(&mut self, modal: Modal) -> ClientResult<()> {
        modal.check()?;
        match modal.kind {
            ModalType::AssignComplaint => {
                let inspector = modal.required("inspectorId")?;
                self.assign_complaint(&modal.target, &inspector).await
            }
            ModalType::UpdateStatus => {
                let status: ComplaintStatus = modal
                    .required("status")?
                    .parse()
                    .map_err(ClientError::Form)?;
                self.update_status(&modal.target, status, modal.value("note"))
                    .await
            }
            ModalType::SendNotification => {
                let template: NotificationTemplate = modal
                    .required("template")?
                    .parse()
                    .map_err(ClientError::Form)?;
                let variables: BTreeMap<String, String> = template
                    .variables()
                    .iter()
                    .filter_map(|name| modal.value(name).map(|v| (name.to_string(), v.to_string())))
                    .collect();
                self.send_notification(SendNotificationRequest {
                    recipient_id: modal.required("recipientId")?,
                    template,
                    variables,
                })
                .await
            }
            ModalType::ScheduleVisit => {
                let date = modal.date("scheduledDate")?;
                self.schedule_visit(&modal.target, date, modal.value("notes"))
                    .await
            }
            ModalType::RejectPlant => {
                let reason = modal.required("reason")?;
                self.reject_plant(&modal.target, &reason).await
            }
            ModalType::SubmitReport | ModalType::BookLabTest => Err(ClientError::Form(format!(
                "{} is not available on the admin dashboard",
                modal.kind.title()
            ))),
        }
    }
}
