//! Owner dashboard: the owner's own plants and lab bookings

use async_trait::async_trait;
use chrono::Utc;
use shared::models::{LabBooking, LabBookingCreate, LabTestType, Plant, Role};

use super::stats::{LabStats, PlantStats};
use super::{DashboardSource, DashboardView, Modal, ModalType, fetch_or_default};
use crate::error::{ClientError, ClientResult};
use crate::http::ApiClient;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OwnerTab {
    #[default]
    Overview,
    Plants,
    LabBookings,
}

impl OwnerTab {
    pub const ALL: [OwnerTab; 3] = [Self::Overview, Self::Plants, Self::LabBookings];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Plants => "My plants",
            Self::LabBookings => "Lab bookings",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OwnerSnapshot {
    pub plants: Vec<Plant>,
    pub lab_bookings: Vec<LabBooking>,
    pub plant_stats: PlantStats,
    pub lab_stats: LabStats,
}

impl OwnerSnapshot {
    /// Plants a lab test may be booked for
    pub fn bookable_plants(&self) -> impl Iterator<Item = &Plant> {
        self.plants.iter().filter(|p| !p.status.awaits_review())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OwnerDashboard;

#[async_trait]
impl DashboardSource for OwnerDashboard {
    type Snapshot = OwnerSnapshot;

    const NAME: &'static str = "owner";

    fn roles(&self) -> &'static [Role] {
        &[Role::Owner]
    }

    async fn load(&self, api: &ApiClient) -> OwnerSnapshot {
        let (plants, lab_bookings) = tokio::join!(
            fetch_or_default(api, "plants", api.my_plants()),
            fetch_or_default(api, "lab bookings", api.my_lab_bookings()),
        );

        let now = Utc::now();
        OwnerSnapshot {
            plant_stats: PlantStats::compute(&plants, now),
            lab_stats: LabStats::compute(&lab_bookings, now),
            plants,
            lab_bookings,
        }
    }
}

impl DashboardView<OwnerDashboard> {
    pub async fn book_lab_test(&mut self, booking: LabBookingCreate) -> ClientResult<LabBooking> {
        let api = self.api().clone();
        self.mutate("book lab test", async move { api.book_lab_test(&booking).await })
            .await
    }

    pub async fn submit_modal(&mut self, modal: Modal) -> ClientResult<LabBooking> {
        if modal.kind != ModalType::BookLabTest {
            return Err(ClientError::Form(format!(
                "{} is not available on the owner dashboard",
                modal.kind.title()
            )));
        }
        modal.check()?;
        let test_type: LabTestType = modal
            .required("testType")?
            .parse()
            .map_err(ClientError::Form)?;
        self.book_lab_test(LabBookingCreate {
            plant_id: modal.required("plantId")?,
            test_type,
            scheduled_date: modal.date("scheduledDate")?,
            notes: modal.value("notes").map(str::to_string),
        })
        .await
    }
}
