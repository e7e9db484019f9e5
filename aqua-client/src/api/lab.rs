// aqua-client/src/api/lab.rs
// Lab sample bookings

use shared::models::{LabBooking, LabBookingCreate};

use crate::error::ClientResult;
use crate::http::{ApiClient, invalid_response};

impl ApiClient {
    /// GET lab/bookings/my (owner)
    pub async fn my_lab_bookings(&self) -> ClientResult<Vec<LabBooking>> {
        self.get_list("lab/bookings/my").await
    }

    /// POST lab/bookings
    pub async fn book_lab_test(&self, booking: &LabBookingCreate) -> ClientResult<LabBooking> {
        tracing::debug!(plant_id = %booking.plant_id, test_type = %booking.test_type, "Booking lab test");
        self.post("lab/bookings", booking)
            .await?
            .into_item()
            .map_err(invalid_response)
    }
}
