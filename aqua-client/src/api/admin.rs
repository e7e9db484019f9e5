// aqua-client/src/api/admin.rs
// Admin collections

use shared::models::{Complaint, LabBooking, Plant, User};

use crate::error::ClientResult;
use crate::http::ApiClient;

impl ApiClient {
    /// GET admin/plants
    pub async fn admin_plants(&self) -> ClientResult<Vec<Plant>> {
        self.get_list("admin/plants").await
    }

    /// GET admin/complaints
    pub async fn admin_complaints(&self) -> ClientResult<Vec<Complaint>> {
        self.get_list("admin/complaints").await
    }

    /// GET admin/users
    pub async fn admin_users(&self) -> ClientResult<Vec<User>> {
        self.get_list("admin/users").await
    }

    /// GET lab/bookings (all plants)
    pub async fn all_lab_bookings(&self) -> ClientResult<Vec<LabBooking>> {
        self.get_list("lab/bookings").await
    }
}
