// aqua-client/src/api/inspector.rs
// Inspector collections

use shared::models::{Complaint, Inspection};

use crate::error::ClientResult;
use crate::http::ApiClient;

impl ApiClient {
    /// GET inspector/complaints (assigned to the signed-in inspector)
    pub async fn assigned_complaints(&self) -> ClientResult<Vec<Complaint>> {
        self.get_list("inspector/complaints").await
    }

    /// GET inspections
    pub async fn inspections(&self) -> ClientResult<Vec<Inspection>> {
        self.get_list("inspections").await
    }
}
