// aqua-client/src/api/plants.rs
// Plant registration and review

use serde_json::json;
use shared::models::{Plant, PlantCreate, PlantStatus};

use crate::error::ClientResult;
use crate::http::{ApiClient, invalid_response, segment};

impl ApiClient {
    /// GET plants/my (owner)
    pub async fn my_plants(&self) -> ClientResult<Vec<Plant>> {
        self.get_list("plants/my").await
    }

    /// GET plants?status=pending
    pub async fn plants_by_status(&self, status: PlantStatus) -> ClientResult<Vec<Plant>> {
        Ok(self
            .get_with_query("plants", &[("status", status.as_str())])
            .await?
            .into_list())
    }

    /// POST plants; the plant is created `pending`
    pub async fn create_plant(&self, plant: &PlantCreate) -> ClientResult<Plant> {
        self.post("plants", plant)
            .await?
            .into_item()
            .map_err(invalid_response)
    }

    /// PUT plants/{id}/approve
    pub async fn approve_plant(&self, plant_id: &str) -> ClientResult<()> {
        tracing::debug!(plant_id = %plant_id, "Approving plant");
        self.put(&format!("plants/{}/approve", segment(plant_id)?), &json!({}))
            .await?;
        Ok(())
    }

    /// PUT plants/{id}/reject
    pub async fn reject_plant(&self, plant_id: &str, reason: &str) -> ClientResult<()> {
        tracing::debug!(plant_id = %plant_id, "Rejecting plant");
        self.put(
            &format!("plants/{}/reject", segment(plant_id)?),
            &json!({ "reason": reason }),
        )
        .await?;
        Ok(())
    }
}
