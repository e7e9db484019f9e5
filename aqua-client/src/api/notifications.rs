// aqua-client/src/api/notifications.rs
// Templated notifications

use shared::models::SendNotificationRequest;

use crate::error::{ClientError, ClientResult};
use crate::http::ApiClient;

impl ApiClient {
    /// POST notifications/send
    ///
    /// Rejected locally when a template variable is missing.
    pub async fn send_notification(&self, request: &SendNotificationRequest) -> ClientResult<()> {
        let missing = request.missing_variables();
        if !missing.is_empty() {
            return Err(ClientError::Form(format!(
                "Template {} requires: {}",
                request.template.as_str(),
                missing.join(", ")
            )));
        }
        self.post("notifications/send", request).await?;
        Ok(())
    }
}
