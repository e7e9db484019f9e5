// aqua-client/src/api/auth.rs
// Authentication endpoints

use shared::client::{AuthPayload, LoginRequest, RegisterRequest};
use shared::models::User;

use crate::error::ClientResult;
use crate::http::{ApiClient, invalid_response};

impl ApiClient {
    /// POST auth/login
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<AuthPayload> {
        self.post("auth/login", request)
            .await?
            .item_under("auth")
            .map_err(invalid_response)
    }

    /// POST auth/register
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthPayload> {
        self.post("auth/register", request)
            .await?
            .item_under("auth")
            .map_err(invalid_response)
    }

    /// GET auth/me
    pub async fn me(&self) -> ClientResult<User> {
        self.get_item::<User>("auth/me").await
    }

    /// POST auth/logout
    pub async fn logout(&self) -> ClientResult<()> {
        self.post_empty("auth/logout").await?;
        Ok(())
    }
}
