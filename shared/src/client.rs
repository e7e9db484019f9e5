//! Auth API DTOs shared between the client and the console

use serde::{Deserialize, Serialize};

use crate::models::{Role, SubscriptionTier, User};

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: Role,
    pub subscription_tier: SubscriptionTier,
}

/// Login / register response data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    #[serde(alias = "accessToken")]
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::Envelope;
    use serde_json::json;

    #[test]
    fn test_auth_payload_from_nested_envelope() {
        let env = Envelope::new(json!({
            "success": true,
            "data": {
                "accessToken": "jwt-abc",
                "refreshToken": "r-1",
                "user": {"_id": "u1", "name": "Wanjiku", "email": "w@example.com", "role": "owner"}
            }
        }));
        let payload: AuthPayload = env.item_under("auth").unwrap();
        assert_eq!(payload.token, "jwt-abc");
        assert_eq!(payload.refresh_token.as_deref(), Some("r-1"));
        assert_eq!(payload.user.role, Role::Owner);
        assert_eq!(payload.user.subscription_tier, SubscriptionTier::Free);
    }
}
