//! Session manager
//!
//! Replaces an ambient auth context with an explicit object:
//!
//! - [`SessionHandle`]: the shared session (token + typed state + storage),
//!   injected into the [`ApiClient`] so the 401 interceptor can tear it down
//! - [`SessionManager`]: the lifecycle (`init` / `refresh` / `login` /
//!   `register` / `logout`)
//!
//! There is no token refresh flow. Expiry is handled reactively when the API
//! answers 401.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use parking_lot::RwLock;
use shared::client::{AuthPayload, LoginRequest, RegisterRequest};
use shared::models::User;
use std::sync::Arc;

use crate::error::{ClientError, ClientResult};
use crate::http::ApiClient;
use crate::storage::{REFRESH_TOKEN_KEY, SessionStore, StoreError, TOKEN_KEY, USER_KEY};

/// Typed session state
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    /// True until `init` has read storage
    pub loading: bool,
    /// Token expiry (Unix seconds) when the token is a JWT carrying `exp`
    pub expires_at: Option<u64>,
}

impl SessionState {
    fn loading() -> Self {
        Self {
            user: None,
            is_authenticated: false,
            loading: true,
            expires_at: None,
        }
    }

    fn signed_out() -> Self {
        Self {
            loading: false,
            ..Self::loading()
        }
    }
}

/// Shared session: bearer token, state and the storage behind them
pub struct SessionHandle {
    token: RwLock<Option<String>>,
    state: RwLock<SessionState>,
    store: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("has_token", &self.token.read().is_some())
            .field("state", &*self.state.read())
            .finish()
    }
}

impl SessionHandle {
    pub fn new(store: Arc<dyn SessionStore>) -> Arc<Self> {
        Arc::new(Self {
            token: RwLock::new(None),
            state: RwLock::new(SessionState::loading()),
            store,
        })
    }

    /// Current bearer token
    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    pub fn state(&self) -> SessionState {
        self.state.read().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.read().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().is_authenticated
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Pin a token without touching storage (e.g. from configuration)
    pub fn pin_token(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    /// Read the stored session into memory
    ///
    /// Returns `true` when a token and a decodable user were found.
    pub(crate) fn restore(&self) -> bool {
        let token = self.store.get(TOKEN_KEY);
        let user = self
            .store
            .get(USER_KEY)
            .and_then(|raw| match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!(error = %e, "Stored user is unreadable, ignoring");
                    None
                }
            });

        match (token, user) {
            (Some(token), Some(user)) => {
                let expires_at = parse_jwt_exp(&token);
                *self.token.write() = Some(token);
                *self.state.write() = SessionState {
                    user: Some(user),
                    is_authenticated: true,
                    loading: false,
                    expires_at,
                };
                true
            }
            _ => {
                *self.token.write() = None;
                *self.state.write() = SessionState::signed_out();
                false
            }
        }
    }

    /// Persist a fresh login and pin its token
    pub(crate) fn establish(&self, payload: &AuthPayload) -> Result<(), StoreError> {
        self.store.set(TOKEN_KEY, &payload.token)?;
        match &payload.refresh_token {
            Some(refresh) => self.store.set(REFRESH_TOKEN_KEY, refresh)?,
            None => self.store.remove(REFRESH_TOKEN_KEY)?,
        }
        self.store
            .set(USER_KEY, &serde_json::to_string(&payload.user)?)?;

        *self.token.write() = Some(payload.token.clone());
        *self.state.write() = SessionState {
            user: Some(payload.user.clone()),
            is_authenticated: true,
            loading: false,
            expires_at: parse_jwt_exp(&payload.token),
        };
        Ok(())
    }

    /// Replace the user after a successful whoami
    pub(crate) fn update_user(&self, user: User) -> Result<(), StoreError> {
        self.store.set(USER_KEY, &serde_json::to_string(&user)?)?;
        self.state.write().user = Some(user);
        Ok(())
    }

    /// Clear storage and in-memory state
    ///
    /// Storage failures are logged; the in-memory session is cleared
    /// regardless so the process never keeps using a dead token.
    pub fn clear(&self) {
        for key in [TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.store.remove(key) {
                tracing::error!(key = %key, error = %e, "Failed to clear stored session key");
            }
        }
        *self.token.write() = None;
        *self.state.write() = SessionState::signed_out();
    }
}

/// Extract `exp` (Unix seconds) from a JWT without verifying it
pub fn parse_jwt_exp(token: &str) -> Option<u64> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    let payload_bytes = URL_SAFE_NO_PAD.decode(parts[1]).ok()?;
    let payload: serde_json::Value = serde_json::from_slice(&payload_bytes).ok()?;
    payload.get("exp")?.as_u64()
}

/// Session lifecycle
#[derive(Debug, Clone)]
pub struct SessionManager {
    api: ApiClient,
}

impl SessionManager {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn handle(&self) -> &Arc<SessionHandle> {
        self.api.session()
    }

    pub fn state(&self) -> SessionState {
        self.handle().state()
    }

    /// Read storage; optionally re-validate against `auth/me`
    pub async fn init(&self, revalidate: bool) -> SessionState {
        let restored = self.handle().restore();
        tracing::debug!(restored, "Session initialized from storage");

        if restored && revalidate {
            if let Err(e) = self.refresh().await {
                tracing::debug!(error = %e, "Session re-validation failed");
            }
        }
        self.state()
    }

    /// Re-validate the session against the server
    ///
    /// A 401 has already torn the session down by the time this returns. Any
    /// other failure keeps the stored user.
    pub async fn refresh(&self) -> ClientResult<User> {
        match self.api.me().await {
            Ok(user) => {
                self.handle()
                    .update_user(user.clone())
                    .map_err(store_error)?;
                Ok(user)
            }
            Err(ClientError::SessionExpired) => Err(ClientError::SessionExpired),
            Err(e) => {
                tracing::warn!(error = %e, "whoami failed, keeping stored user");
                Err(e)
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<User> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let payload = self.api.login(&request).await?;
        self.handle().establish(&payload).map_err(store_error)?;
        tracing::info!(user_id = %payload.user.id, role = %payload.user.role, "Signed in");
        Ok(payload.user)
    }

    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<User> {
        let payload = self.api.register(request).await?;
        self.handle().establish(&payload).map_err(store_error)?;
        tracing::info!(user_id = %payload.user.id, role = %payload.user.role, "Registered");
        Ok(payload.user)
    }

    /// Sign out: best-effort server notification, then local teardown
    pub async fn logout(&self) {
        if self.handle().token().is_some() {
            if let Err(e) = self.api.logout().await {
                tracing::debug!(error = %e, "Server-side logout failed, clearing locally");
            }
        }
        self.handle().clear();
        tracing::info!("Signed out");
    }
}

fn store_error(e: StoreError) -> ClientError {
    match e {
        StoreError::Io(e) => ClientError::Io(e),
        StoreError::Json(e) => ClientError::Serialization(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use shared::models::{Role, SubscriptionTier};

    fn user() -> User {
        User {
            id: "u1".into(),
            name: "Njeri".into(),
            email: "n@example.com".into(),
            role: Role::Owner,
            subscription_tier: SubscriptionTier::Pro,
            phone: None,
            is_active: true,
            created_at: None,
        }
    }

    fn jwt_with_exp(exp: u64) -> String {
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"u1","exp":{exp}}}"#));
        format!("e30.{payload}.sig")
    }

    #[test]
    fn test_parse_jwt_exp() {
        assert_eq!(parse_jwt_exp(&jwt_with_exp(1_900_000_000)), Some(1_900_000_000));
        assert_eq!(parse_jwt_exp("opaque-token"), None);
        assert_eq!(parse_jwt_exp("a.!!!.c"), None);
    }

    #[test]
    fn test_handle_starts_loading() {
        let handle = SessionHandle::new(Arc::new(MemoryStore::new()));
        let state = handle.state();
        assert!(state.loading);
        assert!(!state.is_authenticated);
    }

    #[test]
    fn test_establish_restore_clear() {
        let store: Arc<dyn SessionStore> = Arc::new(MemoryStore::new());
        let handle = SessionHandle::new(store.clone());
        let token = jwt_with_exp(1_900_000_000);

        handle
            .establish(&AuthPayload {
                token: token.clone(),
                refresh_token: Some("r1".into()),
                user: user(),
            })
            .unwrap();
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some(token.as_str()));
        assert_eq!(store.get(REFRESH_TOKEN_KEY).as_deref(), Some("r1"));

        let other = SessionHandle::new(store.clone());
        assert!(other.restore());
        let state = other.state();
        assert!(state.is_authenticated);
        assert_eq!(state.user.unwrap().email, "n@example.com");
        assert_eq!(state.expires_at, Some(1_900_000_000));

        other.clear();
        assert!(store.get(TOKEN_KEY).is_none());
        assert!(store.get(USER_KEY).is_none());
        assert!(other.token().is_none());
        assert!(!other.state().loading);
    }

    #[test]
    fn test_restore_requires_token_and_user() {
        let store: Arc<dyn SessionStore> = Arc::new(MemoryStore::new());
        store.set(TOKEN_KEY, "t").unwrap();
        store.set(USER_KEY, "{not json").unwrap();

        let handle = SessionHandle::new(store);
        assert!(!handle.restore());
        assert!(handle.token().is_none());
        assert!(!handle.state().loading);
    }
}
