//! HTTP client for the platform API
//!
//! One [`ApiClient`] per process. Every request carries the session's bearer
//! token when one is present, and every response passes through a single
//! interceptor that turns failures into exactly one notification:
//!
//! | Status | Effect |
//! |--------|--------|
//! | 401 | session cleared, redirect to sign-in, "session expired" |
//! | 403 | "no permission" |
//! | 404 | "resource not found" |
//! | 422 | per-field messages when an `errors` array is present, else generic |
//! | 429 | "too many requests" |
//! | 500 | generic server error |
//! | no response | "network error" |
//!
//! Nothing is retried. Other statuses come back as [`ClientError::Status`]
//! without a notification; feature code reports those itself.

use reqwest::{Client, Method, RequestBuilder, StatusCode, multipart::Form};
use serde::Serialize;
use shared::error::ErrorCategory;
use shared::message::Notification;
use shared::response::{Envelope, Resource};
use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::guard::SIGN_IN;
use crate::notify::{Navigator, Notifier};
use crate::session::SessionHandle;

/// HTTP client for making requests to the platform API
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
    session: Arc<SessionHandle>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .field("session", &self.session)
            .finish()
    }
}

impl ApiClient {
    /// Create a new API client from configuration
    pub fn new(
        config: ClientConfig,
        session: Arc<SessionHandle>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(ClientError::Setup)?;

        if let Some(token) = &config.token {
            session.pin_token(token.clone());
        }

        Ok(Self {
            client,
            config,
            session,
            notifier,
            navigator,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<SessionHandle> {
        &self.session
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    // ========== Raw requests ==========

    pub async fn get(&self, path: &str) -> ClientResult<Envelope> {
        self.send(self.request(Method::GET, path)).await
    }

    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<Envelope> {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<Envelope> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub async fn post_empty(&self, path: &str) -> ClientResult<Envelope> {
        self.send(self.request(Method::POST, path)).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<Envelope> {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn delete(&self, path: &str) -> ClientResult<Envelope> {
        self.send(self.request(Method::DELETE, path)).await
    }

    /// POST a multipart form (photo attachments)
    pub async fn post_multipart(&self, path: &str, form: Form) -> ClientResult<Envelope> {
        self.send(self.request(Method::POST, path).multipart(form)).await
    }

    // ========== Typed helpers ==========

    /// GET a collection through the envelope decoder
    pub async fn get_list<T: Resource>(&self, path: &str) -> ClientResult<Vec<T>> {
        Ok(self.get(path).await?.into_list())
    }

    /// GET a single item through the envelope decoder
    pub async fn get_item<T: Resource>(&self, path: &str) -> ClientResult<T> {
        self.get(path).await?.into_item().map_err(invalid_response)
    }

    // ========== Feature-level reporting ==========

    /// Report a failed feature operation ("assign complaint", "schedule visit")
    ///
    /// Skipped when the interceptor already notified, the view was torn
    /// down, or the request never left the client.
    pub fn report_failure(&self, operation: &str, error: &ClientError) {
        if error.is_surfaced() || error.is_cancelled() || error.is_local() {
            return;
        }
        tracing::warn!(operation = %operation, error = %error, "Operation failed");
        self.notifier.notify(Notification::failure(
            ErrorCategory::OperationFailed,
            format!("Failed to {operation}: {error}"),
        ));
    }

    pub fn report_success(&self, title: &str, message: impl Into<String>) {
        self.notifier.notify(Notification::success(title, message));
    }

    // ========== Internals ==========

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.url(path);
        tracing::debug!(method = %method, url = %url, "API request");
        let request = self.client.request(method, url);
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> ClientResult<Envelope> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "No response received");
                self.notifier
                    .notify(Notification::from_category(ErrorCategory::Network));
                return Err(ClientError::Network(e));
            }
        };
        self.handle_response(response).await
    }

    async fn handle_response(&self, response: reqwest::Response) -> ClientResult<Envelope> {
        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) if status.is_success() => {
                return Err(ClientError::InvalidResponse(e.to_string()));
            }
            Err(_) => String::new(),
        };
        let envelope = parse_body(&text);

        if !status.is_success() {
            return Err(self.intercept(status, &envelope));
        }

        if envelope.is_failure() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: envelope
                    .message()
                    .unwrap_or("Request was not successful")
                    .to_string(),
            });
        }

        Ok(envelope)
    }

    /// Translate a failed status into an error, notifying the user once
    fn intercept(&self, status: StatusCode, envelope: &Envelope) -> ClientError {
        let message = envelope
            .message()
            .map(str::to_string)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_string());

        let Some(category) = ErrorCategory::from_status(status) else {
            tracing::warn!(status = status.as_u16(), message = %message, "Request failed");
            return ClientError::Status {
                status: status.as_u16(),
                message,
            };
        };

        let (error, notification) = match category {
            ErrorCategory::AuthExpired => {
                self.session.clear();
                self.navigator.navigate(SIGN_IN);
                (
                    ClientError::SessionExpired,
                    Notification::from_category(category),
                )
            }
            ErrorCategory::PermissionDenied => (
                ClientError::Forbidden(message),
                Notification::from_category(category),
            ),
            ErrorCategory::NotFound => (
                ClientError::NotFound(message),
                Notification::from_category(category),
            ),
            ErrorCategory::ValidationFailed => match envelope.field_errors() {
                Some(fields) if !fields.is_empty() => {
                    let text = fields
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join("\n");
                    (
                        ClientError::Validation { message, fields },
                        Notification::failure(category, text),
                    )
                }
                _ => (
                    ClientError::Validation {
                        message,
                        fields: Vec::new(),
                    },
                    Notification::from_category(category),
                ),
            },
            ErrorCategory::RateLimited => (
                ClientError::RateLimited,
                Notification::from_category(category),
            ),
            ErrorCategory::ServerFault => (
                ClientError::Server(message),
                Notification::from_category(category),
            ),
            ErrorCategory::Network | ErrorCategory::OperationFailed => {
                return ClientError::Status {
                    status: status.as_u16(),
                    message,
                };
            }
        };

        tracing::warn!(status = status.as_u16(), category = %category, "Request failed");
        self.notifier.notify(notification);
        error
    }
}

fn parse_body(text: &str) -> Envelope {
    if text.trim().is_empty() {
        return Envelope::empty();
    }
    match serde_json::from_str(text) {
        Ok(value) => Envelope::new(value),
        Err(_) => Envelope::new(serde_json::json!({ "message": text })),
    }
}

/// Percent-encode one caller-supplied path segment (id, token, session id)
///
/// Dot segments are rejected since URL normalization would resolve them
/// against the surrounding path.
pub(crate) fn segment(raw: &str) -> ClientResult<Cow<'_, str>> {
    match raw {
        "" => Err(ClientError::Form("Missing identifier".into())),
        "." | ".." => Err(ClientError::Form(format!("{raw:?} is not a valid identifier"))),
        _ => Ok(urlencoding::encode(raw)),
    }
}

pub(crate) fn invalid_response(e: serde_json::Error) -> ClientError {
    ClientError::InvalidResponse(e.to_string())
}
