// aqua-client/tests/common/mod.rs
// Mock API server and client harness shared by the integration tests

#![allow(dead_code)]

use aqua_client::{
    ApiClient, ClientConfig, MemoryStore, NotificationCenter, RedirectRecorder, SessionHandle,
    SessionManager, SessionStore,
};
use axum::Router;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::sync::Arc;

/// One request seen by the mock server
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
}

/// Requests and JSON bodies received by the mock server
#[derive(Debug, Clone, Default)]
pub struct RequestLog {
    hits: Arc<Mutex<Vec<Hit>>>,
    bodies: Arc<Mutex<Vec<(String, Value)>>>,
}

impl RequestLog {
    pub fn hits(&self) -> Vec<Hit> {
        self.hits.lock().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.hits
            .lock()
            .iter()
            .map(|h| format!("{} {}", h.method, h.path))
            .collect()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.hits
            .lock()
            .iter()
            .filter(|h| h.method == method && h.path == path)
            .count()
    }

    pub fn record_body(&self, path: &str, body: Value) {
        self.bodies.lock().push((path.to_string(), body));
    }

    pub fn bodies(&self, path: &str) -> Vec<Value> {
        self.bodies
            .lock()
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, b)| b.clone())
            .collect()
    }
}

async fn record(State(log): State<RequestLog>, request: Request, next: Next) -> Response {
    let authorization = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    log.hits.lock().push(Hit {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        query: request.uri().query().map(str::to_string),
        authorization,
    });
    next.run(request).await
}

/// Serve `router` under `/api` on an ephemeral port
pub async fn spawn(router: Router, log: RequestLog) -> String {
    let app = Router::new()
        .nest("/api", router)
        .layer(middleware::from_fn_with_state(log, record));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

/// Base URL nothing listens on
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api")
}

pub struct TestClient {
    pub api: ApiClient,
    pub manager: SessionManager,
    pub store: Arc<MemoryStore>,
    pub notifications: Arc<NotificationCenter>,
    pub redirects: Arc<RedirectRecorder>,
}

pub fn client(base_url: &str) -> TestClient {
    let store = Arc::new(MemoryStore::new());
    let session = SessionHandle::new(store.clone());
    let notifications = NotificationCenter::new();
    let redirects = RedirectRecorder::new();
    let api = ApiClient::new(
        ClientConfig::new(base_url).with_timeout(5),
        session,
        notifications.clone(),
        redirects.clone(),
    )
    .unwrap();
    TestClient {
        manager: SessionManager::new(api.clone()),
        api,
        store,
        notifications,
        redirects,
    }
}

pub fn user_json(id: &str, role: &str, tier: &str) -> Value {
    json!({
        "_id": id,
        "name": format!("User {id}"),
        "email": format!("{id}@example.com"),
        "role": role,
        "subscriptionTier": tier
    })
}

/// Seed storage as a previous login would have
pub fn seed_session(client: &TestClient, token: &str, user: &Value) {
    client.store.set("token", token).unwrap();
    client.store.set("user", &user.to_string()).unwrap();
}
