//! Console context: one API client, session and notification sink per run

use anyhow::bail;
use aqua_client::guard::{self, Route, SIGN_IN};
use aqua_client::location::FixedLocation;
use aqua_client::{
    ApiClient, FileStore, Navigation, NotificationCenter, RedirectRecorder, SessionHandle,
    SessionManager, SessionState,
};
use std::io::{self, Write};
use std::sync::Arc;

use crate::config::Config;
use crate::render;

pub struct Console {
    api: ApiClient,
    manager: SessionManager,
    notifications: Arc<NotificationCenter>,
    redirects: Arc<RedirectRecorder>,
    location: FixedLocation,
}

impl Console {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let store = Arc::new(FileStore::load(&config.work_dir)?);
        tracing::debug!(path = %store.path().display(), "Session storage opened");

        let notifications = NotificationCenter::new();
        let redirects = RedirectRecorder::new();
        let api = ApiClient::new(
            config.client,
            SessionHandle::new(store),
            notifications.clone(),
            redirects.clone(),
        )?;

        Ok(Self {
            manager: SessionManager::new(api.clone()),
            api,
            notifications,
            redirects,
            location: FixedLocation::new(config.location),
        })
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn manager(&self) -> &SessionManager {
        &self.manager
    }

    pub fn location(&self) -> &FixedLocation {
        &self.location
    }

    pub fn session(&self) -> SessionState {
        self.manager.state()
    }

    /// Resolve the stored session
    pub async fn start(&self) -> SessionState {
        self.manager.init(false).await
    }

    /// Open a path through the route guard
    pub fn enter(&self, path: &str) -> anyhow::Result<&'static Route> {
        match guard::navigate(path, &self.session()) {
            Navigation::Render(route) => {
                tracing::debug!(path = %path, route = %route.pattern, "Route entered");
                Ok(route)
            }
            Navigation::Loading => bail!("Session is still loading"),
            Navigation::Redirect(SIGN_IN) => {
                bail!("{path} requires you to sign in first (aqua login)")
            }
            Navigation::Redirect(to) => {
                bail!("{path} is not available for your role, go to {to} instead")
            }
            Navigation::NotFound => bail!("No page at {path}"),
        }
    }

    /// Print pending notifications and redirects
    ///
    /// Returns how many notifications were shown.
    pub fn flush(&self, out: &mut impl Write) -> io::Result<usize> {
        let pending = self.notifications.drain();
        for n in &pending {
            render::notification(out, n)?;
        }
        if let Some(to) = self.redirects.take() {
            writeln!(out, "  -> {to}")?;
        }
        Ok(pending.len())
    }
}
