//! Notification and navigation seams
//!
//! The API client never prints or redirects by itself. It hands
//! notifications to a [`Notifier`] and redirects to a [`Navigator`], both
//! injected by the host (the console, or a recorder in tests).

use parking_lot::Mutex;
use shared::message::Notification;
use std::collections::VecDeque;
use std::sync::Arc;

/// Sink for user-visible notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Receiver of redirect requests
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// In-memory notification queue
///
/// The console drains it after every command; tests inspect it.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    queue: Mutex<VecDeque<Notification>>,
}

impl NotificationCenter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Take every pending notification, oldest first
    pub fn drain(&self) -> Vec<Notification> {
        self.queue.lock().drain(..).collect()
    }

    /// Copy of the pending notifications
    pub fn pending(&self) -> Vec<Notification> {
        self.queue.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }
}

impl Notifier for NotificationCenter {
    fn notify(&self, notification: Notification) {
        tracing::debug!(
            level = %notification.level,
            title = %notification.title,
            "Notification queued"
        );
        self.queue.lock().push_back(notification);
    }
}

/// Records redirects; the last one wins
#[derive(Debug, Default)]
pub struct RedirectRecorder {
    last: Mutex<Option<String>>,
}

impl RedirectRecorder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Take the pending redirect, if any
    pub fn take(&self) -> Option<String> {
        self.last.lock().take()
    }

    pub fn peek(&self) -> Option<String> {
        self.last.lock().clone()
    }
}

impl Navigator for RedirectRecorder {
    fn navigate(&self, path: &str) {
        tracing::debug!(path = %path, "Redirect requested");
        *self.last.lock() = Some(path.to_string());
    }
}
