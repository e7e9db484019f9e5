//! User-facing notifications
//!
//! A [`Notification`] is the transient message (toast) a failed or completed
//! action leaves for the user. Notifications terminate at the notification
//! layer; there is no telemetry sink behind them.

mod payload;

pub use payload::{Notification, NotificationLevel};
