//! Typed endpoints, grouped by area
//!
//! Each submodule adds an `impl ApiClient` block. Paths are relative to the
//! configured base URL; every response goes through the envelope decoder.

mod admin;
mod ai;
mod auth;
mod complaints;
mod inspector;
mod lab;
mod notifications;
mod plants;

pub use complaints::TrackingLookup;
