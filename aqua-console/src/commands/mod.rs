//! Console commands
//!
//! Each submodule owns one area of the application and enters its page
//! through the route guard before doing anything else.

pub mod auth;
pub mod chat;
pub mod complaint;
pub mod dashboard;
pub mod knowledge;
pub mod lab;
pub mod plant;

use clap::Subcommand;

use crate::app::Console;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in
    Login(auth::LoginArgs),
    /// Create an account
    Register(auth::RegisterArgs),
    /// Sign out and clear the stored session
    Logout,
    /// Show the signed-in user, re-validated against the server
    Whoami,
    /// Role dashboard
    Dashboard {
        #[command(subcommand)]
        action: Option<dashboard::DashboardAction>,
    },
    /// Submit or track a public complaint
    Complaint {
        #[command(subcommand)]
        action: complaint::ComplaintAction,
    },
    /// Register a plant
    Plant {
        #[command(subcommand)]
        action: plant::PlantAction,
    },
    /// Lab sample bookings
    Lab {
        #[command(subcommand)]
        action: lab::LabAction,
    },
    /// Knowledge hub articles
    Knowledge {
        #[command(subcommand)]
        action: knowledge::KnowledgeAction,
    },
    /// Chat with the AI assistant
    Chat,
}

pub async fn execute(console: &Console, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login(args) => auth::login(console, args).await,
        Command::Register(args) => auth::register(console, args).await,
        Command::Logout => auth::logout(console).await,
        Command::Whoami => auth::whoami(console).await,
        Command::Dashboard { action } => dashboard::run(console, action.unwrap_or_default()).await,
        Command::Complaint { action } => complaint::run(console, action).await,
        Command::Plant { action } => plant::run(console, action).await,
        Command::Lab { action } => lab::run(console, action).await,
        Command::Knowledge { action } => knowledge::run(console, action),
        Command::Chat => chat::run(console).await,
    }
}

/// Parse `name=value`
pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got {raw:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in {raw:?}"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}
