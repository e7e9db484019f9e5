//! Aqua Console - terminal shell for the water compliance platform
//!
//! Parses the command line, bootstraps logging and configuration, restores the
//! stored session and dispatches one command through the route guard.
//! Notifications raised while the command ran are printed before exit.

pub mod app;
pub mod commands;
pub mod config;
pub mod logging;
pub mod render;

use aqua_client::ClientError;
use aqua_client::location::GeoPoint;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use app::Console;
use commands::Command;
use config::Config;

#[derive(Parser, Debug)]
#[command(name = "aqua")]
#[command(version, about = "Water plant compliance console", long_about = None)]
pub struct Cli {
    /// API root
    #[arg(long, global = true, env = "AQUA_API_URL")]
    pub api_url: Option<String>,

    /// Directory for session storage and logs
    #[arg(long, global = true, env = "AQUA_WORK_DIR")]
    pub work_dir: Option<PathBuf>,

    /// Device position as lat,lng
    #[arg(long, global = true, env = "AQUA_LOCATION")]
    pub location: Option<GeoPoint>,

    /// Debug output on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = Config::from_env()?.with_overrides(cli.api_url, cli.work_dir, cli.location);
    let _guard = logging::init(&config.log_dir(), cli.verbose)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        api = %config.client.base_url,
        work_dir = %config.work_dir.display(),
        "Aqua console starting"
    );

    let console = Console::new(config)?;
    let state = console.start().await;
    tracing::debug!(authenticated = state.is_authenticated, "Session restored");

    let result = commands::execute(&console, cli.command).await;
    let shown = console.flush(&mut io::stdout())?;

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        // The notification already told the user what went wrong
        Err(e) if shown > 0 && e.downcast_ref::<ClientError>().is_some() => {
            tracing::debug!(error = %e, "Command failed after notifying");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_dashboard_act() {
        let cli = Cli::try_parse_from([
            "aqua",
            "dashboard",
            "act",
            "status",
            "c42",
            "--set",
            "status=investigating",
            "--set",
            "note=Site visit booked",
        ])
        .unwrap();
        let Command::Dashboard { action: Some(commands::dashboard::DashboardAction::Act { target, values, .. }) } =
            cli.command
        else {
            panic!("expected dashboard act");
        };
        assert_eq!(target.as_deref(), Some("c42"));
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_track_methods_conflict() {
        assert!(
            Cli::try_parse_from(["aqua", "complaint", "track", "--token", "T1", "--id", "c1"]).is_err()
        );
        assert!(
            Cli::try_parse_from([
                "aqua", "complaint", "track", "--id", "c1", "--email", "a@b.co", "--phone", "07"
            ])
            .is_err()
        );
    }

    #[test]
    fn test_location_flag_parses() {
        let cli = Cli::try_parse_from(["aqua", "--location=-0.09,34.76", "knowledge", "list"]).unwrap();
        assert_eq!(cli.location.unwrap().longitude, 34.76);
    }
}
