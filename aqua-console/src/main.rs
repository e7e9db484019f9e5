use clap::Parser;
use std::process::ExitCode;

use aqua_console::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    aqua_console::run(cli).await
}
