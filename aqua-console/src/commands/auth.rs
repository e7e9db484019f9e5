//! Sign in, registration and session inspection

use clap::Args;
use shared::client::RegisterRequest;
use shared::models::{Role, SubscriptionTier};
use std::io::{self, Write};

use crate::app::Console;
use aqua_client::guard::DEFAULT_AUTHENTICATED;

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "AQUA_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "AQUA_PASSWORD", hide_env_values = true)]
    pub password: String,
    #[arg(long)]
    pub phone: Option<String>,
    /// owner, inspector or admin
    #[arg(long, default_value = "owner")]
    pub role: Role,
    /// free, pro or enterprise
    #[arg(long, default_value = "free")]
    pub tier: SubscriptionTier,
}

pub async fn login(console: &Console, args: LoginArgs) -> anyhow::Result<()> {
    console.enter("/signin")?;
    let user = console.manager().login(&args.email, &args.password).await?;
    let mut out = io::stdout();
    writeln!(out, "Signed in as {} ({})", user.name, user.role)?;
    writeln!(out, "Continue at {DEFAULT_AUTHENTICATED}: aqua dashboard")?;
    Ok(())
}

pub async fn register(console: &Console, args: RegisterArgs) -> anyhow::Result<()> {
    console.enter("/signup")?;
    let request = RegisterRequest {
        name: args.name.trim().to_string(),
        email: args.email.trim().to_string(),
        password: args.password,
        phone: args.phone.filter(|p| !p.trim().is_empty()),
        role: args.role,
        subscription_tier: args.tier,
    };
    let user = console.manager().register(&request).await?;
    writeln!(
        io::stdout(),
        "Account created for {} ({}, {} plan)",
        user.email,
        user.role,
        user.subscription_tier
    )?;
    Ok(())
}

pub async fn logout(console: &Console) -> anyhow::Result<()> {
    console.manager().logout().await;
    writeln!(io::stdout(), "Signed out")?;
    Ok(())
}

pub async fn whoami(console: &Console) -> anyhow::Result<()> {
    console.enter(DEFAULT_AUTHENTICATED)?;
    let user = console.manager().refresh().await?;
    let state = console.session();
    let mut out = io::stdout();
    writeln!(out, "{} <{}>", user.name, user.email)?;
    writeln!(out, "  Role: {}", user.role)?;
    writeln!(out, "  Plan: {}", user.subscription_tier)?;
    if let Some(exp) = state.expires_at {
        let expires = i64::try_from(exp)
            .ok()
            .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0));
        if let Some(at) = expires {
            writeln!(out, "  Token expires: {}", at.format("%Y-%m-%d %H:%M UTC"))?;
        }
    }
    Ok(())
}
