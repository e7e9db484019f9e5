//! Public complaint submission and tracking

use aqua_client::complaints::{self, ComplaintForm, TrackingForm, TrackingMethod};
use aqua_client::upload::Attachment;
use clap::{Args, Subcommand};
use shared::models::ComplaintCategory;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::app::Console;
use crate::render;

#[derive(Subcommand, Debug)]
pub enum ComplaintAction {
    /// File a complaint (no account needed)
    Submit(SubmitArgs),
    /// Look up a complaint by tracking token, or by id plus email or phone
    Track(TrackArgs),
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// water_quality, contamination, hygiene, pricing_dispute,
    /// unlicensed_operator, service_issue or other
    #[arg(long, default_value = "other")]
    pub category: ComplaintCategory,
    #[arg(long)]
    pub description: String,
    /// Where the problem was observed
    #[arg(long)]
    pub location: String,
    #[arg(long)]
    pub plant: Option<String>,
    /// Submit without contact details
    #[arg(long, conflicts_with_all = ["name", "email", "phone"])]
    pub anonymous: bool,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    /// Photo to attach (repeatable)
    #[arg(long = "photo")]
    pub photos: Vec<PathBuf>,
    /// Attach the device position
    #[arg(long)]
    pub locate: bool,
}

#[derive(Args, Debug)]
pub struct TrackArgs {
    #[arg(long, conflicts_with_all = ["id", "email", "phone"])]
    pub token: Option<String>,
    /// Complaint id, used with --email or --phone
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long, conflicts_with = "phone")]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
}

impl TrackArgs {
    pub fn into_form(self) -> TrackingForm {
        let method = if self.token.is_some() {
            TrackingMethod::Token
        } else if self.email.is_some() {
            TrackingMethod::Email
        } else if self.phone.is_some() {
            TrackingMethod::Phone
        } else {
            TrackingMethod::default()
        };
        TrackingForm {
            method,
            token: self.token.unwrap_or_default(),
            complaint_id: self.id.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
        }
    }
}

pub async fn run(console: &Console, action: ComplaintAction) -> anyhow::Result<()> {
    match action {
        ComplaintAction::Submit(args) => submit(console, args).await,
        ComplaintAction::Track(args) => track(console, args).await,
    }
}

async fn submit(console: &Console, args: SubmitArgs) -> anyhow::Result<()> {
    console.enter("/complaints/new")?;

    let mut form = ComplaintForm {
        category: args.category,
        description: args.description,
        plant_name: args.plant,
        location: args.location,
        is_anonymous: args.anonymous,
        contact_name: args.name,
        contact_email: args.email,
        contact_phone: args.phone,
        ..Default::default()
    };
    for path in &args.photos {
        form.add_photo(Attachment::from_path(path).await?)?;
    }
    if args.locate {
        if let Err(e) = form.capture_location(console.location()).await {
            tracing::warn!(error = %e, "Position not attached");
            writeln!(io::stderr(), "Position not attached: {e}")?;
        }
    }

    let receipt = complaints::submit(console.api(), form).await?;
    let mut out = io::stdout();
    writeln!(out, "Complaint id: {}", receipt.complaint_id)?;
    if let Some(token) = &receipt.tracking_token {
        writeln!(out, "Tracking token: {token}")?;
        writeln!(out, "Track it with: aqua complaint track --token {token}")?;
    }
    Ok(())
}

async fn track(console: &Console, args: TrackArgs) -> anyhow::Result<()> {
    console.enter("/complaints/track")?;
    let complaint = complaints::track(console.api(), &args.into_form()).await?;
    render::complaint_detail(&mut io::stdout(), &complaint)?;
    Ok(())
}
