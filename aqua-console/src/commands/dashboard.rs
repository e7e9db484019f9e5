//! Role dashboards: one view per role, rendered tab by tab

use anyhow::bail;
use aqua_client::guard::DEFAULT_AUTHENTICATED;
use aqua_client::dashboard::admin::{AdminDashboard, AdminSnapshot, AdminTab};
use aqua_client::dashboard::inspector::{InspectorDashboard, InspectorSnapshot, InspectorTab};
use aqua_client::dashboard::owner::{OwnerDashboard, OwnerSnapshot, OwnerTab};
use aqua_client::dashboard::{DashboardView, FieldKind, Modal, ModalType};
use aqua_client::upload::Attachment;
use clap::{Subcommand, ValueEnum};
use shared::models::{ComplaintStatus, NotificationTemplate, Role};
use std::io::{self, Write};
use std::path::PathBuf;

use super::parse_assignment;
use crate::app::Console;
use crate::render;

#[derive(Subcommand, Debug)]
pub enum DashboardAction {
    /// Show a tab (default: overview)
    Show {
        #[arg(long, value_enum)]
        tab: Option<TabArg>,
    },
    /// Describe the fields of an action form
    Form {
        #[arg(value_enum)]
        action: ActionArg,
    },
    /// Submit an action form
    Act {
        #[arg(value_enum)]
        action: ActionArg,
        /// Complaint or plant id the action applies to
        target: Option<String>,
        /// Form value as name=value (repeatable)
        #[arg(long = "set", value_parser = parse_assignment)]
        values: Vec<(String, String)>,
        /// Photo to attach to a report (repeatable)
        #[arg(long = "photo")]
        photos: Vec<PathBuf>,
    },
}

impl Default for DashboardAction {
    fn default() -> Self {
        Self::Show { tab: None }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabArg {
    Overview,
    Plants,
    Complaints,
    Users,
    Lab,
    Inspections,
    Pending,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionArg {
    Assign,
    Status,
    Notify,
    Visit,
    Approve,
    Reject,
    Report,
    Book,
}

/// What `act` resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Modal(ModalType),
    ApprovePlant,
}

impl From<ActionArg> for Action {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::Assign => Self::Modal(ModalType::AssignComplaint),
            ActionArg::Status => Self::Modal(ModalType::UpdateStatus),
            ActionArg::Notify => Self::Modal(ModalType::SendNotification),
            ActionArg::Visit => Self::Modal(ModalType::ScheduleVisit),
            ActionArg::Approve => Self::ApprovePlant,
            ActionArg::Reject => Self::Modal(ModalType::RejectPlant),
            ActionArg::Report => Self::Modal(ModalType::SubmitReport),
            ActionArg::Book => Self::Modal(ModalType::BookLabTest),
        }
    }
}

fn admin_tab(tab: TabArg) -> Option<AdminTab> {
    match tab {
        TabArg::Overview => Some(AdminTab::Overview),
        TabArg::Plants | TabArg::Pending => Some(AdminTab::Plants),
        TabArg::Complaints => Some(AdminTab::Complaints),
        TabArg::Users => Some(AdminTab::Users),
        TabArg::Lab => Some(AdminTab::LabSamples),
        TabArg::Inspections => None,
    }
}

fn inspector_tab(tab: TabArg) -> Option<InspectorTab> {
    match tab {
        TabArg::Overview => Some(InspectorTab::Overview),
        TabArg::Complaints => Some(InspectorTab::Complaints),
        TabArg::Inspections => Some(InspectorTab::Inspections),
        TabArg::Plants | TabArg::Pending => Some(InspectorTab::PendingPlants),
        TabArg::Users | TabArg::Lab => None,
    }
}

fn owner_tab(tab: TabArg) -> Option<OwnerTab> {
    match tab {
        TabArg::Overview => Some(OwnerTab::Overview),
        TabArg::Plants => Some(OwnerTab::Plants),
        TabArg::Lab => Some(OwnerTab::LabBookings),
        _ => None,
    }
}

fn no_tab(tab: TabArg, role: Role) -> anyhow::Error {
    anyhow::anyhow!("The {role} dashboard has no {tab:?} tab")
}

pub async fn run(console: &Console, action: DashboardAction) -> anyhow::Result<()> {
    console.enter(DEFAULT_AUTHENTICATED)?;
    let Some(user) = console.session().user else {
        bail!("Session has no user");
    };

    match action {
        DashboardAction::Show { tab } => show(console, user.role, tab.unwrap_or(TabArg::Overview)).await,
        DashboardAction::Form { action } => describe(action.into(), user.role),
        DashboardAction::Act {
            action,
            target,
            values,
            photos,
        } => act(console, user.role, action.into(), target, values, photos).await,
    }
}

async fn show(console: &Console, role: Role, tab: TabArg) -> anyhow::Result<()> {
    let mut out = io::stdout();
    let api = console.api().clone();
    match role {
        Role::Admin => {
            let tab = admin_tab(tab).ok_or_else(|| no_tab(tab, role))?;
            let view = DashboardView::open(api, AdminDashboard).await?;
            if let Some(snapshot) = view.snapshot() {
                write_admin(&mut out, tab, snapshot)?;
            }
        }
        Role::Inspector => {
            let tab = inspector_tab(tab).ok_or_else(|| no_tab(tab, role))?;
            let view = DashboardView::open(api, InspectorDashboard).await?;
            if let Some(snapshot) = view.snapshot() {
                write_inspector(&mut out, tab, snapshot)?;
            }
        }
        Role::Owner => {
            let tab = owner_tab(tab).ok_or_else(|| no_tab(tab, role))?;
            let view = DashboardView::open(api, OwnerDashboard).await?;
            if let Some(snapshot) = view.snapshot() {
                write_owner(&mut out, tab, snapshot)?;
            }
        }
    }
    Ok(())
}

fn heading(out: &mut impl Write, dashboard: &str, tab: &str) -> io::Result<()> {
    writeln!(out, "== {dashboard} / {tab} ==")
}

pub fn write_admin(out: &mut impl Write, tab: AdminTab, s: &AdminSnapshot) -> io::Result<()> {
    heading(out, "Admin", tab.title())?;
    match tab {
        AdminTab::Overview => {
            render::plant_stats(out, &s.plant_stats)?;
            render::complaint_stats(out, &s.complaint_stats)?;
            render::lab_stats(out, &s.lab_stats)?;
            writeln!(
                out,
                "Users: {} ({} inspectors)",
                s.users.len(),
                s.inspectors().count()
            )
        }
        AdminTab::Plants => render::plants(out, &s.plants),
        AdminTab::Complaints => render::complaints(out, &s.complaints),
        AdminTab::Users => render::users(out, &s.users),
        AdminTab::LabSamples => render::lab_bookings(out, &s.lab_bookings),
    }
}

pub fn write_inspector(
    out: &mut impl Write,
    tab: InspectorTab,
    s: &InspectorSnapshot,
) -> io::Result<()> {
    heading(out, "Inspector", tab.title())?;
    match tab {
        InspectorTab::Overview => {
            render::complaint_stats(out, &s.complaint_stats)?;
            writeln!(
                out,
                "Inspections: {}, plants awaiting review: {}",
                s.inspections.len(),
                s.pending_plants.len()
            )
        }
        InspectorTab::Complaints => render::complaints(out, &s.complaints),
        InspectorTab::Inspections => render::inspections(out, &s.inspections),
        InspectorTab::PendingPlants => render::plants(out, &s.pending_plants),
    }
}

pub fn write_owner(out: &mut impl Write, tab: OwnerTab, s: &OwnerSnapshot) -> io::Result<()> {
    heading(out, "Owner", tab.title())?;
    match tab {
        OwnerTab::Overview => {
            render::plant_stats(out, &s.plant_stats)?;
            render::lab_stats(out, &s.lab_stats)
        }
        OwnerTab::Plants => render::plants(out, &s.plants),
        OwnerTab::LabBookings => render::lab_bookings(out, &s.lab_bookings),
    }
}

fn describe(action: Action, role: Role) -> anyhow::Result<()> {
    let mut out = io::stdout();
    let Action::Modal(kind) = action else {
        writeln!(out, "Approve plant: no fields, pass the plant id")?;
        return Ok(());
    };
    writeln!(out, "{}", kind.title())?;
    for field in kind.fields() {
        let kind_hint = match field.kind {
            FieldKind::Text | FieldKind::TextArea => "text",
            FieldKind::Date => "YYYY-MM-DD",
            FieldKind::Select => "choice",
            FieldKind::Photos => "--photo <path>",
        };
        writeln!(
            out,
            "  {:<16} {:<16} {}{}",
            field.name,
            field.label,
            kind_hint,
            if field.required { ", required" } else { "" }
        )?;
    }
    for line in choices(kind, role) {
        writeln!(out, "  {line}")?;
    }
    Ok(())
}

/// Fixed option sets for select fields
fn choices(kind: ModalType, role: Role) -> Vec<String> {
    match kind {
        ModalType::UpdateStatus => {
            vec![format!(
                "status: one of the next states allowed for the complaint ({})",
                ComplaintStatus::KNOWN.map(|s| s.as_str()).join(", ")
            )]
        }
        ModalType::SendNotification => NotificationTemplate::ALL
            .iter()
            .map(|t| format!("template {}: needs {}", t.as_str(), t.variables().join(", ")))
            .collect(),
        ModalType::BookLabTest if role == Role::Owner => vec![
            "testType: bacteriological, physico_chemical, heavy_metals, full_panel".to_string(),
        ],
        _ => Vec::new(),
    }
}

async fn act(
    console: &Console,
    role: Role,
    action: Action,
    target: Option<String>,
    values: Vec<(String, String)>,
    photos: Vec<PathBuf>,
) -> anyhow::Result<()> {
    let target = target.unwrap_or_default();
    let api = console.api().clone();
    let mut out = io::stdout();

    let kind = match action {
        Action::ApprovePlant => {
            if target.trim().is_empty() {
                bail!("Approve plant: no target selected");
            }
            match role {
                Role::Admin => {
                    let mut view = DashboardView::open(api, AdminDashboard).await?;
                    view.approve_plant(&target).await?;
                }
                Role::Inspector => {
                    let mut view = DashboardView::open(api, InspectorDashboard).await?;
                    view.approve_plant(&target).await?;
                }
                Role::Owner => bail!("Plants are approved by inspectors and admins"),
            }
            return Ok(());
        }
        Action::Modal(kind) => kind,
    };

    let mut modal = Modal::new(kind, target);
    for (name, value) in values {
        modal.set(name, value);
    }
    for path in &photos {
        modal.attach(Attachment::from_path(path).await?)?;
    }

    match role {
        Role::Admin => {
            let mut view = DashboardView::open(api, AdminDashboard).await?;
            view.submit_modal(modal).await?;
        }
        Role::Inspector => {
            let mut view = DashboardView::open(api, InspectorDashboard).await?;
            view.submit_modal(modal).await?;
        }
        Role::Owner => {
            let mut view = DashboardView::open(api, OwnerDashboard).await?;
            let booking = view.submit_modal(modal).await?;
            writeln!(out, "Booked {} test ({})", booking.test_type, booking.id)?;
        }
    }
    Ok(())
}
