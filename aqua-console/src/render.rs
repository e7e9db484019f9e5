//! Terminal rendering
//!
//! User-facing output goes through `writeln!` on the given writer so commands
//! can be exercised against a buffer.

use aqua_client::dashboard::stats::{ComplaintStats, LabStats, PlantStats};
use shared::message::{Notification, NotificationLevel};
use shared::models::{
    BadgeStyle, Complaint, Inspection, LabBooking, Plant, StatusBadge, User,
};
use shared::util::truncate_words;
use std::io::{self, Write};

const DESCRIPTION_WIDTH: usize = 40;

fn marker(style: BadgeStyle) -> &'static str {
    match style {
        BadgeStyle::Info => "i",
        BadgeStyle::Warning => "!",
        BadgeStyle::Progress => ">",
        BadgeStyle::Success => "+",
        BadgeStyle::Danger => "x",
        BadgeStyle::Neutral => "-",
    }
}

/// `[+ Resolved]`
pub fn badge(badge: &StatusBadge) -> String {
    format!("[{} {}]", marker(badge.style), badge.label)
}

pub fn notification(out: &mut impl Write, n: &Notification) -> io::Result<()> {
    let tag = match n.level {
        NotificationLevel::Success => "OK",
        NotificationLevel::Info => "INFO",
        NotificationLevel::Warning => "WARN",
        NotificationLevel::Error => "ERROR",
    };
    writeln!(out, "{tag:>5} | {}: {}", n.title, n.message)
}

fn date(at: Option<chrono::DateTime<chrono::Utc>>) -> String {
    at.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".into())
}

pub fn complaints(out: &mut impl Write, complaints: &[Complaint]) -> io::Result<()> {
    if complaints.is_empty() {
        return writeln!(out, "No complaints.");
    }
    writeln!(
        out,
        "{:<24}  {:<22}  {:<8}  {:<18}  {:<10}  DESCRIPTION",
        "ID", "STATUS", "PRIORITY", "ASSIGNED", "FILED"
    )?;
    for c in complaints {
        writeln!(
            out,
            "{:<24}  {:<22}  {:<8}  {:<18}  {:<10}  {}",
            c.reference(),
            badge(&StatusBadge::for_status(c.status)),
            c.priority,
            c.assigned_to.as_ref().map_or("-", |a| a.label()),
            date(c.created_at),
            truncate_words(&c.description, DESCRIPTION_WIDTH),
        )?;
    }
    Ok(())
}

/// Full detail for a tracked complaint
pub fn complaint_detail(out: &mut impl Write, c: &Complaint) -> io::Result<()> {
    writeln!(out, "Complaint {}", c.reference())?;
    writeln!(out, "  Status:    {}", badge(&StatusBadge::for_status(c.status)))?;
    writeln!(out, "  Priority:  {}", c.priority)?;
    writeln!(out, "  Category:  {}", c.category.as_str())?;
    if let Some(plant) = &c.plant_name {
        writeln!(out, "  Plant:     {plant}")?;
    }
    if let Some(location) = &c.location {
        writeln!(out, "  Location:  {location}")?;
    }
    writeln!(out, "  Filed:     {}", date(c.created_at))?;
    writeln!(out, "  {}", c.description)?;
    if !c.status_history.is_empty() {
        writeln!(out, "  History:")?;
        for change in &c.status_history {
            writeln!(
                out,
                "    {}  {}  {}",
                date(change.changed_at),
                badge(&StatusBadge::for_status(change.status)),
                change.note.as_deref().unwrap_or(""),
            )?;
        }
    }
    Ok(())
}

pub fn plants(out: &mut impl Write, plants: &[Plant]) -> io::Result<()> {
    if plants.is_empty() {
        return writeln!(out, "No plants.");
    }
    writeln!(
        out,
        "{:<24}  {:<28}  {:<10}  {:<18}  LOCATION",
        "ID", "NAME", "STATUS", "OWNER"
    )?;
    for p in plants {
        let location = p
            .location
            .as_ref()
            .map(|l| l.address.to_string())
            .unwrap_or_default();
        writeln!(
            out,
            "{:<24}  {:<28}  {:<10}  {:<18}  {}",
            p.id,
            p.name,
            p.status,
            p.owner.as_ref().map_or("-", |o| o.label()),
            location,
        )?;
        if let Some(reason) = &p.rejection_reason {
            writeln!(out, "{:<24}  rejected: {reason}", "")?;
        }
    }
    Ok(())
}

pub fn lab_bookings(out: &mut impl Write, bookings: &[LabBooking]) -> io::Result<()> {
    if bookings.is_empty() {
        return writeln!(out, "No lab bookings.");
    }
    writeln!(
        out,
        "{:<24}  {:<24}  {:<16}  {:<12}  DATE",
        "ID", "PLANT", "TEST", "STATUS"
    )?;
    for b in bookings {
        writeln!(
            out,
            "{:<24}  {:<24}  {:<16}  {:<12}  {}",
            b.id,
            b.plant.as_ref().map_or("-", |p| p.label()),
            b.test_type,
            b.status,
            date(b.scheduled_date),
        )?;
    }
    Ok(())
}

pub fn users(out: &mut impl Write, users: &[User]) -> io::Result<()> {
    if users.is_empty() {
        return writeln!(out, "No users.");
    }
    writeln!(out, "{:<24}  {:<24}  {:<32}  {:<10}  TIER", "ID", "NAME", "EMAIL", "ROLE")?;
    for u in users {
        writeln!(
            out,
            "{:<24}  {:<24}  {:<32}  {:<10}  {}{}",
            u.id,
            u.name,
            u.email,
            u.role,
            u.subscription_tier,
            if u.is_active { "" } else { " (inactive)" },
        )?;
    }
    Ok(())
}

pub fn inspections(out: &mut impl Write, inspections: &[Inspection]) -> io::Result<()> {
    if inspections.is_empty() {
        return writeln!(out, "No inspections.");
    }
    for i in inspections {
        let subject = i
            .plant
            .as_ref()
            .or(i.complaint.as_ref())
            .map_or("-", |s| s.label());
        writeln!(
            out,
            "{:<24}  {:<24}  {:<12}  {}",
            i.id,
            subject,
            format!("{:?}", i.status).to_lowercase(),
            date(i.scheduled_date),
        )?;
    }
    Ok(())
}

pub fn complaint_stats(out: &mut impl Write, stats: &ComplaintStats) -> io::Result<()> {
    writeln!(
        out,
        "Complaints: {} total, {} open, {} resolved, {} urgent, {} this week",
        stats.total, stats.open, stats.resolved, stats.urgent, stats.recent
    )?;
    let breakdown: Vec<String> = stats
        .by_status
        .iter()
        .filter(|(_, n)| *n > 0)
        .map(|(status, n)| format!("{}: {n}", status.label()))
        .collect();
    if !breakdown.is_empty() {
        writeln!(out, "  {}", breakdown.join(", "))?;
    }
    if stats.unrecognized > 0 {
        writeln!(out, "  {} with an unrecognized status", stats.unrecognized)?;
    }
    Ok(())
}

pub fn plant_stats(out: &mut impl Write, stats: &PlantStats) -> io::Result<()> {
    writeln!(
        out,
        "Plants: {} total, {} active, {} pending review, {} this week",
        stats.total,
        stats.active(),
        stats.pending(),
        stats.recent
    )
}

pub fn lab_stats(out: &mut impl Write, stats: &LabStats) -> io::Result<()> {
    writeln!(
        out,
        "Lab bookings: {} total, {} in the next week",
        stats.total, stats.upcoming
    )
}
