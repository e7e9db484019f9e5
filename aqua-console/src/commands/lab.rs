//! Lab sample bookings for plant owners

use anyhow::bail;
use aqua_client::dashboard::{DashboardView, OwnerDashboard};
use chrono::NaiveDate;
use clap::Subcommand;
use shared::models::{LabBookingCreate, LabTestType};
use std::io::{self, Write};

use crate::app::Console;
use crate::render;

#[derive(Subcommand, Debug)]
pub enum LabAction {
    /// List your bookings
    List,
    /// Book a test for one of your approved plants
    Book {
        #[arg(long)]
        plant: String,
        /// bacteriological, physico_chemical, heavy_metals or full_panel
        #[arg(long)]
        test: LabTestType,
        /// Preferred date, YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        notes: Option<String>,
    },
}

pub async fn run(console: &Console, action: LabAction) -> anyhow::Result<()> {
    console.enter("/lab-booking")?;
    let mut view = DashboardView::open(console.api().clone(), OwnerDashboard).await?;
    let mut out = io::stdout();

    match action {
        LabAction::List => {
            if let Some(snapshot) = view.snapshot() {
                render::lab_bookings(&mut out, &snapshot.lab_bookings)?;
            }
        }
        LabAction::Book {
            plant,
            test,
            date,
            notes,
        } => {
            let bookable = view
                .snapshot()
                .is_some_and(|s| s.bookable_plants().any(|p| p.id == plant));
            if !bookable {
                bail!("Plant {plant} is not one of your approved plants");
            }
            let booking = view
                .book_lab_test(LabBookingCreate {
                    plant_id: plant,
                    test_type: test,
                    scheduled_date: date,
                    notes: notes.filter(|n| !n.trim().is_empty()),
                })
                .await?;
            writeln!(out, "Booked {} test ({}), status {}", booking.test_type, booking.id, booking.status)?;
        }
    }
    Ok(())
}
