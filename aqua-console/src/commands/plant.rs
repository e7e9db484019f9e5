//! Plant setup wizard driven from the command line
//!
//! Fields arrive as `section.field=value` and are mapped onto typed wizard
//! actions here. Nothing past this edge sees a string path.

use anyhow::bail;
use aqua_client::location::GeoPoint;
use aqua_client::wizard::{PlantFormAction, PlantWizard, WizardStep};
use clap::Subcommand;
use std::io::{self, Write};
use thiserror::Error;

use super::parse_assignment;
use crate::app::Console;

#[derive(Subcommand, Debug)]
pub enum PlantAction {
    /// Walk the four setup steps and register the plant
    Setup {
        /// Field as section.field=value (repeatable, see `aqua plant fields`)
        #[arg(long = "set", value_parser = parse_assignment)]
        fields: Vec<(String, String)>,
        /// Fill coordinates from the device position
        #[arg(long)]
        locate: bool,
        /// Stop at the review step without submitting
        #[arg(long)]
        dry_run: bool,
    },
    /// List the accepted field paths
    Fields,
}

/// Accepted paths, in wizard order
pub const FIELD_PATHS: &[(&str, &str)] = &[
    ("business.name", "Business name"),
    ("business.license", "KEBS licence number"),
    ("business.phone", "Contact phone"),
    ("business.email", "Contact email"),
    ("location.street", "Street"),
    ("location.city", "City or town"),
    ("location.county", "County"),
    ("location.postal_code", "Postal code"),
    ("location.coordinates", "Position as lat,lng"),
    ("operations.water_source", "Water source"),
    ("operations.treatment", "Treatment methods, comma separated"),
    ("operations.capacity", "Daily capacity in litres"),
    ("operations.hours", "Operating hours"),
    ("operations.staff", "Number of staff"),
];

#[derive(Debug, Error, PartialEq)]
pub enum FieldPathError {
    #[error("unknown field {0:?}, see `aqua plant fields`")]
    Unknown(String),

    #[error("{path}: {reason}")]
    Invalid { path: String, reason: String },
}

fn invalid(path: &str, reason: impl ToString) -> FieldPathError {
    FieldPathError::Invalid {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

/// Map `section.field` and its raw value onto a typed action
pub fn parse_field(path: &str, value: &str) -> Result<PlantFormAction, FieldPathError> {
    use PlantFormAction::*;
    let text = value.to_string();
    let action = match path {
        "business.name" => BusinessName(text),
        "business.license" => LicenseNumber(text),
        "business.phone" => ContactPhone(text),
        "business.email" => ContactEmail(text),
        "location.street" => Street(text),
        "location.city" => City(text),
        "location.county" => County(text),
        "location.postal_code" => PostalCode(text),
        "location.coordinates" => {
            let point: GeoPoint = value.parse().map_err(|e| invalid(path, e))?;
            Coordinates(point.lng_lat())
        }
        "operations.water_source" => WaterSource(text),
        "operations.treatment" => TreatmentMethods(
            value
                .split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        "operations.capacity" => {
            DailyCapacity(value.parse().map_err(|_| invalid(path, "expected a number"))?)
        }
        "operations.hours" => OperatingHours(text),
        "operations.staff" => {
            StaffCount(value.parse().map_err(|_| invalid(path, "expected a whole number"))?)
        }
        other => return Err(FieldPathError::Unknown(other.to_string())),
    };
    Ok(action)
}

pub async fn run(console: &Console, action: PlantAction) -> anyhow::Result<()> {
    match action {
        PlantAction::Fields => {
            let mut out = io::stdout();
            for (path, label) in FIELD_PATHS {
                writeln!(out, "  {path:<26} {label}")?;
            }
            Ok(())
        }
        PlantAction::Setup {
            fields,
            locate,
            dry_run,
        } => setup(console, fields, locate, dry_run).await,
    }
}

async fn setup(
    console: &Console,
    fields: Vec<(String, String)>,
    locate: bool,
    dry_run: bool,
) -> anyhow::Result<()> {
    console.enter("/plant-setup")?;
    let mut out = io::stdout();

    let mut wizard = PlantWizard::new();
    for (path, value) in &fields {
        wizard.dispatch(parse_field(path, value)?);
    }
    if locate {
        match wizard.capture_location(console.location()).await {
            Ok([lng, lat]) => writeln!(out, "Position captured: {lat}, {lng}")?,
            Err(e) => writeln!(out, "Position not captured ({e}), keeping entered coordinates")?,
        }
    }

    walk_to_review(&mut wizard, &mut out)?;
    writeln!(out, "Step {} of 4: {}", WizardStep::Review.number(), WizardStep::Review.title())?;
    writeln!(out, "{}", serde_json::to_string_pretty(&wizard.form().payload())?)?;

    if dry_run {
        writeln!(out, "Dry run, nothing submitted")?;
        return Ok(());
    }

    let plant = wizard.submit(console.api()).await?;
    writeln!(out, "Plant {} registered with status {}", plant.id, plant.status)?;
    Ok(())
}

/// Advance step by step, stopping at the first incomplete one
pub fn walk_to_review(wizard: &mut PlantWizard, out: &mut impl Write) -> anyhow::Result<()> {
    while wizard.step() != WizardStep::Review {
        let step = wizard.step();
        writeln!(out, "Step {} of 4: {}", step.number(), step.title())?;
        if let Err(e) = wizard.next() {
            bail!("{e}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_paths() {
        assert_eq!(
            parse_field("business.name", "Mountain Fresh").unwrap(),
            PlantFormAction::BusinessName("Mountain Fresh".into())
        );
        assert_eq!(
            parse_field("operations.treatment", "reverse osmosis, UV ,").unwrap(),
            PlantFormAction::TreatmentMethods(vec!["reverse osmosis".into(), "UV".into()])
        );
        assert_eq!(
            parse_field("operations.staff", "6").unwrap(),
            PlantFormAction::StaffCount(6)
        );
    }

    #[test]
    fn test_coordinates_are_stored_lng_lat() {
        assert_eq!(
            parse_field("location.coordinates", "-1.2921,36.8219").unwrap(),
            PlantFormAction::Coordinates([36.8219, -1.2921])
        );
    }

    #[test]
    fn test_parse_field_errors() {
        assert_eq!(
            parse_field("business.owner", "x"),
            Err(FieldPathError::Unknown("business.owner".into()))
        );
        assert!(matches!(
            parse_field("operations.capacity", "lots"),
            Err(FieldPathError::Invalid { .. })
        ));
        assert!(parse_field("location.coordinates", "north").is_err());
    }

    #[test]
    fn test_every_listed_path_parses() {
        for (path, _) in FIELD_PATHS {
            let sample = match *path {
                "location.coordinates" => "0,0",
                "operations.capacity" | "operations.staff" => "1",
                _ => "x",
            };
            assert!(parse_field(path, sample).is_ok(), "{path}");
        }
    }

    #[test]
    fn test_walk_stops_at_incomplete_step() {
        let mut wizard = PlantWizard::new();
        wizard.dispatch(PlantFormAction::BusinessName("Mountain Fresh".into()));
        let mut out = Vec::new();
        let err = walk_to_review(&mut wizard, &mut out).unwrap_err();
        assert!(err.to_string().starts_with(WizardStep::BusinessInfo.title()));
        assert_eq!(wizard.step(), WizardStep::BusinessInfo);
    }
}
