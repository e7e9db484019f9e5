//! Plant setup wizard
//!
//! Four linear steps (business info, location, operations, review) over one
//! typed form. Every change goes through [`PlantFormAction`]; there is no
//! string-path traversal here. Progress lives only in memory and the plant
//! is created by a single `POST plants` from the review step.

use shared::models::{Address, Plant, PlantCreate, PlantLocation, PlantOperations};
use thiserror::Error;
use validator::Validate;

use crate::error::{ClientError, ClientResult};
use crate::http::ApiClient;
use crate::location::{LocationError, LocationProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    BusinessInfo,
    Location,
    Operations,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        Self::BusinessInfo,
        Self::Location,
        Self::Operations,
        Self::Review,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::BusinessInfo => "Business information",
            Self::Location => "Location",
            Self::Operations => "Operations",
            Self::Review => "Review",
        }
    }

    /// 1-based position shown as "Step n of 4"
    pub fn number(&self) -> usize {
        *self as usize + 1
    }

    fn next(self) -> Option<Self> {
        Self::ALL.get(self as usize + 1).copied()
    }

    fn prev(self) -> Option<Self> {
        (self as usize).checked_sub(1).map(|i| Self::ALL[i])
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("{}: {message}", .step.title())]
    Incomplete { step: WizardStep, message: String },

    #[error("The plant can only be submitted from the review step")]
    NotOnReview,
}

impl From<FormError> for ClientError {
    fn from(e: FormError) -> Self {
        ClientError::Form(e.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct BusinessInfo {
    #[validate(length(min = 1, message = "Business name is required"))]
    pub business_name: String,
    #[validate(length(min = 1, message = "License number is required"))]
    pub license_number: String,
    #[validate(length(min = 1, message = "Contact phone is required"))]
    pub contact_phone: String,
    #[validate(email(message = "Enter a valid contact email"))]
    pub contact_email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct LocationInfo {
    pub street: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "County is required"))]
    pub county: String,
    pub postal_code: String,
    /// `[longitude, latitude]`; `[0, 0]` until entered or captured
    pub coordinates: [f64; 2],
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct OperationsInfo {
    #[validate(length(min = 1, message = "Water source is required"))]
    pub water_source: String,
    #[validate(length(min = 1, message = "Select at least one treatment method"))]
    pub treatment_methods: Vec<String>,
    #[validate(range(min = 1.0, message = "Daily capacity must be at least 1 litre"))]
    pub daily_capacity: f64,
    pub operating_hours: String,
    pub staff_count: u32,
}

/// Whole wizard state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlantForm {
    pub business: BusinessInfo,
    pub location: LocationInfo,
    pub operations: OperationsInfo,
}

/// One typed edit of the form
#[derive(Debug, Clone, PartialEq)]
pub enum PlantFormAction {
    BusinessName(String),
    LicenseNumber(String),
    ContactPhone(String),
    ContactEmail(String),
    Street(String),
    City(String),
    County(String),
    PostalCode(String),
    Coordinates([f64; 2]),
    WaterSource(String),
    TreatmentMethods(Vec<String>),
    DailyCapacity(f64),
    OperatingHours(String),
    StaffCount(u32),
}

impl PlantForm {
    /// Apply one edit
    pub fn apply(&mut self, action: PlantFormAction) {
        use PlantFormAction::*;
        match action {
            BusinessName(v) => self.business.business_name = v,
            LicenseNumber(v) => self.business.license_number = v,
            ContactPhone(v) => self.business.contact_phone = v,
            ContactEmail(v) => self.business.contact_email = v,
            Street(v) => self.location.street = v,
            City(v) => self.location.city = v,
            County(v) => self.location.county = v,
            PostalCode(v) => self.location.postal_code = v,
            Coordinates(v) => self.location.coordinates = v,
            WaterSource(v) => self.operations.water_source = v,
            TreatmentMethods(v) => self.operations.treatment_methods = v,
            DailyCapacity(v) => self.operations.daily_capacity = v,
            OperatingHours(v) => self.operations.operating_hours = v,
            StaffCount(v) => self.operations.staff_count = v,
        }
    }

    /// Required-field check for one step
    pub fn validate_step(&self, step: WizardStep) -> Result<(), FormError> {
        let result = match step {
            WizardStep::BusinessInfo => self.business.validate(),
            WizardStep::Location => self.location.validate(),
            WizardStep::Operations => self.operations.validate(),
            WizardStep::Review => return Ok(()),
        };
        result.map_err(|errors| FormError::Incomplete {
            step,
            message: ClientError::from(errors).to_string(),
        })
    }

    /// Request body; coordinates are sent exactly as held
    pub fn payload(&self) -> PlantCreate {
        PlantCreate {
            business_name: self.business.business_name.trim().to_string(),
            license_number: self.business.license_number.trim().to_string(),
            contact_phone: self.business.contact_phone.trim().to_string(),
            contact_email: self.business.contact_email.trim().to_string(),
            location: PlantLocation {
                address: Address {
                    street: self.location.street.clone(),
                    city: self.location.city.clone(),
                    county: self.location.county.clone(),
                    postal_code: self.location.postal_code.clone(),
                },
                coordinates: self.location.coordinates,
            },
            operations: PlantOperations {
                water_source: self.operations.water_source.clone(),
                treatment_methods: self.operations.treatment_methods.clone(),
                daily_capacity: self.operations.daily_capacity,
                operating_hours: self.operations.operating_hours.clone(),
                staff_count: self.operations.staff_count,
            },
        }
    }
}

/// Wizard controller
#[derive(Debug, Clone, Default)]
pub struct PlantWizard {
    step: Option<WizardStep>,
    form: PlantForm,
}

impl PlantWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step.unwrap_or(WizardStep::BusinessInfo)
    }

    pub fn form(&self) -> &PlantForm {
        &self.form
    }

    pub fn dispatch(&mut self, action: PlantFormAction) {
        self.form.apply(action);
    }

    /// Advance when the current step is complete
    pub fn next(&mut self) -> Result<WizardStep, FormError> {
        let current = self.step();
        self.form.validate_step(current)?;
        let next = current.next().unwrap_or(current);
        self.step = Some(next);
        Ok(next)
    }

    pub fn back(&mut self) -> WizardStep {
        let prev = self.step().prev().unwrap_or(WizardStep::BusinessInfo);
        self.step = Some(prev);
        prev
    }

    /// Fill coordinates from the device; independent of manual entry
    pub async fn capture_location(
        &mut self,
        provider: &dyn LocationProvider,
    ) -> Result<[f64; 2], LocationError> {
        let coords = provider.current_position().await?.lng_lat();
        self.dispatch(PlantFormAction::Coordinates(coords));
        Ok(coords)
    }

    /// Create the plant from the review step
    ///
    /// All steps are re-validated. On failure the wizard keeps its state so
    /// the user can correct and resubmit.
    pub async fn submit(&self, api: &ApiClient) -> ClientResult<Plant> {
        if self.step() != WizardStep::Review {
            return Err(FormError::NotOnReview.into());
        }
        for step in WizardStep::ALL {
            self.form.validate_step(step)?;
        }

        let payload = self.form.payload();
        match api.create_plant(&payload).await {
            Ok(plant) => {
                tracing::info!(plant_id = %plant.id, "Plant registered, awaiting review");
                api.report_success(
                    "Plant registered",
                    format!("{} was submitted for review", plant.name),
                );
                Ok(plant)
            }
            Err(e) => {
                api.report_failure("register plant", &e);
                Err(e)
            }
        }
    }
}
