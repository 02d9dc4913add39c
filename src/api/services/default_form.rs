//! The stock PFMO facility-assessment form.
//!
//! The mobile client reads submissions by these field names, so the list and
//! its order must stay as they are.

use crate::models::{FieldType, FormDraft, FormSchema, SchemaField};

/// Reserved name of the stock form.
pub const DEFAULT_FORM_NAME: &str = "PFMO Data Collection Form";
pub const DEFAULT_FORM_VERSION: &str = "2.0";
pub const DEFAULT_FORM_DESCRIPTION: &str = "Primary Healthcare Facility Data Collection Form - Complete assessment form with 12 sections including PFMO Identification, Health Facility Info, Officer-in-Charge, Funding Information, IMPACT Funding, Financial Validation, Infrastructure, Human Resources, Services & Utilization, Essential Commodities, Patient Satisfaction Survey, and Issue Escalation.";

pub fn default_form_schema() -> FormSchema {
    use FieldType::*;

    FormSchema::with_fields(vec![
        // PFMO identification
        SchemaField::new("pfmo_name", "PFMO Name", Text).required(),
        SchemaField::new("pfmo_phone", "PFMO Phone", Phone).required(),
        SchemaField::new("geopolitical_zone", "Geopolitical Zone", Select)
            .required()
            .with_options([
                "North Central",
                "North East",
                "North West",
                "South East",
                "South South",
                "South West",
            ]),
        SchemaField::new("state", "State", Text).required(),
        SchemaField::new("lga", "LGA", Text).required(),
        SchemaField::new("federal_inec_ward", "Federal INEC Ward", Text),
        SchemaField::new("other_ward", "Other Ward", Text),
        // Health facility
        SchemaField::new("facility_name", "Facility Name", Text).required(),
        SchemaField::new("facility_uid", "Facility UID", Text),
        SchemaField::new("assessment_type", "Assessment Type", Select)
            .with_options(["Initial", "Follow-up", "Reassessment"]),
        SchemaField::new("has_health_workers", "Has Health Workers", Select)
            .with_options(["Yes", "No"]),
        SchemaField::new("facility_condition", "Facility Condition", Select)
            .with_options(["Good", "Fair", "Poor", "Critical"]),
        SchemaField::new("ownership_type", "Ownership Type", Select)
            .with_options(["Public", "Private", "NGO", "Other"]),
        // Officer-in-charge
        SchemaField::new("oic_first_name", "OIC First Name", Text),
        SchemaField::new("oic_last_name", "OIC Last Name", Text),
        SchemaField::new("oic_gender", "OIC Gender", Select).with_options(["Male", "Female", "Other"]),
        SchemaField::new("oic_phone", "OIC Phone", Phone),
        SchemaField::new("oic_email", "OIC Email", Email),
        // GPS
        SchemaField::new("latitude", "Latitude", Number),
        SchemaField::new("longitude", "Longitude", Number),
    ])
}

/// Create payload for the stock form, marked active.
pub fn default_form_draft() -> FormDraft {
    let mut draft = FormDraft::new(DEFAULT_FORM_NAME, DEFAULT_FORM_VERSION, default_form_schema())
        .with_description(DEFAULT_FORM_DESCRIPTION);
    draft.is_active = Some(true);
    draft
}
