//! Input validation functions
//!
//! Required profile fields are declared with the `validator` derive on
//! [`Profile`]; the helpers here turn its report into form-level messages and
//! check single-field input the way the form controls would.

use crate::models::{Profile, ProfileField};
use std::collections::HashSet;
use validator::Validate;

/// Required fields that are still blank, in form order
pub fn missing_required_fields(profile: &Profile) -> Vec<ProfileField> {
    let errors = match profile.validate() {
        Ok(()) => return Vec::new(),
        Err(errors) => errors,
    };
    let failed: HashSet<String> = errors
        .field_errors()
        .keys()
        .map(|key| key.to_string())
        .collect();

    ProfileField::FORM_ORDER
        .iter()
        .copied()
        .filter(|field| failed.contains(rust_field_name(*field)))
        .collect()
}

/// Validate a profile before submission
pub fn validate_profile(profile: &Profile) -> Result<(), String> {
    let missing = missing_required_fields(profile);
    if missing.is_empty() {
        return Ok(());
    }
    let labels: Vec<&str> = missing.iter().map(|field| short_label(*field)).collect();
    Err(format!(
        "Please fill in the required fields: {}",
        labels.join(", ")
    ))
}

/// Validate a single field value as the form control would accept it
///
/// Select fields only take one of their listed options, so an empty value is
/// rejected for them. Number fields only take a number. Free-text and number
/// fields accept an empty value so they can be cleared.
pub fn validate_field_input(field: ProfileField, value: &str) -> Result<(), String> {
    let options = field.options();
    if !options.is_empty() {
        if options.iter().any(|(option, _)| *option == value) {
            return Ok(());
        }
        let allowed: Vec<&str> = options.iter().map(|(option, _)| *option).collect();
        return Err(format!(
            "{} must be one of: {}",
            field.label(),
            allowed.join(", ")
        ));
    }

    if is_numeric(field) && !value.is_empty() {
        match value.parse::<f64>() {
            Ok(number) if number.is_finite() => {}
            _ => return Err(format!("{} must be a number", field.label())),
        }
    }

    Ok(())
}

fn is_numeric(field: ProfileField) -> bool {
    matches!(
        field,
        ProfileField::Age | ProfileField::Height | ProfileField::Weight
    )
}

/// Label without the unit suffix, for compact messages
fn short_label(field: ProfileField) -> &'static str {
    match field {
        ProfileField::Height => "Height",
        ProfileField::Weight => "Weight",
        ProfileField::MedicalHistory => "Medical History",
        other => other.label(),
    }
}

/// Struct field name the validator reports errors under
fn rust_field_name(field: ProfileField) -> &'static str {
    match field {
        ProfileField::FitnessLevel => "fitness_level",
        ProfileField::MedicalHistory => "medical_history",
        ProfileField::StressLevel => "stress_level",
        other => other.as_str(),
    }
}
