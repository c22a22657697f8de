//! Rule engine for appointment booking.
//!
//! All business rules live here: surgery hours, weekdays, slot granularity,
//! double-booking detection and patient-field formats. The validator is a
//! pure function over the form input and the existing collection; it never
//! touches storage or the clock except through its parameters.

use chrono::{Datelike, Local, NaiveDateTime, Timelike, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

use crate::domain::commands::AppointmentForm;
use crate::domain::models::appointment::Appointment;

/// Field names used as keys in [`FieldErrors`].
pub mod fields {
    pub const SCHEDULED_AT: &str = "scheduled_at";
    pub const FIRST_NAME: &str = "first_name";
    pub const LAST_NAME: &str = "last_name";
    pub const NATIONAL_ID: &str = "national_id";
    pub const PHONE: &str = "phone";
    pub const DATE_OF_BIRTH: &str = "date_of_birth";
}

/// First bookable hour of the day.
pub const OPENING_HOUR: u32 = 8;
/// Hour of the last bookable slot.
pub const CLOSING_HOUR: u32 = 18;
/// Minute of the last bookable slot within [`CLOSING_HOUR`].
pub const CLOSING_MINUTE: u32 = 30;

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{9}$").unwrap());
static NATIONAL_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{8}[A-Za-z]$").unwrap());

/// Per-field validation messages, ordered by field name.
///
/// Each field carries at most one message. Known limitation: checks for a
/// field run in sequence and a later failure overwrites an earlier one, so
/// when several rules reject the same value the reported message is the
/// last rule that applied.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Outcome of validating an appointment form.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    Valid,
    Invalid(FieldErrors),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// The field errors, empty when valid.
    pub fn field_errors(&self) -> FieldErrors {
        match self {
            ValidationResult::Valid => FieldErrors::new(),
            ValidationResult::Invalid(errors) => errors.clone(),
        }
    }
}

/// Stateless validator for appointment forms.
pub struct AppointmentValidator;

impl AppointmentValidator {
    /// Validate a form against the wall clock and the existing collection.
    ///
    /// `ignore_id` excludes one record from conflict detection, so that an
    /// appointment being edited does not collide with itself.
    pub fn validate(
        form: &AppointmentForm,
        existing: &[Appointment],
        ignore_id: Option<&str>,
    ) -> ValidationResult {
        Self::validate_at(form, existing, ignore_id, Local::now().naive_local())
    }

    /// Validate against an explicit clock instant.
    pub fn validate_at(
        form: &AppointmentForm,
        existing: &[Appointment],
        ignore_id: Option<&str>,
        now: NaiveDateTime,
    ) -> ValidationResult {
        let mut errors = FieldErrors::new();

        Self::check_scheduled_at(form, existing, ignore_id, now, &mut errors);
        Self::check_patient_fields(form, &mut errors);

        if errors.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(errors)
        }
    }

    fn check_scheduled_at(
        form: &AppointmentForm,
        existing: &[Appointment],
        ignore_id: Option<&str>,
        now: NaiveDateTime,
        errors: &mut FieldErrors,
    ) {
        let raw = form.scheduled_at.trim();
        if raw.is_empty() {
            errors.insert(
                fields::SCHEDULED_AT,
                "The appointment date and time are required.".to_string(),
            );
            return;
        }

        let scheduled = match Appointment::parse_scheduled_at(raw) {
            Some(scheduled) => scheduled,
            None => {
                errors.insert(
                    fields::SCHEDULED_AT,
                    "The appointment date and time are not valid.".to_string(),
                );
                return;
            }
        };

        if scheduled <= now {
            errors.insert(
                fields::SCHEDULED_AT,
                "The appointment must be in the future.".to_string(),
            );
        }

        if matches!(scheduled.weekday(), Weekday::Sat | Weekday::Sun) {
            errors.insert(
                fields::SCHEDULED_AT,
                "Appointments can only be booked Monday to Friday.".to_string(),
            );
        }

        let hour = scheduled.hour();
        let minute = scheduled.minute();
        if hour < OPENING_HOUR || hour > CLOSING_HOUR {
            errors.insert(
                fields::SCHEDULED_AT,
                "Surgery hours are 08:00 to 18:30.".to_string(),
            );
        } else if hour == CLOSING_HOUR && minute > CLOSING_MINUTE {
            errors.insert(
                fields::SCHEDULED_AT,
                "The last appointment of the day is at 18:30.".to_string(),
            );
        }

        if minute != 0 && minute != 30 {
            errors.insert(
                fields::SCHEDULED_AT,
                "Appointments start every 30 minutes (e.g. 10:00 or 10:30).".to_string(),
            );
        }

        let conflict = existing
            .iter()
            .filter(|a| ignore_id != Some(a.id.as_str()))
            .any(|a| a.scheduled_at == scheduled);
        if conflict {
            errors.insert(
                fields::SCHEDULED_AT,
                "That time slot is already booked.".to_string(),
            );
        }
    }

    fn check_patient_fields(form: &AppointmentForm, errors: &mut FieldErrors) {
        if form.first_name.trim().is_empty() {
            errors.insert(fields::FIRST_NAME, "The first name is required.".to_string());
        }
        if form.last_name.trim().is_empty() {
            errors.insert(fields::LAST_NAME, "The last name is required.".to_string());
        }

        if !PHONE_RE.is_match(form.phone.trim()) {
            errors.insert(
                fields::PHONE,
                "The phone number must be 9 digits.".to_string(),
            );
        }

        if !NATIONAL_ID_RE.is_match(form.national_id.trim()) {
            errors.insert(
                fields::NATIONAL_ID,
                "The ID number must be 8 digits followed by a letter.".to_string(),
            );
        }

        let date_of_birth = form.date_of_birth.trim();
        if date_of_birth.is_empty() {
            errors.insert(
                fields::DATE_OF_BIRTH,
                "The date of birth is required.".to_string(),
            );
        } else if Appointment::parse_date_of_birth(date_of_birth).is_none() {
            errors.insert(
                fields::DATE_OF_BIRTH,
                "The date of birth is not a valid date.".to_string(),
            );
        }
    }
}
