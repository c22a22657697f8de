//! Domain-level command and result types.
//!
//! These structs are what a presentation layer (form UI, CLI, HTTP handler)
//! exchanges with the domain services. The form DTO is assembled once at the
//! boundary; the services never reach into widgets or ambient state.

use crate::domain::models::appointment::Appointment;
use crate::domain::validation::FieldErrors;

/// Raw form input for creating or editing an appointment.
///
/// All fields arrive as the strings the user typed; parsing and rule
/// checking happen in the validator. An empty `appointment_id` means a new
/// appointment; a non-empty one means an edit of that record.
#[derive(Debug, Clone, Default)]
pub struct AppointmentForm {
    pub appointment_id: String,
    pub scheduled_at: String,
    pub notes: String,
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
    pub phone: String,
    pub date_of_birth: String,
}

/// Result of attempting to save an appointment.
#[derive(Debug, Clone)]
pub enum SaveAppointmentResult {
    /// The appointment was persisted; the full collection is returned in
    /// chronological order for display.
    Saved { appointments: Vec<Appointment> },
    /// Validation rejected the form; nothing was persisted.
    Rejected { field_errors: FieldErrors },
}

/// Result of listing appointments.
#[derive(Debug, Clone)]
pub struct ListAppointmentsResult {
    pub appointments: Vec<Appointment>,
}

/// Input for fetching a single appointment (the edit path).
#[derive(Debug, Clone)]
pub struct GetAppointmentCommand {
    pub appointment_id: String,
}

/// Result of fetching a single appointment.
#[derive(Debug, Clone)]
pub struct GetAppointmentResult {
    pub appointment: Option<Appointment>,
}

/// Command for deleting an appointment.
#[derive(Debug, Clone)]
pub struct DeleteAppointmentCommand {
    pub appointment_id: String,
}

/// Result of deleting an appointment.
#[derive(Debug, Clone)]
pub struct DeleteAppointmentResult {
    pub appointments: Vec<Appointment>,
}
