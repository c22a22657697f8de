use anyhow::Result;
use log::{debug, info, warn};
use std::sync::Arc;

use crate::domain::commands::{
    AppointmentForm, DeleteAppointmentCommand, DeleteAppointmentResult, GetAppointmentCommand,
    GetAppointmentResult, ListAppointmentsResult, SaveAppointmentResult,
};
use crate::domain::models::appointment::Appointment;
use crate::domain::validation::{AppointmentValidator, ValidationResult};
use crate::storage::json::{AppointmentRepository, JsonConnection};
use crate::storage::traits::AppointmentStorage;

/// Service for managing the appointment book.
///
/// Orchestrates validation against the persisted collection and the
/// repository mutations, and hands back collections already in the
/// chronological order the caller should display them in.
#[derive(Clone)]
pub struct AppointmentService {
    repository: AppointmentRepository,
}

impl AppointmentService {
    /// Create a new AppointmentService.
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        let repository = AppointmentRepository::new(connection);
        Self { repository }
    }

    /// Create or update an appointment from form input.
    ///
    /// Validation failures are returned as a structured rejection, never as
    /// an error; an `Err` from this method means the store rejected the
    /// write and nothing was committed.
    pub fn save_appointment(&self, form: AppointmentForm) -> Result<SaveAppointmentResult> {
        info!(
            "Saving appointment for {} {} at {}",
            form.first_name, form.last_name, form.scheduled_at
        );

        let existing = self.repository.load_all();
        let ignore_id = (!form.appointment_id.is_empty()).then_some(form.appointment_id.as_str());

        if let ValidationResult::Invalid(field_errors) =
            AppointmentValidator::validate(&form, &existing, ignore_id)
        {
            warn!(
                "Appointment form rejected with {} field error(s)",
                field_errors.len()
            );
            return Ok(SaveAppointmentResult::Rejected { field_errors });
        }

        let appointment = Self::form_to_appointment(&form)?;
        let mut appointments = self.repository.upsert(appointment)?;
        Self::sort_chronologically(&mut appointments);

        Ok(SaveAppointmentResult::Saved { appointments })
    }

    /// List all appointments, earliest first.
    pub fn list_appointments(&self) -> Result<ListAppointmentsResult> {
        debug!("Listing appointments");

        let mut appointments = self.repository.load_all();
        Self::sort_chronologically(&mut appointments);

        debug!("Found {} appointments", appointments.len());
        Ok(ListAppointmentsResult { appointments })
    }

    /// Fetch a single appointment by id, for loading into an edit form.
    pub fn get_appointment(&self, command: GetAppointmentCommand) -> Result<GetAppointmentResult> {
        debug!("Getting appointment: {}", command.appointment_id);

        let appointment = self
            .repository
            .load_all()
            .into_iter()
            .find(|a| a.id == command.appointment_id);

        if appointment.is_none() {
            warn!("Appointment not found: {}", command.appointment_id);
        }

        Ok(GetAppointmentResult { appointment })
    }

    /// Delete an appointment. Deleting an id that no longer exists is a
    /// successful no-op.
    pub fn delete_appointment(
        &self,
        command: DeleteAppointmentCommand,
    ) -> Result<DeleteAppointmentResult> {
        info!("Deleting appointment: {}", command.appointment_id);

        let mut appointments = self.repository.remove(&command.appointment_id)?;
        Self::sort_chronologically(&mut appointments);

        Ok(DeleteAppointmentResult { appointments })
    }

    /// Build the domain record from a form the validator has accepted.
    fn form_to_appointment(form: &AppointmentForm) -> Result<Appointment> {
        let scheduled_at = Appointment::parse_scheduled_at(form.scheduled_at.trim())
            .ok_or_else(|| anyhow::anyhow!("Unparseable scheduled-at value: {}", form.scheduled_at))?;
        let date_of_birth = Appointment::parse_date_of_birth(form.date_of_birth.trim())
            .ok_or_else(|| {
                anyhow::anyhow!("Unparseable date-of-birth value: {}", form.date_of_birth)
            })?;

        Ok(Appointment {
            id: form.appointment_id.clone(),
            scheduled_at,
            notes: form.notes.clone(),
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
            national_id: form.national_id.trim().to_string(),
            phone: form.phone.trim().to_string(),
            date_of_birth,
        })
    }

    fn sort_chronologically(appointments: &mut [Appointment]) {
        appointments.sort_by_key(|a| a.scheduled_at);
    }
}
