//! Appointment book for a single-chair dental practice.
//!
//! The crate is the core of a local, single-user agenda: a rule engine for
//! booking validation (surgery hours, weekdays, half-hour slots,
//! double-booking), a JSON-file repository for the appointment collection,
//! and a service layer a presentation layer drives. No view code lives
//! here; a UI assembles an [`domain::commands::AppointmentForm`] at its
//! boundary, calls [`domain::AppointmentService`], and renders the
//! structured results it gets back.
//!
//! ```no_run
//! use std::sync::Arc;
//! use dental_agenda::domain::commands::AppointmentForm;
//! use dental_agenda::domain::AppointmentService;
//! use dental_agenda::storage::JsonConnection;
//!
//! # fn main() -> anyhow::Result<()> {
//! let connection = Arc::new(JsonConnection::new_default()?);
//! let service = AppointmentService::new(connection);
//!
//! let form = AppointmentForm {
//!     scheduled_at: "2030-06-03T10:00".to_string(),
//!     first_name: "Ana".to_string(),
//!     last_name: "García".to_string(),
//!     national_id: "12345678A".to_string(),
//!     phone: "123456789".to_string(),
//!     date_of_birth: "1990-01-15".to_string(),
//!     ..AppointmentForm::default()
//! };
//! let result = service.save_appointment(form)?;
//! # Ok(())
//! # }
//! ```

pub mod domain;
pub mod storage;

pub use domain::models::appointment::Appointment;
pub use domain::validation::{AppointmentValidator, FieldErrors, ValidationResult};
pub use domain::AppointmentService;
pub use storage::{AppointmentRepository, AppointmentStorage, JsonConnection, StorageError};
