//! # Domain Module
//!
//! Business logic for the appointment book: the appointment model, the
//! booking rule engine, and the service that ties validation to storage.
//! Operates independently of any UI framework or storage backend.
//!
//! ## Business Rules
//!
//! - Appointments must be booked strictly in the future
//! - Surgery is open Monday to Friday, 08:00 to 18:30
//! - Slots start on the hour or half hour
//! - A slot can only be booked once
//! - Patient contact details must be well-formed before booking

pub mod appointment_service;
pub mod commands;
pub mod models;
pub mod validation;

pub use appointment_service::AppointmentService;
