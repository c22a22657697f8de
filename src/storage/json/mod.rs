//! JSON file storage backend.

pub mod appointment_repository;
pub mod connection;

pub use appointment_repository::AppointmentRepository;
pub use connection::JsonConnection;
