//! # Storage Module
//!
//! Handles persistence of the appointment collection.
//!
//! The domain layer works against the [`traits::AppointmentStorage`]
//! abstraction; the shipped backend keeps the whole collection in a single
//! JSON store on disk, rewritten atomically on every mutation. The
//! implementation can be swapped without affecting the domain logic.

pub mod json;
pub mod traits;

pub use json::{AppointmentRepository, JsonConnection};
pub use traits::{AppointmentStorage, StorageError};
