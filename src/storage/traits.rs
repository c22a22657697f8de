//! # Storage Traits
//!
//! Defines the storage abstraction the domain layer works against, so the
//! backing store (JSON file, database, in-memory fake) can be swapped
//! without touching business logic.

use std::path::PathBuf;

use crate::domain::models::appointment::Appointment;

/// A failed interaction with the persistence medium.
///
/// Only writes produce errors: reads degrade to an empty collection inside
/// the repository. A write error means the attempted mutation was not
/// committed and the caller should surface it to the user.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to encode appointment data: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write appointment data to {}: {}", .path.display(), .source)]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Trait defining the interface for appointment storage operations.
///
/// The whole collection is the unit of persistence: every mutating
/// operation rewrites the stored collection and returns the updated state.
pub trait AppointmentStorage: Send + Sync {
    /// Read the persisted collection.
    ///
    /// Never fails: a missing, unreadable or corrupt store is logged and
    /// reported as an empty collection.
    fn load_all(&self) -> Vec<Appointment>;

    /// Persist the entire collection, replacing any prior contents.
    fn save_all(&self, appointments: &[Appointment]) -> Result<(), StorageError>;

    /// Insert a new appointment (minting a unique id when the candidate's
    /// id is empty) or replace the record with matching id.
    /// Returns the updated collection.
    fn upsert(&self, appointment: Appointment) -> Result<Vec<Appointment>, StorageError>;

    /// Delete the record with matching id; a no-op when absent.
    /// Returns the updated collection.
    fn remove(&self, appointment_id: &str) -> Result<Vec<Appointment>, StorageError>;
}
