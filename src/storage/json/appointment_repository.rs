use chrono::Utc;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::sync::Arc;

use super::connection::JsonConnection;
use crate::domain::models::appointment::Appointment;
use crate::storage::traits::{AppointmentStorage, StorageError};

/// On-disk record layout.
///
/// The store keeps the legacy wire keys and string-encoded dates, so data
/// written by earlier versions of the agenda stays readable. Mapping to the
/// typed domain model happens on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredAppointment {
    cita_id: String,
    fecha_cita: String,
    #[serde(default)]
    observaciones: String,
    nombre: String,
    apellidos: String,
    dni: String,
    telefono: String,
    fecha_nacimiento: String,
}

impl StoredAppointment {
    fn from_domain(appointment: &Appointment) -> Self {
        Self {
            cita_id: appointment.id.clone(),
            fecha_cita: appointment.scheduled_at.format("%Y-%m-%dT%H:%M").to_string(),
            observaciones: appointment.notes.clone(),
            nombre: appointment.first_name.clone(),
            apellidos: appointment.last_name.clone(),
            dni: appointment.national_id.clone(),
            telefono: appointment.phone.clone(),
            fecha_nacimiento: appointment.date_of_birth.format("%Y-%m-%d").to_string(),
        }
    }

    /// Map to the domain model; `None` when a date field is unreadable.
    fn into_domain(self) -> Option<Appointment> {
        let scheduled_at = Appointment::parse_scheduled_at(&self.fecha_cita)?;
        let date_of_birth = Appointment::parse_date_of_birth(&self.fecha_nacimiento)?;
        Some(Appointment {
            id: self.cita_id,
            scheduled_at,
            notes: self.observaciones,
            first_name: self.nombre,
            last_name: self.apellidos,
            national_id: self.dni,
            phone: self.telefono,
            date_of_birth,
        })
    }
}

/// JSON-file-backed appointment repository.
#[derive(Clone)]
pub struct AppointmentRepository {
    connection: Arc<JsonConnection>,
}

impl AppointmentRepository {
    /// Create a new JSON appointment repository.
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self { connection }
    }

    /// Write the full collection, replacing the store atomically.
    fn write_store(&self, appointments: &[Appointment]) -> Result<(), StorageError> {
        let stored: Vec<StoredAppointment> = appointments
            .iter()
            .map(StoredAppointment::from_domain)
            .collect();
        let json = serde_json::to_string_pretty(&stored)?;

        // Atomic write using temp file
        let path = self.connection.store_path();
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, json).map_err(|source| StorageError::Write {
            path: temp_path.clone(),
            source,
        })?;
        fs::rename(&temp_path, &path).map_err(|source| StorageError::Write { path, source })?;

        Ok(())
    }

    /// Mint an id not present in the collection. Same-millisecond inserts
    /// bump the timestamp until the id is free.
    fn mint_id(existing: &[Appointment]) -> String {
        let mut timestamp_millis = Utc::now().timestamp_millis() as u64;
        let mut id = Appointment::generate_id(timestamp_millis);
        while existing.iter().any(|a| a.id == id) {
            timestamp_millis += 1;
            id = Appointment::generate_id(timestamp_millis);
        }
        id
    }
}

impl AppointmentStorage for AppointmentRepository {
    fn load_all(&self) -> Vec<Appointment> {
        let path = self.connection.store_path();
        if !path.exists() {
            debug!("Appointment store doesn't exist yet, returning empty collection");
            return Vec::new();
        }

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to read appointment store {}: {}", path.display(), e);
                return Vec::new();
            }
        };

        let stored: Vec<StoredAppointment> = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(
                    "Appointment store {} is corrupt, starting from an empty collection: {}",
                    path.display(),
                    e
                );
                return Vec::new();
            }
        };

        stored
            .into_iter()
            .filter_map(|record| {
                let id = record.cita_id.clone();
                let appointment = record.into_domain();
                if appointment.is_none() {
                    warn!("Skipping appointment {} with unreadable date fields", id);
                }
                appointment
            })
            .collect()
    }

    fn save_all(&self, appointments: &[Appointment]) -> Result<(), StorageError> {
        self.write_store(appointments)
    }

    fn upsert(&self, mut appointment: Appointment) -> Result<Vec<Appointment>, StorageError> {
        let mut appointments = self.load_all();

        if appointment.id.is_empty() {
            appointment.id = Self::mint_id(&appointments);
            info!("Created appointment {}", appointment.id);
            appointments.push(appointment);
        } else {
            match appointments.iter().position(|a| a.id == appointment.id) {
                Some(index) => {
                    info!("Updated appointment {}", appointment.id);
                    appointments[index] = appointment;
                }
                None => {
                    warn!(
                        "Attempted to update a non-existent appointment: {}",
                        appointment.id
                    );
                }
            }
        }

        self.write_store(&appointments)?;
        Ok(appointments)
    }

    fn remove(&self, appointment_id: &str) -> Result<Vec<Appointment>, StorageError> {
        let mut appointments = self.load_all();
        let before = appointments.len();
        appointments.retain(|a| a.id != appointment_id);

        if appointments.len() == before {
            warn!(
                "Attempted to delete a non-existent appointment: {}",
                appointment_id
            );
        } else {
            info!("Deleted appointment {}", appointment_id);
        }

        self.write_store(&appointments)?;
        Ok(appointments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_repo() -> (AppointmentRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        let repo = AppointmentRepository::new(Arc::new(connection));
        (repo, temp_dir)
    }

    fn sample(id: &str, scheduled_at: &str) -> Appointment {
        Appointment {
            id: id.to_string(),
            scheduled_at: Appointment::parse_scheduled_at(scheduled_at).unwrap(),
            notes: "Follow-up".to_string(),
            first_name: "Ana".to_string(),
            last_name: "García".to_string(),
            national_id: "12345678A".to_string(),
            phone: "123456789".to_string(),
            date_of_birth: Appointment::parse_date_of_birth("1990-01-15").unwrap(),
        }
    }

    #[test]
    fn test_load_all_returns_empty_when_store_missing() {
        let (repo, _temp_dir) = setup_test_repo();
        assert!(repo.load_all().is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let (repo, _temp_dir) = setup_test_repo();
        let appointments = vec![
            sample("cita::1", "2025-06-02T10:00"),
            sample("cita::2", "2025-06-02T10:30"),
        ];

        repo.save_all(&appointments).expect("Failed to save appointments");
        assert_eq!(repo.load_all(), appointments);
    }

    #[test]
    fn test_load_all_is_idempotent() {
        let (repo, _temp_dir) = setup_test_repo();
        repo.save_all(&[sample("cita::1", "2025-06-02T10:00")]).unwrap();

        assert_eq!(repo.load_all(), repo.load_all());
    }

    #[test]
    fn test_corrupt_store_degrades_to_empty() {
        let (repo, temp_dir) = setup_test_repo();
        fs::write(temp_dir.path().join("citas.json"), "{not json!").unwrap();

        assert!(repo.load_all().is_empty());
    }

    #[test]
    fn test_record_with_unreadable_date_is_skipped() {
        let (repo, temp_dir) = setup_test_repo();
        let raw = r#"[
            {"citaId":"cita::1","fechaCita":"garbage","observaciones":"",
             "nombre":"Ana","apellidos":"García","dni":"12345678A",
             "telefono":"123456789","fechaNacimiento":"1990-01-15"},
            {"citaId":"cita::2","fechaCita":"2025-06-02T10:30","observaciones":"",
             "nombre":"Luis","apellidos":"Pérez","dni":"87654321B",
             "telefono":"987654321","fechaNacimiento":"1985-03-20"}
        ]"#;
        fs::write(temp_dir.path().join("citas.json"), raw).unwrap();

        let appointments = repo.load_all();
        assert_eq!(appointments.len(), 1);
        assert_eq!(appointments[0].id, "cita::2");
    }

    #[test]
    fn test_upsert_mints_unique_ids() {
        let (repo, _temp_dir) = setup_test_repo();

        let first = repo.upsert(sample("", "2025-06-02T10:00")).unwrap();
        let second = repo.upsert(sample("", "2025-06-02T10:30")).unwrap();

        assert_eq!(second.len(), 2);
        assert!(second.iter().all(|a| a.id.starts_with("cita::")));
        assert_ne!(second[0].id, second[1].id);
        assert_eq!(first[0].id, second[0].id);
    }

    #[test]
    fn test_upsert_replaces_matching_id() {
        let (repo, _temp_dir) = setup_test_repo();
        repo.upsert(sample("", "2025-06-02T10:00")).unwrap();
        let id = repo.load_all()[0].id.clone();

        let mut edited = sample(&id, "2025-06-02T11:00");
        edited.first_name = "Carmen".to_string();
        let appointments = repo.upsert(edited).unwrap();

        assert_eq!(appointments.len(), 1);
        assert_eq!(appointments[0].id, id);
        assert_eq!(appointments[0].first_name, "Carmen");
    }

    #[test]
    fn test_upsert_with_unknown_id_leaves_collection_unchanged() {
        let (repo, _temp_dir) = setup_test_repo();
        repo.save_all(&[sample("cita::1", "2025-06-02T10:00")]).unwrap();

        let appointments = repo.upsert(sample("cita::999", "2025-06-02T11:00")).unwrap();

        assert_eq!(appointments.len(), 1);
        assert_eq!(appointments[0].id, "cita::1");
    }

    #[test]
    fn test_remove_deletes_matching_record() {
        let (repo, _temp_dir) = setup_test_repo();
        repo.save_all(&[
            sample("cita::1", "2025-06-02T10:00"),
            sample("cita::2", "2025-06-02T10:30"),
        ])
        .unwrap();

        let appointments = repo.remove("cita::1").unwrap();

        assert_eq!(appointments.len(), 1);
        assert_eq!(appointments[0].id, "cita::2");
        assert_eq!(repo.load_all().len(), 1);
    }

    #[test]
    fn test_remove_of_absent_id_is_a_no_op() {
        let (repo, _temp_dir) = setup_test_repo();
        repo.save_all(&[sample("cita::1", "2025-06-02T10:00")]).unwrap();

        let appointments = repo.remove("cita::999").unwrap();

        assert_eq!(appointments.len(), 1);
        assert_eq!(appointments[0].id, "cita::1");
    }

    #[test]
    fn test_store_uses_legacy_wire_keys() {
        let (repo, temp_dir) = setup_test_repo();
        repo.save_all(&[sample("cita::1", "2025-06-02T10:00")]).unwrap();

        let raw = fs::read_to_string(temp_dir.path().join("citas.json")).unwrap();
        for key in [
            "citaId",
            "fechaCita",
            "observaciones",
            "nombre",
            "apellidos",
            "dni",
            "telefono",
            "fechaNacimiento",
        ] {
            assert!(raw.contains(key), "store is missing wire key {}", key);
        }
        assert!(raw.contains("2025-06-02T10:00"));
    }
}
