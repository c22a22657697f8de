//! Domain model for a dental appointment.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Number of characters of `notes` shown in table views before truncation.
pub const NOTES_PREVIEW_CHARS: usize = 30;

/// A scheduled patient visit.
///
/// `id` is minted by the storage layer when the appointment is first saved;
/// an empty `id` marks a record that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub scheduled_at: NaiveDateTime,
    pub notes: String,
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
}

impl Appointment {
    /// Generate a unique ID for an appointment.
    pub fn generate_id(timestamp_millis: u64) -> String {
        format!("cita::{}", timestamp_millis)
    }

    /// Parse a scheduled-at string as entered in a date-time form field.
    ///
    /// Accepts `YYYY-MM-DDTHH:MM` with optional seconds.
    pub fn parse_scheduled_at(raw: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
            .ok()
    }

    /// Parse a date-of-birth string (`YYYY-MM-DD`).
    pub fn parse_date_of_birth(raw: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }

    /// Full patient name for display.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Notes truncated for table display. The stored value is never cut.
    pub fn notes_preview(&self) -> String {
        if self.notes.chars().count() <= NOTES_PREVIEW_CHARS {
            return self.notes.clone();
        }
        let cut: String = self.notes.chars().take(NOTES_PREVIEW_CHARS).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id() {
        assert_eq!(Appointment::generate_id(1748800000000), "cita::1748800000000");
    }

    #[test]
    fn test_parse_scheduled_at() {
        let parsed = Appointment::parse_scheduled_at("2025-06-02T10:30").unwrap();
        assert_eq!(parsed.format("%Y-%m-%d %H:%M").to_string(), "2025-06-02 10:30");

        let with_seconds = Appointment::parse_scheduled_at("2025-06-02T10:30:00").unwrap();
        assert_eq!(parsed, with_seconds);

        assert!(Appointment::parse_scheduled_at("").is_none());
        assert!(Appointment::parse_scheduled_at("not-a-date").is_none());
        assert!(Appointment::parse_scheduled_at("2025-06-02").is_none());
    }

    #[test]
    fn test_notes_preview_truncates_long_notes() {
        let mut appointment = sample();
        appointment.notes = "a".repeat(40);
        assert_eq!(appointment.notes_preview(), format!("{}...", "a".repeat(30)));
        // Stored value stays intact
        assert_eq!(appointment.notes.len(), 40);
    }

    #[test]
    fn test_notes_preview_keeps_short_notes() {
        let mut appointment = sample();
        appointment.notes = "routine cleaning".to_string();
        assert_eq!(appointment.notes_preview(), "routine cleaning");
    }

    fn sample() -> Appointment {
        Appointment {
            id: "cita::1".to_string(),
            scheduled_at: Appointment::parse_scheduled_at("2025-06-02T10:00").unwrap(),
            notes: String::new(),
            first_name: "Ana".to_string(),
            last_name: "García".to_string(),
            national_id: "12345678A".to_string(),
            phone: "123456789".to_string(),
            date_of_birth: Appointment::parse_date_of_birth("1990-01-15").unwrap(),
        }
    }
}
