// SPDX-FileCopyrightText: 2026 Tutoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by the client, the schedule engine and the CLI.
//!
//! Field names follow the backend's camelCase JSON.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

id_type!(
    /// Identifier of a tutoring session.
    TutoringSessionId
);
id_type!(
    /// Identifier of an availability window.
    WindowId
);
id_type!(
    /// Identifier of a tutor (a backend user).
    TutorId
);
id_type!(
    /// Identifier of a career/program.
    CareerId
);
id_type!(
    /// Identifier of a student (a backend user).
    StudentId
);
id_type!(
    /// Identifier of a reservation.
    ReservationId
);

/// Day of the week an availability window recurs on.
///
/// Parses English and the backend's Spanish day names, case-insensitively.
/// Always serializes as the English name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, Serialize,
    Deserialize,
)]
#[serde(try_from = "String", into = "String")]
#[strum(ascii_case_insensitive)]
pub enum Weekday {
    #[strum(to_string = "Monday", serialize = "Lunes")]
    Monday,
    #[strum(to_string = "Tuesday", serialize = "Martes")]
    Tuesday,
    #[strum(to_string = "Wednesday", serialize = "Miércoles", serialize = "Miercoles", serialize = "MIÉRCOLES")]
    Wednesday,
    #[strum(to_string = "Thursday", serialize = "Jueves")]
    Thursday,
    #[strum(to_string = "Friday", serialize = "Viernes")]
    Friday,
    #[strum(to_string = "Saturday", serialize = "Sábado", serialize = "Sabado", serialize = "SÁBADO")]
    Saturday,
    #[strum(to_string = "Sunday", serialize = "Domingo")]
    Sunday,
}

impl Weekday {
    /// Monday through Friday, in calendar order.
    pub const WORKDAYS: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    pub fn is_workday(self) -> bool {
        !matches!(self, Weekday::Saturday | Weekday::Sunday)
    }
}

impl TryFrom<String> for Weekday {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.trim().parse()
    }
}

impl From<Weekday> for String {
    fn from(day: Weekday) -> Self {
        day.to_string()
    }
}

/// How a tutoring reservation is attended.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Modality {
    #[default]
    #[serde(rename = "Presencial")]
    #[strum(to_string = "Presencial", serialize = "in-person", serialize = "in_person")]
    InPerson,
    #[serde(rename = "Virtual")]
    #[strum(to_string = "Virtual")]
    Virtual,
}

/// A recurring tutoring offering taught by one tutor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutoringSession {
    pub id: TutoringSessionId,
    pub tutor_id: TutorId,
    pub career_id: CareerId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub tutor_name: String,
    #[serde(default)]
    pub career_name: String,
    /// Backend state id (1 = active).
    #[serde(default)]
    pub lifecycle_state: i32,
}

/// A scheduled time block during which a tutoring session accepts reservations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityWindow {
    pub id: WindowId,
    pub tutoring_session_id: TutoringSessionId,
    pub weekday: Weekday,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(with = "crate::time::clock")]
    pub start_time: NaiveTime,
    #[serde(with = "crate::time::clock")]
    pub end_time: NaiveTime,
    pub capacity_max: u32,
    #[serde(default)]
    pub capacity_used: u32,
    #[serde(default)]
    pub state_id: i32,
}

impl AvailabilityWindow {
    /// Remaining places, always within `0..=capacity_max`.
    ///
    /// Derived from max and used; the backend's own `capacityAvailable`
    /// field is ignored.
    pub fn capacity_available(&self) -> u32 {
        self.capacity_max.saturating_sub(self.capacity_used)
    }

    /// `"available/max"`, e.g. `"4/6"`.
    pub fn capacity_label(&self) -> String {
        format!("{}/{}", self.capacity_available(), self.capacity_max)
    }
}

/// A reservation as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: ReservationId,
    pub availability_window_id: WindowId,
    pub student_id: StudentId,
    #[serde(default)]
    pub state_id: i32,
    #[serde(default)]
    pub state_name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(with = "crate::time::clock")]
    pub start_time: NaiveTime,
    #[serde(with = "crate::time::clock")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub cancelled_at: Option<String>,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
    #[serde(default)]
    pub session_name: Option<String>,
    #[serde(default)]
    pub tutor_name: Option<String>,
    #[serde(default)]
    pub modality: Option<Modality>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Body of `POST /reservations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReservation {
    pub availability_window_id: WindowId,
    pub student_id: StudentId,
    #[serde(with = "crate::time::clock")]
    pub start_time: NaiveTime,
    #[serde(with = "crate::time::clock")]
    pub end_time: NaiveTime,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub modality: Modality,
}

/// Body of `POST /reservations/{id}/cancel`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelReservation {
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_json() -> serde_json::Value {
        serde_json::json!({
            "id": 10,
            "tutoringSessionId": 1,
            "weekday": "Monday",
            "startTime": "08:00:00",
            "endTime": "09:00:00",
            "capacityMax": 6,
            "capacityUsed": 2,
            "capacityAvailable": 4,
            "stateId": 1
        })
    }

    #[test]
    fn window_deserializes_from_backend_json() {
        let w: AvailabilityWindow = serde_json::from_value(window_json()).unwrap();
        assert_eq!(w.id, WindowId(10));
        assert_eq!(w.weekday, Weekday::Monday);
        assert_eq!(w.capacity_available(), 4);
        assert_eq!(w.capacity_label(), "4/6");
        assert!(w.date.is_none());
    }

    #[test]
    fn capacity_never_negative() {
        let mut w: AvailabilityWindow = serde_json::from_value(window_json()).unwrap();
        w.capacity_used = 9;
        assert_eq!(w.capacity_available(), 0);
    }

    #[test]
    fn weekday_accepts_spanish_and_case() {
        assert_eq!("lunes".parse::<Weekday>().unwrap(), Weekday::Monday);
        assert_eq!("Miércoles".parse::<Weekday>().unwrap(), Weekday::Wednesday);
        assert_eq!("miercoles".parse::<Weekday>().unwrap(), Weekday::Wednesday);
        assert_eq!("FRIDAY".parse::<Weekday>().unwrap(), Weekday::Friday);
        assert!("someday".parse::<Weekday>().is_err());
    }

    #[test]
    fn weekday_serializes_english() {
        let json = serde_json::to_string(&Weekday::Thursday).unwrap();
        assert_eq!(json, "\"Thursday\"");
        let parsed: Weekday = serde_json::from_str("\"Jueves\"").unwrap();
        assert_eq!(parsed, Weekday::Thursday);
    }

    #[test]
    fn new_reservation_wire_format() {
        let req = NewReservation {
            availability_window_id: WindowId(10),
            student_id: StudentId(4),
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(8, 15, 0).unwrap(),
            notes: None,
            modality: Modality::InPerson,
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["availabilityWindowId"], 10);
        assert_eq!(v["startTime"], "08:00:00");
        assert_eq!(v["endTime"], "08:15:00");
        assert_eq!(v["modality"], "Presencial");
        assert!(v.get("notes").is_none());
    }

    proptest::proptest! {
        #[test]
        fn capacity_available_within_bounds(max in 0u32..1000, used in 0u32..2000) {
            let mut w: AvailabilityWindow = serde_json::from_value(window_json()).unwrap();
            w.capacity_max = max;
            w.capacity_used = used;
            proptest::prop_assert!(w.capacity_available() <= max);
            proptest::prop_assert_eq!(w.capacity_available() + used.min(max), max);
        }
    }

    #[test]
    fn modality_parses_cli_forms() {
        assert_eq!("virtual".parse::<Modality>().unwrap(), Modality::Virtual);
        assert_eq!("in-person".parse::<Modality>().unwrap(), Modality::InPerson);
        assert_eq!("Presencial".parse::<Modality>().unwrap(), Modality::InPerson);
    }
}
