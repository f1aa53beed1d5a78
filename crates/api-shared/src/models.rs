//! Wire types for the clinic backend.
//!
//! Field casing follows the server: patient payloads are snake_case, doctor and medicine
//! payloads are camelCase. Scalar fields the server sometimes omits are optional so a partial
//! record still decodes and renders with fallbacks.

use serde::{Deserialize, Serialize};

pub type PatientId = i64;
pub type DoctorId = i64;
pub type AppointmentId = i64;

/// A patient as returned by login, registration and the profile endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub health_id: Option<i64>,
    #[serde(default)]
    pub age: Option<u32>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        join_name(self.first_name.as_deref(), self.last_name.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: DoctorId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub specialization: String,
    /// Entries of the form `"<Day> <Start>-<End>"`, e.g. `"Mon 09-17"`.
    #[serde(default)]
    pub available_hours: Vec<String>,
}

impl Doctor {
    pub fn full_name(&self) -> String {
        join_name(Some(&self.first_name), Some(&self.last_name))
    }

    /// Picker label, e.g. `Dr. Ana Pop - Cardiology`.
    pub fn label(&self) -> String {
        format!("Dr. {} - {}", self.full_name(), self.specialization)
    }
}

/// Appointment status. `Completed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    #[serde(alias = "scheduled", alias = "Scheduled")]
    Scheduled,
    #[serde(alias = "completed", alias = "Completed")]
    Completed,
    #[serde(alias = "cancelled", alias = "Cancelled")]
    Cancelled,
}

impl AppointmentStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "SCHEDULED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The doctor reference embedded in an appointment (name only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDoctor {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub status: Option<AppointmentStatus>,
    #[serde(default)]
    pub doctor: Option<AppointmentDoctor>,
}

impl Appointment {
    /// Whether the cancel action may be offered for this appointment.
    pub fn can_cancel(&self) -> bool {
        !self.status.is_some_and(AppointmentStatus::is_terminal)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub dosage: String,
    /// Frequency, in doses per day.
    #[serde(default)]
    pub times_per_day: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prescription {
    pub id: i64,
    #[serde(default)]
    pub date: Option<String>,
    pub patient: Patient,
    pub doctor: Doctor,
    #[serde(default)]
    pub medicines: Vec<Medicine>,
}

/// Body of `POST /patient/register`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RegisterPatientReq {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub dob: String,
    pub health_id: i64,
}

impl std::fmt::Debug for RegisterPatientReq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterPatientReq")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("dob", &self.dob)
            .field("health_id", &self.health_id)
            .finish()
    }
}

/// A `{ "id": .. }` reference to another entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: i64,
}

/// Body of `POST /appointment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookAppointmentReq {
    pub date: String,
    pub time: String,
    pub status: AppointmentStatus,
    pub patient: EntityRef,
    pub doctor: EntityRef,
}

/// Body of `PUT /appointment/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateAppointmentStatusReq {
    pub id: AppointmentId,
    pub status: AppointmentStatus,
}

fn join_name(first: Option<&str>, last: Option<&str>) -> String {
    [first, last]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
