//! Request paths, relative to the versioned API base (`.../api/v1`).

use crate::models::{AppointmentId, PatientId};

pub const DOCTORS: &str = "/doctors";
pub const PATIENT_REGISTER: &str = "/patient/register";
pub const PATIENT_LOGIN: &str = "/patient/login";
pub const APPOINTMENT: &str = "/appointment";

pub fn patient(id: PatientId) -> String {
    format!("/patient/{id}")
}

pub fn appointments_for_patient(id: PatientId) -> String {
    format!("/appointment/patient/{id}")
}

pub fn appointment(id: AppointmentId) -> String {
    format!("{APPOINTMENT}/{id}")
}

pub fn prescriptions_for_patient(id: PatientId) -> String {
    format!("/prescription/patient/{id}")
}
