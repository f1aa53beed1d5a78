//! Appointment list transitions.
//!
//! The appointments screen holds a local copy of the patient's list. After the server accepts a
//! cancel or delete, the copy is updated with these pure functions; on failure it is left as is.

use api_shared::{Appointment, AppointmentId, AppointmentStatus};

/// The list after appointment `id` was cancelled.
///
/// Only the status of the matching entry changes. An unknown id leaves the list untouched.
pub fn apply_cancel(mut list: Vec<Appointment>, id: AppointmentId) -> Vec<Appointment> {
    if let Some(appointment) = list.iter_mut().find(|a| a.id == id) {
        appointment.status = Some(AppointmentStatus::Cancelled);
    }
    list
}

/// The list after appointment `id` was deleted. Order of the rest is preserved.
pub fn apply_delete(mut list: Vec<Appointment>, id: AppointmentId) -> Vec<Appointment> {
    list.retain(|a| a.id != id);
    list
}
