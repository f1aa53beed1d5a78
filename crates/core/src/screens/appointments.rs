use super::{call, failure, or_na, with_footer, LoadState, Outcome};
use crate::appointments::{apply_cancel, apply_delete};
use crate::navigation::{Nav, Route};
use crate::scope::ScreenScope;
use crate::session::SessionContext;
use api_shared::{Appointment, AppointmentId, AppointmentStatus, ClinicApi};
use std::fmt::Write as _;

pub const MSG_APPOINTMENTS_LOAD_FAILED: &str = "Could not load your appointments.";
pub const MSG_DELETE_FAILED: &str = "An error occurred while deleting the appointment.";
pub const MSG_CANCEL_FAILED: &str = "An error occurred while cancelling the appointment.";
pub const MSG_CANNOT_CANCEL: &str = "This appointment can no longer be cancelled.";

pub struct AppointmentsScreen {
    appointments: LoadState<Vec<Appointment>>,
    scope: ScreenScope,
}

impl AppointmentsScreen {
    pub fn new(scope: ScreenScope) -> Self {
        Self {
            appointments: LoadState::Loading,
            scope,
        }
    }

    pub fn appointments(&self) -> &LoadState<Vec<Appointment>> {
        &self.appointments
    }

    pub async fn load(&mut self, api: &dyn ClinicApi, session: &SessionContext) -> Outcome {
        let id = match session.require() {
            Ok(id) => id,
            Err(e) => return failure(e, MSG_APPOINTMENTS_LOAD_FAILED),
        };

        match call(&self.scope, api.list_appointments(id)).await {
            Ok(list) => {
                tracing::debug!("loaded {} appointments", list.len());
                self.appointments = LoadState::Loaded(list);
                Outcome::none()
            }
            Err(e) => {
                let outcome = failure(e, MSG_APPOINTMENTS_LOAD_FAILED);
                if let Some(notice) = &outcome.notice {
                    self.appointments = LoadState::Failed(notice.text().to_string());
                }
                outcome
            }
        }
    }

    /// Mark appointment `id` as cancelled on the server, then locally.
    ///
    /// Only appointments in the loaded list that are still cancellable are sent.
    pub async fn cancel(&mut self, api: &dyn ClinicApi, id: AppointmentId) -> Outcome {
        let Some(appointment) = self.find(id) else {
            return Outcome::error(not_found(id));
        };
        if !appointment.can_cancel() {
            return Outcome::error(MSG_CANNOT_CANCEL);
        }

        let request = api.update_appointment_status(id, AppointmentStatus::Cancelled);
        match call(&self.scope, request).await {
            Ok(()) => {
                self.update_list(|list| apply_cancel(list, id));
                Outcome::success(format!("The appointment {id} has been cancelled."))
            }
            Err(e) => failure(e, MSG_CANCEL_FAILED),
        }
    }

    /// Delete appointment `id`, which must be in the loaded list.
    pub async fn delete(&mut self, api: &dyn ClinicApi, id: AppointmentId) -> Outcome {
        if self.find(id).is_none() {
            return Outcome::error(not_found(id));
        }

        match call(&self.scope, api.delete_appointment(id)).await {
            Ok(()) => {
                self.update_list(|list| apply_delete(list, id));
                Outcome::success(format!("The appointment {id} has been deleted."))
            }
            Err(e) => failure(e, MSG_DELETE_FAILED),
        }
    }

    fn find(&self, id: AppointmentId) -> Option<&Appointment> {
        self.appointments.loaded()?.iter().find(|a| a.id == id)
    }

    pub fn add(&self) -> Outcome {
        Outcome::redirect(Nav::Navigate(Route::AddAppointment))
    }

    fn update_list(&mut self, f: impl FnOnce(Vec<Appointment>) -> Vec<Appointment>) {
        if let LoadState::Loaded(list) = &mut self.appointments {
            *list = f(std::mem::take(list));
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Your Appointments\n\n");
        match &self.appointments {
            LoadState::Loading => out.push_str("Loading...\n"),
            LoadState::Loaded(list) if !list.is_empty() => {
                for a in list {
                    render_card(&mut out, a);
                }
            }
            _ => out.push_str("No appointments available\n"),
        }
        out.push_str("\n[add] Add Appointment\n");
        with_footer(out)
    }
}

fn not_found(id: AppointmentId) -> String {
    format!("Appointment {id} is not in your list.")
}

fn render_card(out: &mut String, a: &Appointment) {
    let status = a.status.map(AppointmentStatus::as_str);
    let doctor = a
        .doctor
        .as_ref()
        .map(|d| {
            format!(
                "Dr. {} {}",
                d.first_name.as_deref().unwrap_or("Unknown"),
                d.last_name.as_deref().unwrap_or("")
            )
            .trim_end()
            .to_string()
        })
        .unwrap_or_else(|| "Unknown".to_string());

    let _ = writeln!(out, "Appointment ID: {}", a.id);
    let _ = writeln!(out, "Date: {}", or_na(a.date.as_deref()));
    let _ = writeln!(out, "Time: {}", or_na(a.time.as_deref()));
    let _ = writeln!(out, "Status: {}", or_na(status));
    let _ = writeln!(out, "Doctor: {doctor}");
    let _ = write!(out, "[delete {}] Delete", a.id);
    if a.can_cancel() {
        let _ = write!(out, "  [cancel {}] Cancel", a.id);
    }
    out.push_str("\n\n");
}
