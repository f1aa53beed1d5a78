use super::{call, failure, with_footer, LoadState, Outcome};
use crate::booking::{BookingState, BookingWorkflow, MSG_BOOKING_FAILED};
use crate::navigation::{Nav, Route};
use crate::scope::ScreenScope;
use crate::session::SessionContext;
use crate::{ClinicError, ClinicResult};
use api_shared::{ClinicApi, DoctorId};
use chrono::NaiveDate;
use clinic_types::IsoDateText;
use std::fmt::Write as _;

pub const MSG_DOCTORS_LOAD_FAILED: &str = "Could not load the list of doctors.";

pub struct AddAppointmentScreen {
    booking: LoadState<BookingWorkflow>,
    scope: ScreenScope,
}

impl AddAppointmentScreen {
    pub fn new(scope: ScreenScope) -> Self {
        Self {
            booking: LoadState::Loading,
            scope,
        }
    }

    pub fn workflow(&self) -> Option<&BookingWorkflow> {
        self.booking.loaded()
    }

    /// Fetch the doctors offered in the picker.
    pub async fn load(&mut self, api: &dyn ClinicApi) -> Outcome {
        match call(&self.scope, api.list_doctors()).await {
            Ok(doctors) => {
                tracing::debug!("loaded {} doctors", doctors.len());
                self.booking = LoadState::Loaded(BookingWorkflow::new(doctors));
                Outcome::none()
            }
            Err(e) => {
                let outcome = failure(e, MSG_DOCTORS_LOAD_FAILED);
                if let Some(notice) = &outcome.notice {
                    self.booking = LoadState::Failed(notice.text().to_string());
                }
                outcome
            }
        }
    }

    pub fn select_doctor(&mut self, id: DoctorId) -> Outcome {
        match self.workflow_mut().and_then(|wf| wf.select_doctor(id).map(|_| ())) {
            Ok(()) => Outcome::none(),
            Err(e) => failure(e, MSG_DOCTORS_LOAD_FAILED),
        }
    }

    pub fn clear_doctor(&mut self) {
        if let LoadState::Loaded(wf) = &mut self.booking {
            wf.clear_doctor();
        }
    }

    /// Choose the date from `YYYY-MM-DD` text.
    pub fn choose_date(&mut self, input: &str, today: NaiveDate) -> Outcome {
        let result = IsoDateText::parse(input)
            .and_then(|d| d.to_naive_date())
            .map_err(|e| ClinicError::validation(e.to_string()))
            .and_then(|date| self.workflow_mut()?.choose_date(date, today));
        match result {
            Ok(()) => Outcome::none(),
            Err(e) => failure(e, MSG_BOOKING_FAILED),
        }
    }

    pub fn choose_slot(&mut self, label: &str) -> Outcome {
        match self.workflow_mut().and_then(|wf| wf.choose_slot(label)) {
            Ok(()) => Outcome::none(),
            Err(e) => failure(e, MSG_BOOKING_FAILED),
        }
    }

    /// Book the selected slot for the logged-in patient.
    pub async fn submit(&mut self, api: &dyn ClinicApi, session: &SessionContext) -> Outcome {
        let patient_id = match session.require() {
            Ok(id) => id,
            Err(e) => return failure(e, MSG_BOOKING_FAILED),
        };
        let req = match self.workflow_mut().and_then(|wf| wf.begin_submit(patient_id)) {
            Ok(req) => req,
            Err(e) => return failure(e, MSG_BOOKING_FAILED),
        };

        tracing::info!(
            "Booking appointment with doctor {} on {} at {}",
            req.doctor.id,
            req.date,
            req.time
        );
        let result = self.scope.run(api.book_appointment(&req)).await;

        let LoadState::Loaded(wf) = &mut self.booking else {
            return Outcome::none();
        };
        let Ok(response) = result else {
            wf.abort_submit();
            return Outcome::none();
        };

        let message = wf.finish_submit(response);
        match wf.state() {
            BookingState::Booked => {
                Outcome::success(message).then(Nav::Navigate(Route::Appointments))
            }
            _ => Outcome::error(message),
        }
    }

    fn workflow_mut(&mut self) -> ClinicResult<&mut BookingWorkflow> {
        match &mut self.booking {
            LoadState::Loaded(wf) => Ok(wf),
            _ => Err(ClinicError::validation(MSG_DOCTORS_LOAD_FAILED)),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Book an Appointment\n\n");
        let wf = match &self.booking {
            LoadState::Loading => return with_footer(out + "Loading doctors...\n"),
            LoadState::Failed(msg) => return with_footer(out + msg + "\n"),
            LoadState::Loaded(wf) => wf,
        };

        out.push_str("Doctors:\n");
        for doctor in wf.doctors() {
            let marker = match wf.selected_doctor() {
                Some(d) if d.id == doctor.id => '*',
                _ => ' ',
            };
            let _ = writeln!(out, "{marker} [{}] {}", doctor.id, doctor.label());
        }

        if wf.selected_doctor().is_some() {
            out.push_str("\nAvailable slots:\n");
            if wf.slots().is_empty() {
                out.push_str("  (none)\n");
            }
            for slot in wf.slots() {
                let marker = if wf.selected_slot() == Some(slot) { '*' } else { ' ' };
                let _ = writeln!(out, "{marker} {slot}");
            }
        }

        let date = wf
            .selected_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".into());
        let _ = writeln!(out, "\nDate: {date}");
        if wf.state() == BookingState::Submitting {
            out.push_str("Booking...\n");
        } else {
            out.push_str("[book] Book Appointment\n");
        }
        with_footer(out)
    }
}
