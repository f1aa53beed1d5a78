//! Appointment booking workflow.
//!
//! ```text
//! NoDoctor -> DoctorSelected -> DateChosen -> SlotChosen -> Submitting -> Booked
//!                                                                    \-> Failed -> Submitting ...
//! ```
//!
//! - Selecting a doctor recomputes the slots and clears the date and slot, whatever they were.
//! - Choosing a date leaves the slot alone; choosing a slot leaves the date alone.
//! - Submission needs a doctor, a date and a slot. Otherwise it is refused before any request
//!   is built.
//!
//! The workflow itself performs no I/O: [`BookingWorkflow::begin_submit`] hands back the
//! request to send and [`BookingWorkflow::finish_submit`] records how it went.

use crate::slots::{derive_slots, Slot};
use crate::{ClinicError, ClinicResult};
use api_shared::{
    ApiError, ApiResult, AppointmentStatus, BookAppointmentReq, Doctor, DoctorId, EntityRef,
    PatientId,
};
use chrono::NaiveDate;

pub const MSG_FILL_ALL_FIELDS: &str = "Please fill all fields before submitting.";
pub const MSG_NO_SLOTS: &str = "Selected doctor has no available slots.";
pub const MSG_PAST_DATE: &str = "Please choose today or a later date.";
pub const MSG_SELECT_DOCTOR_FIRST: &str = "Please select a doctor first.";
const MSG_SUBMITTING: &str = "A booking is already being submitted.";
pub const MSG_BOOKING_REJECTED: &str =
    "There was an error booking the appointment. Please try again.";
pub const MSG_BOOKING_FAILED: &str = "Could not book the appointment. Please try again.";

/// Where the workflow currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingState {
    NoDoctor,
    DoctorSelected,
    DateChosen,
    SlotChosen,
    Submitting,
    Booked,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Editing,
    Submitting,
    Booked,
    Failed(String),
}

/// Selections made on the add-appointment screen.
#[derive(Debug, Clone)]
pub struct BookingWorkflow {
    doctors: Vec<Doctor>,
    doctor: Option<Doctor>,
    slots: Vec<Slot>,
    date: Option<NaiveDate>,
    slot: Option<Slot>,
    phase: Phase,
}

impl BookingWorkflow {
    pub fn new(doctors: Vec<Doctor>) -> Self {
        Self {
            doctors,
            doctor: None,
            slots: Vec::new(),
            date: None,
            slot: None,
            phase: Phase::Editing,
        }
    }

    pub fn state(&self) -> BookingState {
        match &self.phase {
            Phase::Submitting => BookingState::Submitting,
            Phase::Booked => BookingState::Booked,
            Phase::Failed(msg) => BookingState::Failed(msg.clone()),
            Phase::Editing => match (&self.doctor, &self.date, &self.slot) {
                (None, _, _) => BookingState::NoDoctor,
                (Some(_), _, Some(_)) => BookingState::SlotChosen,
                (Some(_), Some(_), None) => BookingState::DateChosen,
                (Some(_), None, None) => BookingState::DoctorSelected,
            },
        }
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn selected_doctor(&self) -> Option<&Doctor> {
        self.doctor.as_ref()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn selected_slot(&self) -> Option<&Slot> {
        self.slot.as_ref()
    }

    /// Select a doctor by id, recomputing slots and clearing date and slot.
    pub fn select_doctor(&mut self, id: DoctorId) -> ClinicResult<&[Slot]> {
        if self.phase == Phase::Submitting {
            return Err(ClinicError::validation(MSG_SUBMITTING));
        }

        let doctor = self
            .doctors
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| ClinicError::validation(format!("Unknown doctor {id}.")))?;

        self.slots = derive_slots(&doctor.available_hours);
        self.doctor = Some(doctor);
        self.date = None;
        self.slot = None;
        self.phase = Phase::Editing;
        Ok(&self.slots)
    }

    /// Back to the empty "Select a Doctor" choice.
    pub fn clear_doctor(&mut self) {
        self.doctor = None;
        self.slots.clear();
        self.date = None;
        self.slot = None;
        self.phase = Phase::Editing;
    }

    /// Choose the appointment date. Dates before `today` are refused.
    pub fn choose_date(&mut self, date: NaiveDate, today: NaiveDate) -> ClinicResult<()> {
        self.ensure_editable()?;
        if self.doctor.is_none() {
            return Err(ClinicError::validation(MSG_SELECT_DOCTOR_FIRST));
        }
        if date < today {
            return Err(ClinicError::validation(MSG_PAST_DATE));
        }

        self.date = Some(date);
        self.reopen();
        Ok(())
    }

    /// Choose one of the derived slots by its label, replacing any previous choice.
    pub fn choose_slot(&mut self, label: &str) -> ClinicResult<()> {
        self.ensure_editable()?;
        if self.doctor.is_none() {
            return Err(ClinicError::validation(MSG_SELECT_DOCTOR_FIRST));
        }

        let wanted = Slot::parse(label);
        let slot = self
            .slots
            .iter()
            .find(|s| Some(*s) == wanted.as_ref())
            .cloned()
            .ok_or_else(|| ClinicError::validation(format!("Slot {label:?} is not available.")))?;

        self.slot = Some(slot);
        self.reopen();
        Ok(())
    }

    /// Validate the selections and build the request to send.
    ///
    /// On success the workflow is `Submitting` until [`finish_submit`](Self::finish_submit).
    pub fn begin_submit(&mut self, patient_id: PatientId) -> ClinicResult<BookAppointmentReq> {
        self.ensure_editable()?;

        if let Some(doctor) = &self.doctor {
            if self.slots.is_empty() {
                tracing::debug!("doctor {} has no available slots", doctor.id);
                return Err(ClinicError::validation(MSG_NO_SLOTS));
            }
        }

        let (Some(doctor), Some(date), Some(slot)) = (&self.doctor, self.date, &self.slot) else {
            return Err(ClinicError::validation(MSG_FILL_ALL_FIELDS));
        };

        let req = BookAppointmentReq {
            date: date.format("%Y-%m-%d").to_string(),
            time: slot.time().to_string(),
            status: AppointmentStatus::Scheduled,
            patient: EntityRef { id: patient_id },
            doctor: EntityRef { id: doctor.id },
        };

        self.phase = Phase::Submitting;
        Ok(req)
    }

    /// Record the booking response. Returns the message to show the user.
    pub fn finish_submit(&mut self, result: ApiResult<()>) -> String {
        match result {
            Ok(()) => {
                self.phase = Phase::Booked;
                let name = self
                    .doctor
                    .as_ref()
                    .map(Doctor::full_name)
                    .unwrap_or_default();
                format!("Appointment successfully booked with Dr. {name}!")
            }
            Err(e) => {
                tracing::error!("Error booking appointment: {}", e);
                let fallback = match &e {
                    ApiError::UnexpectedResponse(_) => MSG_BOOKING_REJECTED,
                    _ => MSG_BOOKING_FAILED,
                };
                let msg = e.user_message(fallback);
                self.phase = Phase::Failed(msg.clone());
                msg
            }
        }
    }

    /// Abandon an in-flight submission without an outcome, keeping the selections.
    pub fn abort_submit(&mut self) {
        if self.phase == Phase::Submitting {
            self.phase = Phase::Editing;
        }
    }

    fn ensure_editable(&self) -> ClinicResult<()> {
        match self.phase {
            Phase::Submitting => Err(ClinicError::validation(MSG_SUBMITTING)),
            Phase::Booked => Err(ClinicError::validation(
                "This appointment has already been booked.",
            )),
            Phase::Editing | Phase::Failed(_) => Ok(()),
        }
    }

    fn reopen(&mut self) {
        if matches!(self.phase, Phase::Failed(_)) {
            self.phase = Phase::Editing;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doctor(id: DoctorId, hours: &[&str]) -> Doctor {
        Doctor {
            id,
            first_name: "Ana".into(),
            last_name: format!("Doc{id}"),
            specialization: "GP".into(),
            available_hours: hours.iter().map(|h| h.to_string()).collect(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
    }

    fn june_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn workflow() -> BookingWorkflow {
        BookingWorkflow::new(vec![
            doctor(3, &["Mon 09:00-17:00"]),
            doctor(4, &["Tue 10-12"]),
            doctor(5, &[]),
        ])
    }

    #[test]
    fn starts_without_doctor() {
        let wf = workflow();
        assert_eq!(wf.state(), BookingState::NoDoctor);
        assert!(wf.slots().is_empty());
    }

    #[test]
    fn walks_through_states() {
        let mut wf = workflow();
        wf.select_doctor(3).unwrap();
        assert_eq!(wf.state(), BookingState::DoctorSelected);
        wf.choose_date(june_first(), today()).unwrap();
        assert_eq!(wf.state(), BookingState::DateChosen);
        wf.choose_slot("Mon 09:00").unwrap();
        assert_eq!(wf.state(), BookingState::SlotChosen);
        wf.begin_submit(7).unwrap();
        assert_eq!(wf.state(), BookingState::Submitting);
        wf.finish_submit(Ok(()));
        assert_eq!(wf.state(), BookingState::Booked);
    }

    #[test]
    fn selecting_a_doctor_always_resets_date_and_slot() {
        let mut wf = workflow();
        for (first, second) in [(3, 4), (3, 3), (4, 5)] {
            wf.select_doctor(first).unwrap();
            wf.choose_date(june_first(), today()).unwrap();
            if !wf.slots().is_empty() {
                let label = wf.slots()[0].label();
                wf.choose_slot(&label).unwrap();
            }

            wf.select_doctor(second).unwrap();
            assert_eq!(wf.selected_date(), None);
            assert_eq!(wf.selected_slot(), None);
            assert_eq!(wf.state(), BookingState::DoctorSelected);
        }
    }

    #[test]
    fn selecting_doctor_recomputes_slots() {
        let mut wf = workflow();
        let slots: Vec<String> = wf.select_doctor(4).unwrap().iter().map(Slot::label).collect();
        assert_eq!(slots, ["Tue 10", "Tue 12"]);
    }

    #[test]
    fn date_choice_keeps_slot() {
        let mut wf = workflow();
        wf.select_doctor(3).unwrap();
        wf.choose_slot("Mon 17:00").unwrap();
        wf.choose_date(june_first(), today()).unwrap();
        assert_eq!(wf.selected_slot().map(Slot::label).as_deref(), Some("Mon 17:00"));
    }

    #[test]
    fn slot_requires_doctor_and_known_label() {
        let mut wf = workflow();
        assert!(matches!(wf.choose_slot("Mon 09:00"), Err(ClinicError::Validation(_))));
        wf.select_doctor(3).unwrap();
        assert!(matches!(wf.choose_slot("Mon 10:00"), Err(ClinicError::Validation(_))));
        assert_eq!(wf.selected_slot(), None);
    }

    #[test]
    fn past_dates_are_refused() {
        let mut wf = workflow();
        wf.select_doctor(3).unwrap();
        let yesterday = today().pred_opt().unwrap();
        let err = wf.choose_date(yesterday, today()).unwrap_err();
        assert_eq!(err.to_string(), MSG_PAST_DATE);
        wf.choose_date(today(), today()).unwrap();
    }

    #[test]
    fn submit_requires_every_selection() {
        // (doctor, date, slot) combinations with at least one missing
        for mask in 0u8..7 {
            let mut wf = workflow();
            let with_doctor = mask & 1 != 0;
            let with_date = mask & 2 != 0;
            let with_slot = mask & 4 != 0;

            if with_doctor {
                wf.select_doctor(3).unwrap();
                if with_date {
                    wf.choose_date(june_first(), today()).unwrap();
                }
                if with_slot {
                    wf.choose_slot("Mon 09:00").unwrap();
                }
            }

            let err = wf.begin_submit(7).unwrap_err();
            assert_eq!(err.to_string(), MSG_FILL_ALL_FIELDS, "mask {mask}");
            assert_ne!(wf.state(), BookingState::Submitting);
        }
    }

    #[test]
    fn doctor_without_slots_blocks_submit() {
        let mut wf = workflow();
        wf.select_doctor(5).unwrap();
        wf.choose_date(june_first(), today()).unwrap();
        assert_eq!(wf.begin_submit(7).unwrap_err().to_string(), MSG_NO_SLOTS);
    }

    #[test]
    fn request_carries_iso_date_and_slot_time() {
        let mut wf = workflow();
        wf.select_doctor(3).unwrap();
        wf.choose_date(june_first(), today()).unwrap();
        wf.choose_slot("Mon 09:00").unwrap();

        let req = wf.begin_submit(7).unwrap();
        assert_eq!(req.doctor.id, 3);
        assert_eq!(req.patient.id, 7);
        assert_eq!(req.date, "2024-06-01");
        assert_eq!(req.time, "09:00");
        assert_eq!(req.status, AppointmentStatus::Scheduled);
    }

    #[test]
    fn failure_keeps_selections_and_allows_retry() {
        let mut wf = workflow();
        wf.select_doctor(3).unwrap();
        wf.choose_date(june_first(), today()).unwrap();
        wf.choose_slot("Mon 09:00").unwrap();
        wf.begin_submit(7).unwrap();

        let msg = wf.finish_submit(Err(ApiError::Transport("connection refused".into())));
        assert_eq!(msg, MSG_BOOKING_FAILED);
        assert_eq!(wf.state(), BookingState::Failed(MSG_BOOKING_FAILED.into()));
        assert!(wf.selected_slot().is_some());

        wf.begin_submit(7).expect("retry from Failed should be allowed");
        let msg = wf.finish_submit(Ok(()));
        assert_eq!(msg, "Appointment successfully booked with Dr. Ana Doc3!");
    }

    #[test]
    fn server_message_wins_over_generic_text() {
        let mut wf = workflow();
        wf.select_doctor(3).unwrap();
        wf.choose_date(june_first(), today()).unwrap();
        wf.choose_slot("Mon 09:00").unwrap();
        wf.begin_submit(7).unwrap();

        let msg = wf.finish_submit(Err(ApiError::Status {
            status: 409,
            message: Some("Slot already taken".into()),
        }));
        assert_eq!(msg, "Slot already taken");
    }

    #[test]
    fn booked_workflow_refuses_changes() {
        let mut wf = workflow();
        wf.select_doctor(3).unwrap();
        wf.choose_date(june_first(), today()).unwrap();
        wf.choose_slot("Mon 09:00").unwrap();
        wf.begin_submit(7).unwrap();
        wf.finish_submit(Ok(()));

        assert!(wf.begin_submit(7).is_err());
        assert!(wf.choose_slot("Mon 17:00").is_err());
    }

    #[test]
    fn abort_returns_to_editing() {
        let mut wf = workflow();
        wf.select_doctor(3).unwrap();
        wf.choose_date(june_first(), today()).unwrap();
        wf.choose_slot("Mon 09:00").unwrap();
        wf.begin_submit(7).unwrap();
        wf.abort_submit();
        assert_eq!(wf.state(), BookingState::SlotChosen);
    }
}
