//! In-crate [`ClinicApi`] double for screen and workflow tests.
//!
//! Answers every call with a canned result and records the request line it would have sent.

use api_shared::{
    paths, ApiResult, Appointment, AppointmentDoctor, AppointmentId, AppointmentStatus,
    BookAppointmentReq, ClinicApi, Doctor, Patient, PatientId, Prescription, RegisterPatientReq,
};
use async_trait::async_trait;
use std::sync::Mutex;

pub(crate) struct FakeApi {
    pub doctors: ApiResult<Vec<Doctor>>,
    pub login: ApiResult<Patient>,
    pub register: ApiResult<Patient>,
    pub patient: ApiResult<Patient>,
    pub appointments: ApiResult<Vec<Appointment>>,
    pub prescriptions: ApiResult<Vec<Prescription>>,
    pub book: ApiResult<()>,
    pub update: ApiResult<()>,
    pub delete: ApiResult<()>,
    calls: Mutex<Vec<String>>,
    bookings: Mutex<Vec<BookAppointmentReq>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            doctors: Ok(vec![doctor(3, &["Mon 09:00-17:00"])]),
            login: Ok(patient(7)),
            register: Ok(patient(8)),
            patient: Ok(patient(7)),
            appointments: Ok(Vec::new()),
            prescriptions: Ok(Vec::new()),
            book: Ok(()),
            update: Ok(()),
            delete: Ok(()),
            calls: Mutex::new(Vec::new()),
            bookings: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn bookings(&self) -> Vec<BookAppointmentReq> {
        self.bookings.lock().expect("bookings lock").clone()
    }

    fn record(&self, line: String) {
        self.calls.lock().expect("calls lock").push(line);
    }
}

pub(crate) fn patient(id: PatientId) -> Patient {
    Patient {
        id,
        first_name: Some("Ion".into()),
        last_name: Some("Popescu".into()),
        dob: Some("1990-04-23".into()),
        email: Some("ion@clinic.test".into()),
        health_id: Some(42),
        age: Some(34),
    }
}

pub(crate) fn doctor(id: i64, hours: &[&str]) -> Doctor {
    Doctor {
        id,
        first_name: "Ana".into(),
        last_name: "Pop".into(),
        specialization: "Cardiology".into(),
        available_hours: hours.iter().map(|h| h.to_string()).collect(),
    }
}

pub(crate) fn appointment(id: AppointmentId, status: AppointmentStatus) -> Appointment {
    Appointment {
        id,
        date: Some("2024-06-01".into()),
        time: Some("09:00".into()),
        status: Some(status),
        doctor: Some(AppointmentDoctor {
            first_name: Some("Ana".into()),
            last_name: Some("Pop".into()),
        }),
    }
}

#[async_trait]
impl ClinicApi for FakeApi {
    async fn list_doctors(&self) -> ApiResult<Vec<Doctor>> {
        self.record(format!("GET {}", paths::DOCTORS));
        self.doctors.clone()
    }

    async fn register_patient(&self, _req: &RegisterPatientReq) -> ApiResult<Patient> {
        self.record(format!("POST {}", paths::PATIENT_REGISTER));
        self.register.clone()
    }

    async fn login(&self, _email: &str, _password: &str) -> ApiResult<Patient> {
        self.record(format!("GET {}", paths::PATIENT_LOGIN));
        self.login.clone()
    }

    async fn get_patient(&self, id: PatientId) -> ApiResult<Patient> {
        self.record(format!("GET {}", paths::patient(id)));
        self.patient.clone()
    }

    async fn list_appointments(&self, patient_id: PatientId) -> ApiResult<Vec<Appointment>> {
        self.record(format!("GET {}", paths::appointments_for_patient(patient_id)));
        self.appointments.clone()
    }

    async fn book_appointment(&self, req: &BookAppointmentReq) -> ApiResult<()> {
        self.record(format!("POST {}", paths::APPOINTMENT));
        self.bookings.lock().expect("bookings lock").push(req.clone());
        self.book.clone()
    }

    async fn update_appointment_status(
        &self,
        id: AppointmentId,
        _status: AppointmentStatus,
    ) -> ApiResult<()> {
        self.record(format!("PUT {}", paths::appointment(id)));
        self.update.clone()
    }

    async fn delete_appointment(&self, id: AppointmentId) -> ApiResult<()> {
        self.record(format!("DELETE {}", paths::appointment(id)));
        self.delete.clone()
    }

    async fn list_prescriptions(&self, patient_id: PatientId) -> ApiResult<Vec<Prescription>> {
        self.record(format!("GET {}", paths::prescriptions_for_patient(patient_id)));
        self.prescriptions.clone()
    }
}
