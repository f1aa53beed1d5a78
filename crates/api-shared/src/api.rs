//! The transport seam between screens and the backend.

use crate::error::ApiResult;
use crate::models::{
    Appointment, AppointmentId, AppointmentStatus, BookAppointmentReq, Doctor, Patient, PatientId,
    Prescription, RegisterPatientReq,
};
use async_trait::async_trait;

/// Operations the clinic backend offers to a patient.
///
/// Each call is a single request with no retry. A 2xx response yields the decoded body; any
/// other outcome yields an [`ApiError`](crate::ApiError).
#[async_trait]
pub trait ClinicApi: Send + Sync {
    async fn list_doctors(&self) -> ApiResult<Vec<Doctor>>;

    async fn register_patient(&self, req: &RegisterPatientReq) -> ApiResult<Patient>;

    async fn login(&self, email: &str, password: &str) -> ApiResult<Patient>;

    async fn get_patient(&self, id: PatientId) -> ApiResult<Patient>;

    async fn list_appointments(&self, patient_id: PatientId) -> ApiResult<Vec<Appointment>>;

    /// Succeeds only on 200 or 201.
    async fn book_appointment(&self, req: &BookAppointmentReq) -> ApiResult<()>;

    async fn update_appointment_status(
        &self,
        id: AppointmentId,
        status: AppointmentStatus,
    ) -> ApiResult<()>;

    async fn delete_appointment(&self, id: AppointmentId) -> ApiResult<()>;

    async fn list_prescriptions(&self, patient_id: PatientId) -> ApiResult<Vec<Prescription>>;
}
