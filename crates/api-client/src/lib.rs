//! # API Client
//!
//! [`HttpApiClient`] implements [`ClinicApi`] over HTTP with `reqwest`.
//!
//! Every call is one request to `<base_url><path>`. Non-2xx statuses are turned into
//! [`ApiError::Status`] carrying the server's message when the body has one. There is no retry,
//! no backoff and no timeout beyond the `reqwest` defaults.

use api_shared::{
    extract_server_message, paths, ApiError, ApiResult, Appointment, AppointmentId,
    AppointmentStatus, BookAppointmentReq, ClinicApi, Doctor, Patient, PatientId, Prescription,
    RegisterPatientReq, UpdateAppointmentStatusReq,
};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

/// HTTP transport for the clinic backend.
#[derive(Clone, Debug)]
pub struct HttpApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpApiClient {
    /// Creates a client rooted at `base_url`, e.g. `http://192.168.1.130:8080/api/v1`.
    ///
    /// A trailing `/` is dropped so paths can always start with one.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    /// Sends the request and maps transport failures and non-2xx statuses to errors.
    async fn send(&self, method: &Method, path: &str, req: RequestBuilder) -> ApiResult<Response> {
        tracing::debug!("{} {}", method, path);

        let resp = req.send().await.map_err(|e| {
            tracing::error!("{} {} failed: {}", method, path, e);
            ApiError::Transport(e.to_string())
        })?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        tracing::error!("{} {} returned {}: {}", method, path, status, body);
        Err(ApiError::Status {
            status: status.as_u16(),
            message: extract_server_message(&body),
        })
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> ApiResult<T> {
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Decodes a list body, rejecting anything that is not a JSON array.
    async fn decode_list<T: DeserializeOwned>(path: &str, resp: Response) -> ApiResult<Vec<T>> {
        let value: serde_json::Value = Self::decode(resp).await?;
        if !value.is_array() {
            tracing::warn!("unexpected non-array response from {}: {}", path, value);
            return Err(ApiError::UnexpectedResponse(format!(
                "expected a list from {path}"
            )));
        }
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> ApiResult<Vec<T>> {
        let resp = self
            .send(&Method::GET, path, self.request(Method::GET, path))
            .await?;
        Self::decode_list(path, resp).await
    }

    async fn get_one<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let resp = self
            .send(&Method::GET, path, self.request(Method::GET, path))
            .await?;
        Self::decode(resp).await
    }
}

#[async_trait]
impl ClinicApi for HttpApiClient {
    async fn list_doctors(&self) -> ApiResult<Vec<Doctor>> {
        self.get_list(paths::DOCTORS).await
    }

    async fn register_patient(&self, req: &RegisterPatientReq) -> ApiResult<Patient> {
        let path = paths::PATIENT_REGISTER;
        let resp = self
            .send(&Method::POST, path, self.request(Method::POST, path).json(req))
            .await?;
        Self::decode(resp).await
    }

    async fn login(&self, email: &str, password: &str) -> ApiResult<Patient> {
        let path = paths::PATIENT_LOGIN;
        let req = self
            .request(Method::GET, path)
            .query(&[("email", email), ("password", password)]);
        let resp = self.send(&Method::GET, path, req).await?;
        Self::decode(resp).await
    }

    async fn get_patient(&self, id: PatientId) -> ApiResult<Patient> {
        self.get_one(&paths::patient(id)).await
    }

    async fn list_appointments(&self, patient_id: PatientId) -> ApiResult<Vec<Appointment>> {
        self.get_list(&paths::appointments_for_patient(patient_id))
            .await
    }

    async fn book_appointment(&self, req: &BookAppointmentReq) -> ApiResult<()> {
        let path = paths::APPOINTMENT;
        let resp = self
            .send(&Method::POST, path, self.request(Method::POST, path).json(req))
            .await?;

        match resp.status() {
            StatusCode::OK | StatusCode::CREATED => Ok(()),
            other => Err(ApiError::UnexpectedResponse(format!(
                "booking answered with status {}",
                other.as_u16()
            ))),
        }
    }

    async fn update_appointment_status(
        &self,
        id: AppointmentId,
        status: AppointmentStatus,
    ) -> ApiResult<()> {
        let path = paths::appointment(id);
        let body = UpdateAppointmentStatusReq { id, status };
        self.send(&Method::PUT, &path, self.request(Method::PUT, &path).json(&body))
            .await?;
        Ok(())
    }

    async fn delete_appointment(&self, id: AppointmentId) -> ApiResult<()> {
        let path = paths::appointment(id);
        self.send(&Method::DELETE, &path, self.request(Method::DELETE, &path))
            .await?;
        Ok(())
    }

    async fn list_prescriptions(&self, patient_id: PatientId) -> ApiResult<Vec<Prescription>> {
        self.get_list(&paths::prescriptions_for_patient(patient_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_shared::EntityRef;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> HttpApiClient {
        HttpApiClient::new(format!("{}/api/v1/", server.uri()))
    }

    #[tokio::test]
    async fn list_doctors_decodes_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/doctors"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 3, "firstName": "Ana", "lastName": "Pop", "specialization": "GP", "availableHours": ["Mon 09-17"]}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let doctors = client_for(&server).await.list_doctors().await.unwrap();
        assert_eq!(doctors.len(), 1);
        assert_eq!(doctors[0].id, 3);
    }

    #[tokio::test]
    async fn login_sends_credentials_as_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/patient/login"))
            .and(query_param("email", "ion@clinic.test"))
            .and(query_param("password", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7, "first_name": "Ion"})))
            .expect(1)
            .mount(&server)
            .await;

        let patient = client_for(&server)
            .await
            .login("ion@clinic.test", "secret")
            .await
            .unwrap();
        assert_eq!(patient.id, 7);
    }

    #[tokio::test]
    async fn error_status_carries_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/patient/register"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "Email already registered"})))
            .mount(&server)
            .await;

        let req = RegisterPatientReq {
            first_name: "Ion".into(),
            last_name: "Pop".into(),
            email: "ion@clinic.test".into(),
            password: "secret".into(),
            dob: "1990-01-01".into(),
            health_id: 42,
        };
        let err = client_for(&server)
            .await
            .register_patient(&req)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 400,
                message: Some("Email already registered".into())
            }
        );
    }

    #[tokio::test]
    async fn non_array_list_is_unexpected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/appointment/patient/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .list_appointments(7)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedResponse(_)));
    }

    #[tokio::test]
    async fn booking_posts_nested_body_and_accepts_created() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/appointment"))
            .and(body_json(json!({
                "date": "2024-06-01",
                "time": "09:00",
                "status": "SCHEDULED",
                "patient": {"id": 7},
                "doctor": {"id": 3}
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let req = BookAppointmentReq {
            date: "2024-06-01".into(),
            time: "09:00".into(),
            status: AppointmentStatus::Scheduled,
            patient: EntityRef { id: 7 },
            doctor: EntityRef { id: 3 },
        };
        client_for(&server).await.book_appointment(&req).await.unwrap();
    }

    #[tokio::test]
    async fn booking_rejects_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/appointment"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let req = BookAppointmentReq {
            date: "2024-06-01".into(),
            time: "09:00".into(),
            status: AppointmentStatus::Scheduled,
            patient: EntityRef { id: 7 },
            doctor: EntityRef { id: 3 },
        };
        let err = client_for(&server)
            .await
            .book_appointment(&req)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedResponse(_)));
    }

    #[tokio::test]
    async fn cancel_puts_status_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/appointment/12"))
            .and(body_json(json!({"id": 12, "status": "CANCELLED"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 12, "status": "CANCELLED"})))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .await
            .update_appointment_status(12, AppointmentStatus::Cancelled)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn delete_maps_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/appointment/99"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .delete_appointment(99)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.server_message(), None);
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        // Port 9 (discard) on localhost is not expected to be listening.
        let client = HttpApiClient::new("http://127.0.0.1:9/api/v1");
        let err = client.list_doctors().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
