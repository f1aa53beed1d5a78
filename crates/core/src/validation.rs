//! Form validation.
//!
//! Forms are checked before any request is built. A failed check yields
//! [`ClinicError::Validation`] with the text shown to the user, and no network call is made.

use crate::{ClinicError, ClinicResult};
use api_shared::RegisterPatientReq;
use clinic_types::{EmailAddress, IsoDateText, NonEmptyText};

pub const MSG_LOGIN_REQUIRED: &str = "Please enter your e-mail and password.";
pub const MSG_FILL_OUT_ALL: &str = "Please fill out all fields.";
pub const MSG_INVALID_DOB: &str = "Invalid date format. Use YYYY-MM-DD.";
pub const MSG_INVALID_EMAIL: &str = "Please enter a valid e-mail address.";
pub const MSG_INVALID_HEALTH_ID: &str = "Health ID must be a number.";

/// Raw input of the login screen.
#[derive(Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// Returns the trimmed e-mail and the password as typed.
    pub fn validate(&self) -> ClinicResult<(String, String)> {
        let email = NonEmptyText::new(&self.email)
            .map_err(|_| ClinicError::validation(MSG_LOGIN_REQUIRED))?;
        if self.password.is_empty() {
            return Err(ClinicError::validation(MSG_LOGIN_REQUIRED));
        }
        Ok((email.into_string(), self.password.clone()))
    }
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Raw input of the registration screen.
#[derive(Clone, Default)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub dob: String,
    pub health_id: String,
}

impl RegistrationForm {
    /// Checks, in order: every field present, date of birth shape, e-mail shape, numeric
    /// health id.
    pub fn validate(&self) -> ClinicResult<RegisterPatientReq> {
        let required = |v: &str| {
            NonEmptyText::new(v).map_err(|_| ClinicError::validation(MSG_FILL_OUT_ALL))
        };

        let first_name = required(&self.first_name)?;
        let last_name = required(&self.last_name)?;
        let email = required(&self.email)?;
        if self.password.is_empty() {
            return Err(ClinicError::validation(MSG_FILL_OUT_ALL));
        }
        let dob = required(&self.dob)?;
        let health_id = required(&self.health_id)?;

        let dob =
            IsoDateText::parse(dob.as_str()).map_err(|_| ClinicError::validation(MSG_INVALID_DOB))?;
        let email = EmailAddress::parse(email.as_str())
            .map_err(|_| ClinicError::validation(MSG_INVALID_EMAIL))?;
        let health_id = health_id
            .as_str()
            .parse::<i64>()
            .map_err(|_| ClinicError::validation(MSG_INVALID_HEALTH_ID))?;

        Ok(RegisterPatientReq {
            first_name: first_name.into_string(),
            last_name: last_name.into_string(),
            email: email.as_str().to_string(),
            password: self.password.clone(),
            dob: dob.as_str().to_string(),
            health_id,
        })
    }
}

impl std::fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("dob", &self.dob)
            .field("health_id", &self.health_id)
            .finish_non_exhaustive()
    }
}
