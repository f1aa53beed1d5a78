//! Screen view models.
//!
//! Each screen owns its local state and the [`ScreenScope`] of its place on the navigation
//! stack. Actions are async methods taking the [`ClinicApi`](api_shared::ClinicApi) and, where
//! identity matters, the [`SessionContext`](crate::SessionContext). They never fail: every
//! error is caught here and turned into an [`Outcome`] carrying a notice and, for a missing
//! session, a redirect to login.
//!
//! `render` produces the plain-text form of a screen, ending with the clinic footer.

pub mod add_appointment;
pub mod appointments;
pub mod home;
pub mod login;
pub mod prescriptions;
pub mod profile;
pub mod register;

pub use add_appointment::AddAppointmentScreen;
pub use appointments::AppointmentsScreen;
pub use home::HomeScreen;
pub use login::LoginScreen;
pub use prescriptions::PrescriptionsScreen;
pub use profile::ProfileScreen;
pub use register::RegisterScreen;

use crate::constants::BRAND_NAME;
use crate::navigation::{Nav, Route};
use crate::scope::ScreenScope;
use crate::{ClinicError, ClinicResult};
use api_shared::ApiResult;
use std::future::Future;

/// A dismissible alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Self::Success(m) | Self::Error(m) => m,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success(m) => write!(f, "Success: {m}"),
            Self::Error(m) => write!(f, "Error: {m}"),
        }
    }
}

/// What a screen action asks the shell to do next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub notice: Option<Notice>,
    pub nav: Option<Nav>,
}

impl Outcome {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            notice: Some(Notice::Success(message.into())),
            nav: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            notice: Some(Notice::Error(message.into())),
            nav: None,
        }
    }

    pub fn redirect(nav: Nav) -> Self {
        Self {
            notice: None,
            nav: Some(nav),
        }
    }

    pub fn then(mut self, nav: Nav) -> Self {
        self.nav = Some(nav);
        self
    }

    pub fn is_error(&self) -> bool {
        self.notice.as_ref().is_some_and(Notice::is_error)
    }
}

/// Data fetched when a screen mounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T> LoadState<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(v) => Some(v),
            _ => None,
        }
    }
}

/// Run one request inside the screen's scope.
pub(crate) async fn call<T, F>(scope: &ScreenScope, fut: F) -> ClinicResult<T>
where
    F: Future<Output = ApiResult<T>>,
{
    Ok(scope.run(fut).await??)
}

/// Turn an error caught at the screen boundary into an outcome.
///
/// `fallback` is shown for API failures that carry no server message.
pub(crate) fn failure(err: ClinicError, fallback: &str) -> Outcome {
    match err {
        ClinicError::MissingSession => {
            tracing::info!("no session; redirecting to login");
            Outcome::redirect(Nav::ResetTo(Route::Login))
        }
        ClinicError::Cancelled => {
            tracing::debug!("response discarded: screen closed");
            Outcome::none()
        }
        ClinicError::Validation(msg) => Outcome::error(msg),
        ClinicError::Api(e) => {
            tracing::error!("{}: {}", fallback, e);
            Outcome::error(e.user_message(fallback))
        }
        other => {
            tracing::error!("{}", other);
            Outcome::error(other.to_string())
        }
    }
}

/// Append the clinic footer to a rendered screen.
pub(crate) fn with_footer(mut body: String) -> String {
    if !body.ends_with('\n') {
        body.push('\n');
    }
    body.push('\n');
    body.push_str(BRAND_NAME);
    body.push('\n');
    body
}

/// `value`, or `N/A` when missing or blank.
pub(crate) fn or_na(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or("N/A")
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_shared::ApiError;

    #[test]
    fn missing_session_redirects_to_login() {
        let outcome = failure(ClinicError::MissingSession, "x");
        assert_eq!(outcome.nav, Some(Nav::ResetTo(Route::Login)));
        assert_eq!(outcome.notice, None);
    }

    #[test]
    fn cancelled_is_silent() {
        assert_eq!(failure(ClinicError::Cancelled, "x"), Outcome::none());
    }

    #[test]
    fn api_failure_prefers_server_text() {
        let outcome = failure(
            ClinicError::Api(ApiError::Status {
                status: 400,
                message: Some("Bad email".into()),
            }),
            "Generic",
        );
        assert_eq!(outcome.notice, Some(Notice::Error("Bad email".into())));

        let outcome = failure(ClinicError::Api(ApiError::Transport("down".into())), "Generic");
        assert_eq!(outcome.notice, Some(Notice::Error("Generic".into())));
    }

    #[test]
    fn footer_is_appended_once() {
        let rendered = with_footer("Title".into());
        assert_eq!(rendered, format!("Title\n\n{BRAND_NAME}\n"));
    }

    #[test]
    fn blank_values_render_as_na() {
        assert_eq!(or_na(None), "N/A");
        assert_eq!(or_na(Some(" ")), "N/A");
        assert_eq!(or_na(Some("09:00")), "09:00");
    }
}
