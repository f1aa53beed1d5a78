use super::{call, failure, or_na, with_footer, LoadState, Outcome};
use crate::navigation::{Nav, Route};
use crate::scope::ScreenScope;
use crate::session::SessionContext;
use api_shared::{ClinicApi, Patient};
use std::fmt::Write as _;

pub const MSG_PROFILE_LOAD_FAILED: &str = "Could not load your profile.";

pub struct ProfileScreen {
    profile: LoadState<Patient>,
    scope: ScreenScope,
}

impl ProfileScreen {
    pub fn new(scope: ScreenScope) -> Self {
        Self {
            profile: LoadState::Loading,
            scope,
        }
    }

    pub fn profile(&self) -> &LoadState<Patient> {
        &self.profile
    }

    pub async fn load(&mut self, api: &dyn ClinicApi, session: &SessionContext) -> Outcome {
        let id = match session.require() {
            Ok(id) => id,
            Err(e) => return failure(e, MSG_PROFILE_LOAD_FAILED),
        };

        match call(&self.scope, api.get_patient(id)).await {
            Ok(patient) => {
                self.profile = LoadState::Loaded(patient);
                Outcome::none()
            }
            Err(e) => {
                let outcome = failure(e, MSG_PROFILE_LOAD_FAILED);
                if let Some(notice) = &outcome.notice {
                    self.profile = LoadState::Failed(notice.text().to_string());
                }
                outcome
            }
        }
    }

    /// Clear the session and return to login.
    pub fn logout(&mut self, session: &mut SessionContext) -> Outcome {
        self.scope.close();
        match session.logout() {
            Ok(()) => Outcome::redirect(Nav::ResetTo(Route::Login)),
            Err(e) => failure(e, "Could not log out."),
        }
    }

    pub fn render(&self) -> String {
        let patient = match &self.profile {
            LoadState::Loading => return with_footer("Loading profile...".into()),
            LoadState::Failed(_) => return with_footer("No profile data available".into()),
            LoadState::Loaded(p) => p,
        };

        let health_id = patient.health_id.map(|h| h.to_string());
        let age = patient.age.map(|a| a.to_string());

        let mut out = String::from("Your Profile\n\n");
        let _ = writeln!(out, "First Name: {}", or_na(patient.first_name.as_deref()));
        let _ = writeln!(out, "Last Name: {}", or_na(patient.last_name.as_deref()));
        let _ = writeln!(out, "Date of Birth: {}", or_na(patient.dob.as_deref()));
        let _ = writeln!(out, "E-mail: {}", or_na(patient.email.as_deref()));
        let _ = writeln!(out, "Health Card Number: {}", or_na(health_id.as_deref()));
        let _ = writeln!(out, "Age: {}", or_na(age.as_deref()));
        out.push_str("\n[logout] Log out\n");
        with_footer(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::AppointmentsScreen;
    use crate::session::{FileSessionStore, MemorySessionStore};
    use crate::testing::FakeApi;
    use api_shared::ApiError;
    use tempfile::TempDir;

    #[tokio::test]
    async fn renders_profile_fields() {
        let api = FakeApi::new();
        let mut session = SessionContext::load(Box::new(MemorySessionStore::new())).unwrap();
        session.establish(7).unwrap();
        let mut screen = ProfileScreen::new(ScreenScope::new());

        screen.load(&api, &session).await;
        let rendered = screen.render();

        assert!(rendered.contains("First Name: Ion"));
        assert!(rendered.contains("Health Card Number: 42"));
        assert!(rendered.contains("Age: 34"));
    }

    #[tokio::test]
    async fn failed_fetch_renders_placeholder() {
        let mut api = FakeApi::new();
        api.patient = Err(ApiError::Status {
            status: 404,
            message: None,
        });
        let mut session = SessionContext::load(Box::new(MemorySessionStore::new())).unwrap();
        session.establish(7).unwrap();
        let mut screen = ProfileScreen::new(ScreenScope::new());

        let outcome = screen.load(&api, &session).await;

        assert_eq!(outcome, Outcome::error(MSG_PROFILE_LOAD_FAILED));
        assert!(screen.render().contains("No profile data available"));
    }

    #[tokio::test]
    async fn logout_clears_session_and_protected_screens_redirect() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("session.json");
        let api = FakeApi::new();

        let mut session = SessionContext::load(Box::new(FileSessionStore::new(&path))).unwrap();
        session.establish(7).unwrap();

        let outcome = ProfileScreen::new(ScreenScope::new()).logout(&mut session);
        assert_eq!(outcome, Outcome::redirect(Nav::ResetTo(Route::Login)));
        assert!(!path.exists());

        let reloaded = SessionContext::load(Box::new(FileSessionStore::new(&path))).unwrap();
        let outcome = AppointmentsScreen::new(ScreenScope::new())
            .load(&api, &reloaded)
            .await;
        assert_eq!(outcome.nav, Some(Nav::ResetTo(Route::Login)));
        assert!(api.calls().is_empty());
    }
}
