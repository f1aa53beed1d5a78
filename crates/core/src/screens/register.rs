use super::{call, failure, with_footer, Outcome};
use crate::navigation::{Nav, Route};
use crate::scope::ScreenScope;
use crate::session::SessionContext;
use crate::validation::RegistrationForm;
use api_shared::ClinicApi;

pub const MSG_WELCOME: &str = "Welcome!";
pub const MSG_REGISTER_FAILED: &str = "An error occurred. Please try again.";

pub struct RegisterScreen {
    pub form: RegistrationForm,
    scope: ScreenScope,
}

impl RegisterScreen {
    pub fn new(scope: ScreenScope) -> Self {
        Self {
            form: RegistrationForm::default(),
            scope,
        }
    }

    /// Register a new patient, then log them in.
    pub async fn submit(&mut self, api: &dyn ClinicApi, session: &mut SessionContext) -> Outcome {
        let req = match self.form.validate() {
            Ok(req) => req,
            Err(e) => return failure(e, MSG_REGISTER_FAILED),
        };

        tracing::info!("Registering patient {}", req.email);
        let patient = match call(&self.scope, api.register_patient(&req)).await {
            Ok(p) => p,
            Err(e) => return failure(e, MSG_REGISTER_FAILED),
        };

        if let Err(e) = session.establish(patient.id) {
            return failure(e, MSG_REGISTER_FAILED);
        }
        self.form.password.clear();

        Outcome::success(MSG_WELCOME).then(Nav::Navigate(Route::Home))
    }

    pub fn render(&self) -> String {
        let f = &self.form;
        with_footer(format!(
            "{}\n\nFirst Name: {}\nLast Name: {}\nE-mail: {}\nPassword: {}\nDate of Birth (YYYY-MM-DD): {}\nHealth ID: {}\n\n[register] Register\n[login] Already have an account? Login\n",
            crate::constants::BRAND_NAME,
            f.first_name,
            f.last_name,
            f.email,
            "*".repeat(f.password.chars().count()),
            f.dob,
            f.health_id,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStore;
    use crate::testing::FakeApi;
    use crate::validation::MSG_INVALID_DOB;
    use api_shared::ApiError;

    fn session() -> SessionContext {
        SessionContext::load(Box::new(MemorySessionStore::new())).unwrap()
    }

    fn filled_screen() -> RegisterScreen {
        let mut screen = RegisterScreen::new(ScreenScope::new());
        screen.form = RegistrationForm {
            first_name: "Ion".into(),
            last_name: "Pop".into(),
            email: "ion@clinic.test".into(),
            password: "secret".into(),
            dob: "1990-04-23".into(),
            health_id: "42".into(),
        };
        screen
    }

    #[tokio::test]
    async fn registration_establishes_session() {
        let api = FakeApi::new();
        let mut session = session();

        let outcome = filled_screen().submit(&api, &mut session).await;

        assert_eq!(outcome, Outcome::success(MSG_WELCOME).then(Nav::Navigate(Route::Home)));
        assert_eq!(session.patient_id(), Some(8));
    }

    #[tokio::test]
    async fn invalid_dob_blocks_request() {
        let api = FakeApi::new();
        let mut session = session();
        let mut screen = filled_screen();
        screen.form.dob = "1990-4-23".into();

        let outcome = screen.submit(&api, &mut session).await;

        assert_eq!(outcome, Outcome::error(MSG_INVALID_DOB));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn server_message_is_shown() {
        let mut api = FakeApi::new();
        api.register = Err(ApiError::Status {
            status: 409,
            message: Some("Email already registered".into()),
        });
        let mut session = session();

        let outcome = filled_screen().submit(&api, &mut session).await;

        assert_eq!(outcome, Outcome::error("Email already registered"));
        assert!(!session.is_logged_in());
    }

    #[tokio::test]
    async fn transport_failure_uses_generic_message() {
        let mut api = FakeApi::new();
        api.register = Err(ApiError::Transport("refused".into()));
        let mut session = session();

        let outcome = filled_screen().submit(&api, &mut session).await;
        assert_eq!(outcome, Outcome::error(MSG_REGISTER_FAILED));
    }
}
