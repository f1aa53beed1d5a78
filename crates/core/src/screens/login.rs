use super::{call, failure, with_footer, Outcome};
use crate::navigation::{Nav, Route};
use crate::scope::ScreenScope;
use crate::session::SessionContext;
use crate::validation::LoginForm;
use crate::ClinicError;
use api_shared::ClinicApi;

pub const MSG_LOGIN_OK: &str = "Login successful!";
pub const MSG_LOGIN_FAILED: &str = "Invalid email or password. Please try again.";

pub struct LoginScreen {
    pub form: LoginForm,
    scope: ScreenScope,
}

impl LoginScreen {
    pub fn new(scope: ScreenScope) -> Self {
        Self {
            form: LoginForm::default(),
            scope,
        }
    }

    /// Log in with the form's credentials and remember the patient on success.
    pub async fn submit(&mut self, api: &dyn ClinicApi, session: &mut SessionContext) -> Outcome {
        let (email, password) = match self.form.validate() {
            Ok(creds) => creds,
            Err(e) => return failure(e, MSG_LOGIN_FAILED),
        };

        tracing::info!("Attempting login for {}", email);
        let patient = match call(&self.scope, api.login(&email, &password)).await {
            Ok(p) => p,
            Err(ClinicError::Api(e)) => {
                tracing::error!("Error during login: {}", e);
                return Outcome::error(MSG_LOGIN_FAILED);
            }
            Err(e) => return failure(e, MSG_LOGIN_FAILED),
        };

        if let Err(e) = session.establish(patient.id) {
            return failure(e, MSG_LOGIN_FAILED);
        }
        self.form.password.clear();

        Outcome::success(MSG_LOGIN_OK).then(Nav::Navigate(Route::Home))
    }

    pub fn render(&self) -> String {
        with_footer(format!(
            "{}\n\nE-mail: {}\nPassword: {}\n\n[login] Login\n[register] New here? Sign up\n",
            crate::constants::BRAND_NAME,
            self.form.email,
            "*".repeat(self.form.password.chars().count()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStore;
    use crate::testing::FakeApi;
    use api_shared::ApiError;

    fn session() -> SessionContext {
        SessionContext::load(Box::new(MemorySessionStore::new())).unwrap()
    }

    fn screen(email: &str, password: &str) -> LoginScreen {
        let mut screen = LoginScreen::new(ScreenScope::new());
        screen.form.email = email.into();
        screen.form.password = password.into();
        screen
    }

    #[tokio::test]
    async fn successful_login_persists_id_and_goes_home() {
        let api = FakeApi::new();
        let mut session = session();
        let mut screen = screen("ion@clinic.test", "secret");

        let outcome = screen.submit(&api, &mut session).await;

        assert_eq!(outcome, Outcome::success(MSG_LOGIN_OK).then(Nav::Navigate(Route::Home)));
        assert_eq!(session.patient_id(), Some(7));
        assert_eq!(session.store().get().unwrap().as_deref(), Some("7"));
        assert!(screen.form.password.is_empty());
    }

    #[tokio::test]
    async fn bad_credentials_show_generic_message() {
        let mut api = FakeApi::new();
        api.login = Err(ApiError::Status {
            status: 401,
            message: Some("Unauthorized".into()),
        });
        let mut session = session();

        let outcome = screen("ion@clinic.test", "wrong").submit(&api, &mut session).await;

        assert_eq!(outcome, Outcome::error(MSG_LOGIN_FAILED));
        assert!(!session.is_logged_in());
    }

    #[tokio::test]
    async fn empty_form_makes_no_request() {
        let api = FakeApi::new();
        let mut session = session();

        let outcome = screen("", "").submit(&api, &mut session).await;

        assert!(outcome.is_error());
        assert!(api.calls().is_empty());
    }

    #[test]
    fn render_masks_password() {
        let rendered = screen("ion@clinic.test", "secret").render();
        assert!(rendered.contains("Password: ******"));
        assert!(!rendered.contains("secret"));
    }
}
