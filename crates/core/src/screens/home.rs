use super::{call, failure, with_footer, LoadState, Outcome};
use crate::navigation::Route;
use crate::scope::ScreenScope;
use crate::session::SessionContext;
use api_shared::{ClinicApi, Patient};
use std::fmt::Write as _;

pub const MSG_PATIENT_LOAD_FAILED: &str = "Could not load your details.";

/// Destinations offered on the home screen, in display order.
pub const MENU: [Route; 3] = [Route::Prescriptions, Route::Appointments, Route::Profile];

pub struct HomeScreen {
    patient: LoadState<Patient>,
    scope: ScreenScope,
}

impl HomeScreen {
    pub fn new(scope: ScreenScope) -> Self {
        Self {
            patient: LoadState::Loading,
            scope,
        }
    }

    pub fn patient(&self) -> &LoadState<Patient> {
        &self.patient
    }

    pub async fn load(&mut self, api: &dyn ClinicApi, session: &SessionContext) -> Outcome {
        let id = match session.require() {
            Ok(id) => id,
            Err(e) => return failure(e, MSG_PATIENT_LOAD_FAILED),
        };

        match call(&self.scope, api.get_patient(id)).await {
            Ok(patient) => {
                self.patient = LoadState::Loaded(patient);
                Outcome::none()
            }
            Err(e) => {
                let outcome = failure(e, MSG_PATIENT_LOAD_FAILED);
                if let Some(notice) = &outcome.notice {
                    self.patient = LoadState::Failed(notice.text().to_string());
                }
                outcome
            }
        }
    }

    pub fn greeting(&self) -> String {
        let name = self
            .patient
            .loaded()
            .and_then(|p| p.first_name.as_deref())
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("User");
        format!("Hello, {name}!")
    }

    pub fn render(&self) -> String {
        if matches!(self.patient, LoadState::Loading) {
            return with_footer("Loading...".into());
        }

        let mut out = self.greeting();
        out.push_str("\n\n");
        for (i, route) in MENU.iter().enumerate() {
            let label = match route {
                Route::Prescriptions => "Prescriptions",
                Route::Appointments => "Appointments",
                _ => "Profile",
            };
            let _ = writeln!(out, "[{}] {}", i + 1, label);
        }
        with_footer(out)
    }
}
