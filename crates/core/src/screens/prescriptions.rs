use super::{call, failure, or_na, with_footer, LoadState, Outcome};
use crate::scope::ScreenScope;
use crate::session::SessionContext;
use api_shared::{ClinicApi, Prescription};
use std::fmt::Write as _;

pub const MSG_PRESCRIPTIONS_LOAD_FAILED: &str = "Could not load your prescriptions.";

pub struct PrescriptionsScreen {
    prescriptions: LoadState<Vec<Prescription>>,
    /// Id of the prescription shown in the detail view.
    open: Option<i64>,
    scope: ScreenScope,
}

impl PrescriptionsScreen {
    pub fn new(scope: ScreenScope) -> Self {
        Self {
            prescriptions: LoadState::Loading,
            open: None,
            scope,
        }
    }

    pub fn prescriptions(&self) -> &LoadState<Vec<Prescription>> {
        &self.prescriptions
    }

    pub async fn load(&mut self, api: &dyn ClinicApi, session: &SessionContext) -> Outcome {
        let id = match session.require() {
            Ok(id) => id,
            Err(e) => return failure(e, MSG_PRESCRIPTIONS_LOAD_FAILED),
        };

        match call(&self.scope, api.list_prescriptions(id)).await {
            Ok(list) => {
                self.prescriptions = LoadState::Loaded(list);
                self.open = None;
                Outcome::none()
            }
            Err(e) => {
                let outcome = failure(e, MSG_PRESCRIPTIONS_LOAD_FAILED);
                if let Some(notice) = &outcome.notice {
                    self.prescriptions = LoadState::Failed(notice.text().to_string());
                }
                outcome
            }
        }
    }

    /// Open the detail view of prescription `id`.
    pub fn show(&mut self, id: i64) -> Outcome {
        if self.selected_by(id).is_none() {
            return Outcome::error(format!("Prescription {id} not found."));
        }
        self.open = Some(id);
        Outcome::none()
    }

    pub fn close_details(&mut self) {
        self.open = None;
    }

    pub fn selected(&self) -> Option<&Prescription> {
        self.open.and_then(|id| self.selected_by(id))
    }

    fn selected_by(&self, id: i64) -> Option<&Prescription> {
        self.prescriptions.loaded()?.iter().find(|p| p.id == id)
    }

    pub fn render(&self) -> String {
        if let Some(p) = self.selected() {
            return with_footer(render_details(p));
        }

        let mut out = String::from("Your Prescriptions\n\n");
        match &self.prescriptions {
            LoadState::Loading => out.push_str("Loading...\n"),
            LoadState::Loaded(list) if !list.is_empty() => {
                for p in list {
                    let _ = writeln!(out, "Prescription ID: {}", p.id);
                    let _ = writeln!(out, "Date: {}", or_na(p.date.as_deref()));
                    let _ = writeln!(out, "[show {}] Details\n", p.id);
                }
            }
            _ => out.push_str("No prescriptions available\n"),
        }
        with_footer(out)
    }
}

fn render_details(p: &Prescription) -> String {
    let health_id = p.patient.health_id.map(|h| h.to_string());
    let patient_name = p.patient.full_name();

    let mut out = format!("Prescription {}\n\n", p.id);
    let _ = writeln!(out, "Date: {}", or_na(p.date.as_deref()));
    let _ = writeln!(out, "Patient: {}", or_na(Some(&patient_name)));
    let _ = writeln!(out, "Health ID: {}", or_na(health_id.as_deref()));
    let _ = writeln!(
        out,
        "Doctor: Dr. {} - {}",
        p.doctor.full_name(),
        p.doctor.specialization
    );
    out.push_str("\nMedicines:\n");
    if p.medicines.is_empty() {
        out.push_str("None\n");
    }
    for m in &p.medicines {
        let _ = writeln!(out, "- {}: {}, {} times/day", m.name, m.dosage, m.times_per_day);
    }
    out.push_str("\n[close] Close\n");
    out
}
