use api_client::HttpApiClient;
use clap::{Parser, Subcommand};
use clinic_core::constants::{ENV_API_BASE_URL, ENV_DATA_DIR};
use clinic_core::screens::{
    AddAppointmentScreen, AppointmentsScreen, HomeScreen, LoginScreen, PrescriptionsScreen,
    ProfileScreen, RegisterScreen,
};
use clinic_core::{
    CoreConfig, FileSessionStore, Nav, Outcome, Route, ScreenScope, SessionContext,
};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "clinic")]
#[command(about = "Clinic patient client CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and remember the patient
    Login {
        email: String,
        password: String,
    },
    /// Register a new patient account
    Register {
        first_name: String,
        last_name: String,
        email: String,
        password: String,
        /// Date of birth (YYYY-MM-DD)
        dob: String,
        /// Health card number
        health_id: String,
    },
    /// Forget the logged-in patient
    Logout,
    /// Show the greeting and menu
    Home,
    /// Show the logged-in patient's profile
    Profile,
    /// List doctors and, with --doctor, the slots they offer
    Doctors {
        #[arg(long)]
        doctor: Option<i64>,
    },
    /// List appointments
    Appointments,
    /// Cancel an appointment
    Cancel { id: i64 },
    /// Delete an appointment
    Delete { id: i64 },
    /// Book an appointment
    Book {
        /// Doctor id
        #[arg(long)]
        doctor: i64,
        /// Appointment date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Slot as listed by `doctors --doctor`, e.g. "Mon 09:00"
        #[arg(long)]
        slot: String,
    },
    /// List prescriptions, or show one in detail
    Prescriptions {
        #[arg(long)]
        show: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinic=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("Use `clinic --help` for available commands.");
        return Ok(ExitCode::SUCCESS);
    };

    let cfg = CoreConfig::from_env_values(
        std::env::var(ENV_API_BASE_URL).ok(),
        std::env::var(ENV_DATA_DIR).ok(),
    )?;
    tracing::debug!("using clinic API at {}", cfg.api_base_url());
    let api = HttpApiClient::new(cfg.api_base_url());
    let mut session = SessionContext::load(Box::new(FileSessionStore::new(cfg.session_file())))?;
    let scope = ScreenScope::new();

    let outcome = match command {
        Commands::Login { email, password } => {
            let mut screen = LoginScreen::new(scope);
            screen.form.email = email;
            screen.form.password = password;
            screen.submit(&api, &mut session).await
        }
        Commands::Register {
            first_name,
            last_name,
            email,
            password,
            dob,
            health_id,
        } => {
            let mut screen = RegisterScreen::new(scope);
            screen.form.first_name = first_name;
            screen.form.last_name = last_name;
            screen.form.email = email;
            screen.form.password = password;
            screen.form.dob = dob;
            screen.form.health_id = health_id;
            screen.submit(&api, &mut session).await
        }
        Commands::Logout => {
            let outcome = ProfileScreen::new(scope).logout(&mut session);
            if outcome.is_error() {
                outcome
            } else {
                Outcome::success("Logged out.")
            }
        }
        Commands::Home => {
            let mut screen = HomeScreen::new(scope);
            let outcome = screen.load(&api, &session).await;
            show(&outcome, || screen.render())
        }
        Commands::Profile => {
            let mut screen = ProfileScreen::new(scope);
            let outcome = screen.load(&api, &session).await;
            show(&outcome, || screen.render())
        }
        Commands::Doctors { doctor } => {
            let mut screen = AddAppointmentScreen::new(scope);
            let mut outcome = screen.load(&api).await;
            if let (Some(id), None) = (doctor, &outcome.notice) {
                outcome = screen.select_doctor(id);
            }
            show(&outcome, || screen.render())
        }
        Commands::Appointments => {
            let mut screen = AppointmentsScreen::new(scope);
            let outcome = screen.load(&api, &session).await;
            show(&outcome, || screen.render())
        }
        Commands::Cancel { id } => {
            let mut screen = AppointmentsScreen::new(scope);
            let outcome = screen.load(&api, &session).await;
            if outcome.nav.is_some() || outcome.is_error() {
                outcome
            } else {
                screen.cancel(&api, id).await
            }
        }
        Commands::Delete { id } => {
            let mut screen = AppointmentsScreen::new(scope);
            let outcome = screen.load(&api, &session).await;
            if outcome.nav.is_some() || outcome.is_error() {
                outcome
            } else {
                screen.delete(&api, id).await
            }
        }
        Commands::Book { doctor, date, slot } => {
            let today = chrono::Local::now().date_naive();
            let mut screen = AddAppointmentScreen::new(scope);
            let steps = [
                screen.load(&api).await,
                screen.select_doctor(doctor),
                screen.choose_date(&date, today),
                screen.choose_slot(&slot),
            ];
            match steps.into_iter().find(|o| o.notice.is_some() || o.nav.is_some()) {
                Some(outcome) => outcome,
                None => screen.submit(&api, &session).await,
            }
        }
        Commands::Prescriptions { show: id } => {
            let mut screen = PrescriptionsScreen::new(scope);
            let mut outcome = screen.load(&api, &session).await;
            if let (Some(id), None) = (id, &outcome.notice) {
                outcome = screen.show(id);
            }
            show(&outcome, || screen.render())
        }
    };

    Ok(report(&outcome))
}

/// Print a rendered screen unless the action failed or redirected.
fn show(outcome: &Outcome, render: impl FnOnce() -> String) -> Outcome {
    if outcome.notice.is_none() && outcome.nav.is_none() {
        print!("{}", render());
    }
    outcome.clone()
}

fn report(outcome: &Outcome) -> ExitCode {
    if outcome.nav == Some(Nav::ResetTo(Route::Login))
        && outcome.notice.is_none()
    {
        eprintln!("Please log in first: clinic login <email> <password>");
        return ExitCode::FAILURE;
    }

    match &outcome.notice {
        Some(notice) if notice.is_error() => {
            eprintln!("{}", notice);
            ExitCode::FAILURE
        }
        Some(notice) => {
            println!("{}", notice);
            ExitCode::SUCCESS
        }
        None => ExitCode::SUCCESS,
    }
}
