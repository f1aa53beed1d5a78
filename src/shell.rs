//! Line-oriented front end for the screen stack.
//!
//! Each input line is parsed into a [`Command`] for the current screen, dispatched to that
//! screen's view model, and the resulting [`Outcome`] is printed and applied to the
//! [`Navigator`]. Entering a screen builds it afresh in the scope of its stack entry and runs
//! its initial fetch.

use api_shared::ClinicApi;
use clinic_core::screens::{
    AddAppointmentScreen, AppointmentsScreen, HomeScreen, LoginScreen, PrescriptionsScreen,
    ProfileScreen, RegisterScreen,
};
use clinic_core::{Nav, Navigator, Outcome, Route, SessionContext};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Back,
    Refresh,
    Go(Route),
    /// Set a form field on the login or register screen.
    Set(String, String),
    Submit,
    Cancel(i64),
    Delete(i64),
    Doctor(Option<i64>),
    Date(String),
    Slot(String),
    Show(i64),
    Close,
    Logout,
    Unknown(String),
}

/// Parse one input line in the context of `route`.
pub fn parse_command(route: Route, line: &str) -> Command {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };
    let id = || rest.parse::<i64>().ok();
    let unknown = || Command::Unknown(line.to_string());

    match (route, word) {
        (_, "help" | "?") => Command::Help,
        (_, "quit" | "exit") => Command::Quit,
        (_, "back") => Command::Back,
        (_, "refresh") => Command::Refresh,

        (Route::Login, "login") | (Route::Register, "register") => Command::Submit,
        (Route::Login, "register") => Command::Go(Route::Register),
        (Route::Register, "login") => Command::Back,
        (Route::Login | Route::Register, field) if !rest.is_empty() => {
            Command::Set(field.to_string(), rest.to_string())
        }

        (Route::Home, "1" | "prescriptions") => Command::Go(Route::Prescriptions),
        (Route::Home, "2" | "appointments") => Command::Go(Route::Appointments),
        (Route::Home, "3" | "profile") => Command::Go(Route::Profile),

        (Route::Appointments, "add") => Command::Go(Route::AddAppointment),
        (Route::Appointments, "cancel") => id().map_or_else(unknown, Command::Cancel),
        (Route::Appointments, "delete") => id().map_or_else(unknown, Command::Delete),

        (Route::AddAppointment, "doctor") if rest == "none" => Command::Doctor(None),
        (Route::AddAppointment, "doctor") => {
            id().map_or_else(unknown, |id| Command::Doctor(Some(id)))
        }
        (Route::AddAppointment, "date") if !rest.is_empty() => Command::Date(rest.to_string()),
        (Route::AddAppointment, "slot") if !rest.is_empty() => Command::Slot(rest.to_string()),
        (Route::AddAppointment, "book") => Command::Submit,

        (Route::Prescriptions, "show") => id().map_or_else(unknown, Command::Show),
        (Route::Prescriptions, "close") => Command::Close,

        (Route::Profile, "logout") => Command::Logout,

        _ => unknown(),
    }
}

fn help(route: Route) -> &'static str {
    match route {
        Route::Login => "email <e-mail> | password <password> | login | register",
        Route::Register => {
            "first_name|last_name|email|password|dob|health_id <value> | register | login"
        }
        Route::Home => "1 prescriptions | 2 appointments | 3 profile",
        Route::Appointments => "cancel <id> | delete <id> | add | refresh",
        Route::AddAppointment => "doctor <id|none> | date <YYYY-MM-DD> | slot <Day Time> | book",
        Route::Prescriptions => "show <id> | close | refresh",
        Route::Profile => "logout",
    }
}

enum Screen {
    Login(LoginScreen),
    Register(RegisterScreen),
    Home(HomeScreen),
    Appointments(AppointmentsScreen),
    AddAppointment(AddAppointmentScreen),
    Prescriptions(PrescriptionsScreen),
    Profile(ProfileScreen),
}

impl Screen {
    fn render(&self) -> String {
        match self {
            Self::Login(s) => s.render(),
            Self::Register(s) => s.render(),
            Self::Home(s) => s.render(),
            Self::Appointments(s) => s.render(),
            Self::AddAppointment(s) => s.render(),
            Self::Prescriptions(s) => s.render(),
            Self::Profile(s) => s.render(),
        }
    }
}

pub struct Shell<'a> {
    api: &'a dyn ClinicApi,
    session: SessionContext,
    nav: Navigator,
    screen: Screen,
}

impl<'a> Shell<'a> {
    pub fn new(api: &'a dyn ClinicApi, session: SessionContext) -> Self {
        let root = if session.is_logged_in() {
            Route::Home
        } else {
            Route::Login
        };
        let nav = Navigator::new(root);
        let screen = Screen::Login(LoginScreen::new(nav.current_scope()));
        Self {
            api,
            session,
            nav,
            screen,
        }
    }

    /// Build the current route's screen, run its initial fetch and print it.
    pub async fn enter(&mut self) {
        loop {
            let route = self.nav.current();
            if route.requires_session() && !self.session.is_logged_in() {
                self.nav.reset_to(Route::Login);
                continue;
            }

            let scope = self.nav.current_scope();
            let (screen, outcome) = match route {
                Route::Login => (Screen::Login(LoginScreen::new(scope)), Outcome::none()),
                Route::Register => (Screen::Register(RegisterScreen::new(scope)), Outcome::none()),
                Route::Home => {
                    let mut s = HomeScreen::new(scope);
                    let o = s.load(self.api, &self.session).await;
                    (Screen::Home(s), o)
                }
                Route::Appointments => {
                    let mut s = AppointmentsScreen::new(scope);
                    let o = s.load(self.api, &self.session).await;
                    (Screen::Appointments(s), o)
                }
                Route::AddAppointment => {
                    let mut s = AddAppointmentScreen::new(scope);
                    let o = s.load(self.api).await;
                    (Screen::AddAppointment(s), o)
                }
                Route::Prescriptions => {
                    let mut s = PrescriptionsScreen::new(scope);
                    let o = s.load(self.api, &self.session).await;
                    (Screen::Prescriptions(s), o)
                }
                Route::Profile => {
                    let mut s = ProfileScreen::new(scope);
                    let o = s.load(self.api, &self.session).await;
                    (Screen::Profile(s), o)
                }
            };
            self.screen = screen;

            if let Some(notice) = &outcome.notice {
                println!("{notice}");
            }
            match outcome.nav {
                Some(nav) => self.nav.apply(nav),
                None => break,
            }
        }

        println!("== {} ==", self.nav.current().title());
        print!("{}", self.screen.render());
    }

    /// Handle one input line. Returns `false` when the user asked to quit.
    pub async fn handle(&mut self, line: &str) -> bool {
        if line.trim().is_empty() {
            return true;
        }

        let outcome = match parse_command(self.nav.current(), line) {
            Command::Quit => return false,
            Command::Help => {
                println!("{} | back | refresh | quit", help(self.nav.current()));
                return true;
            }
            Command::Unknown(text) => {
                println!("Unknown command {text:?}. Type `help` for options.");
                return true;
            }
            Command::Back => Outcome::redirect(Nav::Back),
            Command::Refresh => {
                self.enter().await;
                return true;
            }
            Command::Go(route) => Outcome::redirect(Nav::Navigate(route)),
            command => self.dispatch(command).await,
        };

        if let Some(notice) = &outcome.notice {
            println!("{notice}");
        }
        match outcome.nav {
            Some(nav) => {
                self.nav.apply(nav);
                self.enter().await;
            }
            None => print!("{}", self.screen.render()),
        }
        true
    }

    async fn dispatch(&mut self, command: Command) -> Outcome {
        let api = self.api;
        let session = &mut self.session;
        match (&mut self.screen, command) {
            (Screen::Login(s), Command::Set(field, value)) => {
                match field.as_str() {
                    "email" => s.form.email = value,
                    "password" => s.form.password = value,
                    _ => return Outcome::error(format!("Unknown field {field:?}.")),
                }
                Outcome::none()
            }
            (Screen::Login(s), Command::Submit) => s.submit(api, session).await,

            (Screen::Register(s), Command::Set(field, value)) => {
                let f = &mut s.form;
                let slot = match field.as_str() {
                    "first_name" => &mut f.first_name,
                    "last_name" => &mut f.last_name,
                    "email" => &mut f.email,
                    "password" => &mut f.password,
                    "dob" => &mut f.dob,
                    "health_id" => &mut f.health_id,
                    _ => return Outcome::error(format!("Unknown field {field:?}.")),
                };
                *slot = value;
                Outcome::none()
            }
            (Screen::Register(s), Command::Submit) => s.submit(api, session).await,

            (Screen::Appointments(s), Command::Cancel(id)) => s.cancel(api, id).await,
            (Screen::Appointments(s), Command::Delete(id)) => s.delete(api, id).await,

            (Screen::AddAppointment(s), Command::Doctor(Some(id))) => s.select_doctor(id),
            (Screen::AddAppointment(s), Command::Doctor(None)) => {
                s.clear_doctor();
                Outcome::none()
            }
            (Screen::AddAppointment(s), Command::Date(date)) => {
                s.choose_date(&date, chrono::Local::now().date_naive())
            }
            (Screen::AddAppointment(s), Command::Slot(label)) => s.choose_slot(&label),
            (Screen::AddAppointment(s), Command::Submit) => s.submit(api, session).await,

            (Screen::Prescriptions(s), Command::Show(id)) => s.show(id),
            (Screen::Prescriptions(s), Command::Close) => {
                s.close_details();
                Outcome::none()
            }

            (Screen::Profile(s), Command::Logout) => s.logout(session),

            (_, command) => {
                tracing::debug!("command {:?} ignored on this screen", command);
                Outcome::none()
            }
        }
    }
}
