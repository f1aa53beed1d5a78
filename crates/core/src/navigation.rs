//! Stack-based navigation between screens.
//!
//! Every entry on the stack owns a [`ScreenScope`]; leaving a screen closes its scope so late
//! responses are discarded.

use crate::scope::ScreenScope;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Home,
    Appointments,
    AddAppointment,
    Prescriptions,
    Profile,
}

impl Route {
    /// Whether the screen needs a logged-in patient.
    pub fn requires_session(self) -> bool {
        !matches!(self, Self::Login | Self::Register)
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Register => "Register",
            Self::Home => "Home",
            Self::Appointments => "Your Appointments",
            Self::AddAppointment => "Book an Appointment",
            Self::Prescriptions => "Your Prescriptions",
            Self::Profile => "Your Profile",
        }
    }
}

/// A navigation request produced by a screen action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    /// Go to `route`: back to it when it is already on the stack, otherwise push it.
    Navigate(Route),
    /// Drop the whole stack and start again at `route`.
    ResetTo(Route),
    Back,
}

struct Entry {
    route: Route,
    scope: ScreenScope,
}

/// The screen stack. Never empty.
pub struct Navigator {
    stack: Vec<Entry>,
}

impl Navigator {
    pub fn new(root: Route) -> Self {
        Self {
            stack: vec![Entry {
                route: root,
                scope: ScreenScope::new(),
            }],
        }
    }

    pub fn current(&self) -> Route {
        self.top().route
    }

    /// A handle on the current screen's scope.
    pub fn current_scope(&self) -> ScreenScope {
        self.top().scope.clone()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.stack.iter().map(|e| e.route).collect()
    }

    pub fn push(&mut self, route: Route) {
        tracing::debug!("navigate: push {:?}", route);
        self.stack.push(Entry {
            route,
            scope: ScreenScope::new(),
        });
    }

    /// Pop the current screen. The root is never popped; returns whether anything changed.
    pub fn pop(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        if let Some(entry) = self.stack.pop() {
            tracing::debug!("navigate: pop {:?}", entry.route);
            entry.scope.close();
        }
        true
    }

    pub fn navigate(&mut self, route: Route) {
        match self.stack.iter().rposition(|e| e.route == route) {
            Some(index) => {
                while self.stack.len() > index + 1 {
                    self.pop();
                }
                // The revisited screen starts over with a fresh scope.
                let entry = &mut self.stack[index];
                entry.scope.close();
                entry.scope = ScreenScope::new();
            }
            None => self.push(route),
        }
    }

    pub fn reset_to(&mut self, route: Route) {
        tracing::debug!("navigate: reset to {:?}", route);
        for entry in self.stack.drain(..) {
            entry.scope.close();
        }
        self.stack.push(Entry {
            route,
            scope: ScreenScope::new(),
        });
    }

    pub fn apply(&mut self, nav: Nav) {
        match nav {
            Nav::Navigate(route) => self.navigate(route),
            Nav::ResetTo(route) => self.reset_to(route),
            Nav::Back => {
                self.pop();
            }
        }
    }

    fn top(&self) -> &Entry {
        // The stack always holds at least the root entry.
        &self.stack[self.stack.len() - 1]
    }
}
