//! # Clinic Core
//!
//! Client-side logic for the clinic patient app:
//! - configuration and the persisted patient session
//! - validation of the login and registration forms
//! - slot derivation and the appointment booking workflow
//! - screen view models and the navigation stack they drive
//!
//! **No transport concerns**: HTTP lives in `api-client`; this crate only talks to the
//! [`ClinicApi`](api_shared::ClinicApi) trait.

pub mod appointments;
pub mod booking;
pub mod config;
pub mod constants;
pub mod error;
pub mod navigation;
pub mod scope;
pub mod screens;
pub mod session;
pub mod slots;
pub mod validation;

#[cfg(test)]
mod testing;

pub use booking::{BookingState, BookingWorkflow};
pub use config::CoreConfig;
pub use error::{ClinicError, ClinicResult};
pub use navigation::{Nav, Navigator, Route};
pub use scope::ScreenScope;
pub use screens::{LoadState, Notice, Outcome};
pub use session::{FileSessionStore, MemorySessionStore, SessionContext, SessionStore};
pub use slots::{derive_slots, Slot};
