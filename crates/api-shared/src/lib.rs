//! # API Shared
//!
//! Shared definitions for talking to the clinic backend.
//!
//! Contains:
//! - Wire DTOs mirrored from server responses (`models` module)
//! - Request path builders (`paths` module)
//! - The [`ClinicApi`] trait implemented by transports, and [`ApiError`]
//!
//! Used by `api-client` (the HTTP transport) and `clinic-core` (screens and workflows).

pub mod api;
pub mod error;
pub mod models;
pub mod paths;

pub use api::ClinicApi;
pub use error::{extract_server_message, ApiError, ApiResult};
pub use models::*;
