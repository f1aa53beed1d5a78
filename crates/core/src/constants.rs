//! Constants used throughout the clinic core crate.
//!
//! Defaults and names are kept here so both binaries resolve configuration the same way.

/// Default API base, including the versioned path prefix.
pub const DEFAULT_API_BASE_URL: &str = "http://192.168.1.130:8080/api/v1";

/// Default directory for local client state when no explicit directory is configured.
pub const DEFAULT_DATA_DIR: &str = ".clinic";

/// Filename of the persisted session inside the data directory.
pub const SESSION_FILENAME: &str = "session.json";

/// Environment variable overriding [`DEFAULT_API_BASE_URL`].
pub const ENV_API_BASE_URL: &str = "CLINIC_API_BASE_URL";

/// Environment variable overriding [`DEFAULT_DATA_DIR`].
pub const ENV_DATA_DIR: &str = "CLINIC_DATA_DIR";

/// Clinic name shown in the footer of every screen.
pub const BRAND_NAME: &str = "SANTA FABGHICILIA";
