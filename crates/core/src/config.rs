//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into the client. Screens never read environment variables themselves.

use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_DATA_DIR, SESSION_FILENAME};
use crate::{ClinicError, ClinicResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    api_base_url: String,
    data_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// The base URL must be absolute `http` or `https`; a trailing `/` is dropped.
    pub fn new(api_base_url: impl AsRef<str>, data_dir: PathBuf) -> ClinicResult<Self> {
        let api_base_url = api_base_url.as_ref().trim().trim_end_matches('/');

        let host = api_base_url
            .strip_prefix("http://")
            .or_else(|| api_base_url.strip_prefix("https://"))
            .ok_or_else(|| {
                ClinicError::Config(format!(
                    "API base URL must start with http:// or https:// (got {api_base_url:?})"
                ))
            })?;
        if host.is_empty() || host.starts_with('/') {
            return Err(ClinicError::Config("API base URL has no host".into()));
        }

        if data_dir.as_os_str().is_empty() {
            return Err(ClinicError::Config("data directory cannot be empty".into()));
        }

        Ok(Self {
            api_base_url: api_base_url.to_string(),
            data_dir,
        })
    }

    /// Build from optional raw values, typically `std::env::var(..).ok()`.
    ///
    /// Missing or blank values fall back to the defaults.
    pub fn from_env_values(
        api_base_url: Option<String>,
        data_dir: Option<String>,
    ) -> ClinicResult<Self> {
        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        let api_base_url =
            non_blank(api_base_url).unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let data_dir = non_blank(data_dir)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        Self::new(api_base_url, data_dir)
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn session_file(&self) -> PathBuf {
        self.data_dir.join(SESSION_FILENAME)
    }
}
