//! Session persistence.
//!
//! The only durable client state is the logged-in patient's id. It lives behind the
//! [`SessionStore`] trait and is handed to screens through an explicit [`SessionContext`]:
//!
//! - **init**: [`SessionContext::load`] reads the store once at startup.
//! - **establish**: login and registration call [`SessionContext::establish`].
//! - **teardown**: logout calls [`SessionContext::logout`], clearing cache and store.
//!
//! ## Storage Layout
//!
//! [`FileSessionStore`] keeps a single JSON document:
//!
//! ```text
//! <data_dir>/
//!   session.json    # { "user_id": "7" }
//! ```

use crate::{ClinicError, ClinicResult};
use api_shared::PatientId;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persists one user identifier.
pub trait SessionStore: Send {
    /// Persist `id`, replacing any previous value.
    fn set(&mut self, id: &str) -> ClinicResult<()>;

    /// The last persisted identifier, or `None`.
    fn get(&self) -> ClinicResult<Option<String>>;

    /// Remove the identifier. Clearing an empty store succeeds.
    fn clear(&mut self) -> ClinicResult<()>;
}

#[derive(Serialize, Deserialize)]
struct StoredSession {
    user_id: String,
}

/// File-backed [`SessionStore`] surviving process restarts.
#[derive(Clone, Debug)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn set(&mut self, id: &str) -> ClinicResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(ClinicError::SessionWrite)?;
            }
        }

        let json = serde_json::to_string(&StoredSession {
            user_id: id.to_string(),
        })
        .map_err(ClinicError::SessionSerialization)?;
        fs::write(&self.path, json).map_err(ClinicError::SessionWrite)
    }

    fn get(&self) -> ClinicResult<Option<String>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ClinicError::SessionRead(e)),
        };

        let stored: StoredSession =
            serde_json::from_str(&contents).map_err(ClinicError::SessionDeserialization)?;
        Ok(Some(stored.user_id))
    }

    fn clear(&mut self) -> ClinicResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClinicError::SessionClear(e)),
        }
    }
}

/// Process-local [`SessionStore`]; nothing survives a restart.
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStore {
    user_id: Option<String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn set(&mut self, id: &str) -> ClinicResult<()> {
        self.user_id = Some(id.to_string());
        Ok(())
    }

    fn get(&self) -> ClinicResult<Option<String>> {
        Ok(self.user_id.clone())
    }

    fn clear(&mut self) -> ClinicResult<()> {
        self.user_id = None;
        Ok(())
    }
}

/// Who is logged in, injected into every screen that needs identity.
pub struct SessionContext {
    store: Box<dyn SessionStore>,
    patient_id: Option<PatientId>,
}

impl SessionContext {
    /// Load the persisted identifier from `store`.
    ///
    /// A blank or non-numeric stored value is treated as no session.
    pub fn load(store: Box<dyn SessionStore>) -> ClinicResult<Self> {
        let patient_id = match store.get()? {
            Some(raw) => match raw.trim().parse::<PatientId>() {
                Ok(id) => Some(id),
                Err(_) => {
                    if !raw.trim().is_empty() {
                        tracing::warn!("ignoring unreadable stored user id: {:?}", raw);
                    }
                    None
                }
            },
            None => None,
        };

        Ok(Self { store, patient_id })
    }

    pub fn patient_id(&self) -> Option<PatientId> {
        self.patient_id
    }

    pub fn is_logged_in(&self) -> bool {
        self.patient_id.is_some()
    }

    /// The logged-in patient, or [`ClinicError::MissingSession`].
    pub fn require(&self) -> ClinicResult<PatientId> {
        self.patient_id.ok_or(ClinicError::MissingSession)
    }

    /// Persist `id` as the logged-in patient.
    pub fn establish(&mut self, id: PatientId) -> ClinicResult<()> {
        self.store.set(&id.to_string())?;
        self.patient_id = Some(id);
        tracing::info!("session established for patient {}", id);
        Ok(())
    }

    /// Clear the store, then the cached id. A failed clear leaves the patient logged in.
    pub fn logout(&mut self) -> ClinicResult<()> {
        self.store.clear()?;
        self.patient_id = None;
        tracing::info!("session cleared");
        Ok(())
    }

    pub fn store(&self) -> &dyn SessionStore {
        self.store.as_ref()
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("patient_id", &self.patient_id)
            .finish_non_exhaustive()
    }
}
