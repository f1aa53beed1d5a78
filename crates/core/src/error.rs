use api_shared::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum ClinicError {
    #[error("no patient is logged in")]
    MissingSession,
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("request abandoned because its screen was closed")]
    Cancelled,
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to read session file: {0}")]
    SessionRead(std::io::Error),
    #[error("failed to write session file: {0}")]
    SessionWrite(std::io::Error),
    #[error("failed to remove session file: {0}")]
    SessionClear(std::io::Error),
    #[error("failed to serialize session: {0}")]
    SessionSerialization(serde_json::Error),
    #[error("failed to deserialize session: {0}")]
    SessionDeserialization(serde_json::Error),
}

impl ClinicError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

pub type ClinicResult<T> = std::result::Result<T, ClinicError>;
