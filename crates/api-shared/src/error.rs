//! Errors surfaced by [`ClinicApi`](crate::ClinicApi) transports.

/// A failed API call.
///
/// Transports map every non-2xx status and every transport failure into one of these. Callers
/// show [`ApiError::user_message`] and keep their prior state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server responded with status {status}{}", suffix(.message))]
    Status { status: u16, message: Option<String> },
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

fn suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// The message the server supplied with an error status, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status {
                message: Some(m), ..
            } => Some(m.as_str()),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text for the user: the server message when present, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

/// Pull a human-readable message out of an error response body.
///
/// Looks for a JSON `message` then `error` string field; a non-JSON body is used verbatim
/// when it is non-empty and short enough to show.
pub fn extract_server_message(body: &str) -> Option<String> {
    const MAX_PLAIN_LEN: usize = 200;

    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => ["message", "error"]
            .iter()
            .filter_map(|key| value.get(key).and_then(|v| v.as_str()))
            .map(str::trim)
            .find(|m| !m.is_empty())
            .map(str::to_string),
        Err(_) if body.len() <= MAX_PLAIN_LEN && !body.starts_with('<') => Some(body.to_string()),
        Err(_) => None,
    }
}
