//! Errors surfaced by gateway calls.

use http::StatusCode;

/// Everything a call through the gateway can fail with.
///
/// Login failures are not represented here; `login` reports them as a
/// [`LoginResult`](crate::models::LoginResult) so the UI can render them inline.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The backend answered 401. The session has already been cleared and a
    /// redirect to the login view requested; the response body was not read.
    #[error("Session expired")]
    SessionExpired,

    /// Any other non-success response.
    #[error("{message}")]
    Api { message: String, status: StatusCode },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl GatewayError {
    /// The HTTP status behind this error, when the backend sent one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::SessionExpired => Some(StatusCode::UNAUTHORIZED),
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
            Self::Decode(_) | Self::InvalidRequest(_) => None,
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }
}
