use parlo_auth::AuthError;
use thiserror::Error;

use crate::validate::ValidationError;

/// Failures surfaced by the synchronization core.
///
/// Three classes, kept deliberately distinct (they reach the UI through
/// different channels):
/// - [`ClientError::Rejected`] — client-side guard failure; the transport
///   was never touched and no collection flag changes.
/// - [`ClientError::Unauthorized`] — 401 anywhere; the session has already
///   been torn down by the time the caller sees this.
/// - everything else — transport/server failure, recorded on the owning
///   collection's `error` flag.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("session expired — sign in again")]
    Unauthorized,

    #[error("api error {status}: {}", .message.as_deref().unwrap_or("request failed"))]
    Api {
        status: u16,
        /// Server-supplied `message`, when the error body carried one.
        message: Option<String>,
    },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Rejected(#[from] ValidationError),
}

impl ClientError {
    /// The string a collection's `error` flag should carry for this failure:
    /// the server's message when present, else the operation's fallback.
    #[must_use]
    pub fn flag_message(&self, fallback: &str) -> String {
        match self {
            Self::Api {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}
