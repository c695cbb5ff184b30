//! Backend session verification.
//!
//! The backend is the single source of truth for session liveness: the guard
//! never decides on its own that a token has expired. [`SessionVerifier`] is
//! the seam; [`HttpSessionVerifier`] (feature `http`) is the real client.

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::HttpSessionVerifier;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::token::SessionToken;

/// The backend's answer to a session check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCheck {
    /// Whether the session is still live
    pub valid: bool,
    /// Optional human-readable explanation
    pub message: Option<String>,
}

impl SessionCheck {
    /// A live session.
    pub fn valid() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    /// A rejected session with the backend's reason.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

/// JSON body returned by the session-check endpoint.
///
/// Only `success` is relied on; other fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCheckResponse {
    /// Whether the backend accepts the token
    pub success: bool,
    /// Optional reason, shown to the user on rejection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<SessionCheckResponse> for SessionCheck {
    fn from(resp: SessionCheckResponse) -> Self {
        Self {
            valid: resp.success,
            message: resp.message,
        }
    }
}

/// Failure of the verification call itself, as opposed to an explicit
/// rejection by the backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Connection, DNS or timeout failure
    #[error("network error: {0}")]
    Network(String),
    /// Non-success status without a usable body
    #[error("unexpected status {0}")]
    Status(u16),
    /// Success status but the body is not a session-check response
    #[error("cannot decode session-check response: {0}")]
    Decode(String),
}

/// Confirms with the backend that a token is still valid.
///
/// Runs on the UI event loop, so implementations need not be `Send`.
#[async_trait(?Send)]
pub trait SessionVerifier {
    /// Checks the token.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` when the backend could not be asked at all.
    /// An explicit rejection is `Ok(SessionCheck { valid: false, .. })`.
    async fn verify(&self, token: &SessionToken) -> Result<SessionCheck, TransportError>;
}
