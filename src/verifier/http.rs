use async_trait::async_trait;
use reqwest::StatusCode;

use super::{SessionCheck, SessionCheckResponse, SessionVerifier, TransportError};
use crate::config::GuardConfig;
use crate::token::SessionToken;

/// [`SessionVerifier`] that POSTs to the backend's session-check endpoint.
///
/// The request carries `Authorization: Bearer <token>` and an empty JSON
/// object as body. Any response whose body decodes as
/// [`SessionCheckResponse`] is interpreted by its `success` flag, whatever
/// the status code (backends commonly answer `401 {"success":false,...}`).
#[derive(Debug, Clone)]
pub struct HttpSessionVerifier {
    client: reqwest::Client,
    url: String,
}

impl HttpSessionVerifier {
    /// Creates a verifier for the given endpoint URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    /// Creates a verifier reusing an existing client.
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Creates a verifier for the configured `sessionCheckUrl`, or `None`
    /// when the configuration has none.
    pub fn from_config(config: &GuardConfig) -> Option<Self> {
        config
            .session_check_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .map(Self::new)
    }

    /// Endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    fn request(&self, token: &SessionToken) -> Result<reqwest::Request, TransportError> {
        self.client
            .post(&self.url)
            .bearer_auth(token.expose_secret())
            .json(&serde_json::json!({}))
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))
    }
}

/// Maps a session-check response to a check result.
///
/// A body that decodes wins over the status code. Otherwise a success status
/// is a decode failure and anything else is a status failure.
fn interpret(status: StatusCode, body: &[u8]) -> Result<SessionCheck, TransportError> {
    match serde_json::from_slice::<SessionCheckResponse>(body) {
        Ok(check) => Ok(check.into()),
        Err(e) if status.is_success() => Err(TransportError::Decode(e.to_string())),
        Err(_) => Err(TransportError::Status(status.as_u16())),
    }
}

#[async_trait(?Send)]
impl SessionVerifier for HttpSessionVerifier {
    async fn verify(&self, token: &SessionToken) -> Result<SessionCheck, TransportError> {
        let request = self.request(token)?;
        let resp = self
            .client
            .execute(request)
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        interpret(status, &body)
    }
}
