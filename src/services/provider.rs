// src/services/provider.rs
//
// Shared contract for the remote responders. Failures are structured rather
// than smuggled through reply text: the orchestrator branches on the error
// variant, never on marker substrings in an answer.

use std::future::Future;

use thiserror::Error;

use super::session_manager::Message;
use crate::message::Reply;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider disabled: no API key configured")]
    Disabled,
    #[error("network error: {0}")]
    Network(String),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },
    #[error("malformed reply: {0}")]
    MalformedReply(String),
}

impl ProviderError {
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Network(format!("request timeout: {err}"))
        } else if err.is_connect() {
            ProviderError::Network(format!("connection failed: {err}"))
        } else {
            ProviderError::Network(format!("request failed: {err}"))
        }
    }
}

/// A remote reply source. Both providers implement the same contract; neither
/// knows whether it is primary or backup.
pub trait Responder {
    fn name(&self) -> &'static str;

    fn respond(
        &self,
        history: &[Message],
    ) -> impl Future<Output = Result<Reply, ProviderError>> + Send;
}

/// Parse a model's raw text output into a `Reply`. Models sometimes wrap the
/// JSON in ```json fences despite being told not to, so those are stripped
/// before parsing.
pub fn parse_reply(raw: &str) -> Result<Reply, ProviderError> {
    let cleaned = raw.replace("```json", "").replace("```", "");
    let cleaned = cleaned.trim();
    serde_json::from_str(cleaned)
        .map_err(|err| ProviderError::MalformedReply(format!("{err}; body was: {raw}")))
}
