//! Error types for the agent API client.
//!
//! # Design
//! Three failure kinds, matching where a round-trip can break: the request
//! never made it (or its response could not be read), the server answered
//! with a non-2xx status, or the body was not the JSON we expected. A 404 is
//! an ordinary `Api` error; `is_not_found` is there for callers that want to
//! branch on it.

use thiserror::Error;

/// Errors returned by `AgentApiClient` operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be built, encoded or sent, or the response body
    /// could not be read.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server returned a status outside 200..=299. `body` is the raw
    /// response text, untouched.
    #[error("API error: {body} (status code: {status})")]
    Api { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("decode error: {0}")]
    Decode(String),
}

impl ClientError {
    /// HTTP status of an `Api` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
