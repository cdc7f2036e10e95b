//! Error types for the brightcharge libraries.
//!
//! A single flat enum covers every failure mode so callers branch on the
//! variant rather than matching message text. Upstream rejections carry one
//! normalized human-readable message regardless of which endpoint produced
//! them.

use thiserror::Error;

/// The unified error type for brightcharge operations.
#[derive(Debug, Error)]
pub enum Error {
    /// An authenticated call was made with no session established.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// A token refresh was requested with no refresh token available.
    #[error("no refresh token")]
    NoRefreshToken,

    /// The upstream service answered with a non-2xx status.
    ///
    /// The display string is the normalized message alone; the HTTP status
    /// is available on the variant for callers that need it.
    #[error("{message}")]
    UpstreamRejected { status: u16, message: String },

    /// The request went out but no response came back.
    #[error("no response received from server")]
    NoResponse,

    /// The request could not be sent, or the response body could not be read.
    #[error("transport error: {0}")]
    Transport(String),

    /// Input validation errors (URLs, ids, configuration values).
    #[error("invalid input '{value}': {reason}")]
    InvalidInput { value: String, reason: String },
}

impl Error {
    /// Build an [`Error::UpstreamRejected`] from a non-2xx response body.
    ///
    /// Message priority: a JSON string body is used verbatim; a JSON object
    /// uses `error_description`, then `message`, then the serialized body;
    /// any other non-empty body is used verbatim.
    pub fn from_error_body(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<serde_json::Value>(body) {
            Ok(serde_json::Value::String(s)) => s,
            Ok(serde_json::Value::Object(fields)) => fields
                .get("error_description")
                .and_then(|v| v.as_str())
                .or_else(|| fields.get("message").and_then(|v| v.as_str()))
                .map(str::to_string)
                .unwrap_or_else(|| body.to_string()),
            Ok(_) => body.to_string(),
            Err(_) if !body.trim().is_empty() => body.to_string(),
            Err(_) => format!("HTTP {status}"),
        };

        Error::UpstreamRejected { status, message }
    }

    /// Returns true when the failure means the caller must (re-)authenticate.
    pub fn is_auth(&self) -> bool {
        matches!(self, Error::NotAuthenticated | Error::NoRefreshToken)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() || err.is_decode() {
            // The request never left, or the response body was unreadable.
            Error::Transport(err.to_string())
        } else if err.is_connect() || err.is_timeout() || err.is_request() {
            Error::NoResponse
        } else {
            Error::Transport(err.to_string())
        }
    }
}
