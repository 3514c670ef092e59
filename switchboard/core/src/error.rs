//! Request Errors
//!
//! The single error representation produced by the HTTP client wrapper.
//! Endpoint actions catch every variant uniformly; the variants exist so
//! tests and logs can tell the failure kinds apart.

use thiserror::Error;

/// Failure of one request made through [`ApiClient`](crate::http::ApiClient)
#[derive(Debug, Error)]
pub enum RequestError {
    /// Network unreachable, connection refused, body read failure, ...
    #[error("{0}")]
    Transport(String),

    /// A response arrived but its status is outside the success range
    #[error("{status} {status_text}{}", body_suffix(.body))]
    HttpStatus {
        /// Numeric status code
        status: u16,
        /// Reason phrase for the status
        status_text: String,
        /// Response body text (may be empty)
        body: String,
    },

    /// The success body was not valid JSON
    #[error("failed to parse response body as JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl RequestError {
    /// Short name of the failure kind, for logs
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::HttpStatus { .. } => "http_status",
            Self::Parse(_) => "parse",
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}
