//! Error types for the valuation client.
//!
//! Every failure while valuing a single subscription collapses into
//! [`FetchError`]. Callers treat it as a per-subscription outcome, never as a
//! reason to stop the run, so no variant carries retry hints.

use thiserror::Error;

/// Errors that can occur while fetching the value of one subscription.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request could not be built from the given parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The provider could not be reached or the connection dropped.
    #[error("Network error: {provider} - {message}")]
    Network {
        /// The provider that was being called
        provider: String,
        /// The transport error message
        message: String,
    },

    /// The request timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider answered with a non-success HTTP status.
    #[error("HTTP {status} from {provider}")]
    HttpStatus {
        /// The provider that answered
        provider: String,
        /// The HTTP status code
        status: u16,
    },

    /// The payload could not be decoded or did not carry a usable value.
    #[error("Malformed response from {provider}: {message}")]
    MalformedResponse {
        /// The provider that answered
        provider: String,
        /// What was wrong with the payload
        message: String,
    },
}

impl FetchError {
    /// Maps a transport-level `reqwest` error into a [`FetchError`].
    pub fn from_transport(provider: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                provider: provider.to_string(),
            }
        } else {
            Self::Network {
                provider: provider.to_string(),
                message: error.to_string(),
            }
        }
    }

    pub(crate) fn malformed(provider: &str, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            provider: provider.to_string(),
            message: message.into(),
        }
    }
}
