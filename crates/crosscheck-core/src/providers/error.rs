use thiserror::Error;

use crate::config::Credential;

/// Errors a single provider call can end in.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// A required credential is absent. Raised before any network call.
    #[error("{credential} is not configured.")]
    Configuration { credential: Credential },

    /// The provider answered with a non-success status.
    #[error("{provider} request failed.")]
    Request { provider: &'static str, status: u16 },

    /// The request never produced a response (connect, DNS, body read).
    #[error("{provider} request failed: {message}")]
    Network {
        provider: &'static str,
        message: String,
    },
}

impl ProviderError {
    pub fn missing(credential: Credential) -> Self {
        ProviderError::Configuration { credential }
    }

    /// Wraps a transport error. The request URL is dropped since it can
    /// carry an API key in its query string.
    pub fn network(provider: &'static str, err: reqwest::Error) -> Self {
        ProviderError::Network {
            provider,
            message: err.without_url().to_string(),
        }
    }

    /// HTTP status of a `Request` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}
