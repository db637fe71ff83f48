//! Transport error types for the ASA API client.

use thiserror::Error;

/// Errors raised by the transport layer.
///
/// These cover connectivity, configuration, and authentication problems
/// only. Non-success HTTP statuses on resource operations are *not*
/// errors at this layer; they are returned to the caller inside
/// [`crate::ApiResponse`] for domain-level classification.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured base URL could not be parsed.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// The HTTP request could not be completed (connect failure,
    /// timeout, TLS error, or body read failure).
    #[error("Request to {url} failed: {source}")]
    Request {
        /// The URL that was being requested.
        url: String,
        /// The underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The service-token exchange was rejected by the service.
    #[error("Authentication rejected: status {status}")]
    AuthRejected {
        /// HTTP status returned by the token endpoint.
        status: u16,
        /// Response body returned by the token endpoint.
        detail: String,
    },

    /// The service-token response did not contain a usable bearer token.
    #[error("Malformed authentication response: {0}")]
    MalformedAuthResponse(String),

    /// A request body failed to serialize.
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// A required environment variable is not set.
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),
}

impl ApiError {
    /// Creates a new `Request` error.
    pub fn request(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Request {
            url: url.into(),
            source,
        }
    }

    /// Creates a new `AuthRejected` error.
    pub fn auth_rejected(status: u16, detail: impl Into<String>) -> Self {
        Self::AuthRejected {
            status,
            detail: detail.into(),
        }
    }
}
