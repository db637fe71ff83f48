//! Lifecycle error taxonomy.

use oktaasa_api::ApiError;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LifecycleError>;

/// Errors surfaced by lifecycle operations.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The project does not exist on the remote service (true HTTP 404).
    #[error("Project not found: {name}")]
    NotFound {
        /// The project name that was requested.
        name: String,
    },

    /// The service rejected the request (validation error or name
    /// conflict). Carries the service-provided detail verbatim.
    #[error("Remote service rejected the request (status {status}): {detail}")]
    RemoteRejected {
        /// HTTP status returned by the service.
        status: u16,
        /// Response body, unmodified.
        detail: String,
    },

    /// Network, timeout, auth, or server-side failure. Never retried by
    /// the core.
    #[error("Transport failure: {detail}")]
    Transport {
        /// Description of the failure.
        detail: String,
    },

    /// Update was invoked with a changed project name. The name is
    /// immutable; the caller must destroy and recreate instead.
    #[error("Project name is immutable: stored \"{stored}\", declared \"{desired}\"")]
    ImmutableFieldChanged {
        /// Name in stored state.
        stored: String,
        /// Name in the declaration.
        desired: String,
    },

    /// The object was still present and not soft-deleted when deletion
    /// was verified. Transient; callers may retry with backoff.
    #[error("Deletion of project {name} not yet effective")]
    DeleteNotConfirmed {
        /// The project name being deleted.
        name: String,
    },

    /// The remote service returned a body that violates the wire
    /// contract. Not retryable.
    #[error("Malformed response from remote service: {detail}")]
    MalformedResponse {
        /// What failed to decode.
        detail: String,
    },
}

impl LifecycleError {
    /// Creates a new `NotFound` error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Creates a new `RemoteRejected` error.
    pub fn remote_rejected(status: u16, detail: impl Into<String>) -> Self {
        Self::RemoteRejected {
            status,
            detail: detail.into(),
        }
    }

    /// Creates a new `Transport` error.
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport {
            detail: detail.into(),
        }
    }

    /// Creates a new `MalformedResponse` error.
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            detail: detail.into(),
        }
    }

    /// Whether the caller may reasonably retry the operation.
    ///
    /// Only [`LifecycleError::DeleteNotConfirmed`] qualifies; transport
    /// failures are surfaced for the caller to decide, and a malformed
    /// response will not be fixed by retrying.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::DeleteNotConfirmed { .. })
    }
}

impl From<ApiError> for LifecycleError {
    fn from(err: ApiError) -> Self {
        Self::Transport {
            detail: err.to_string(),
        }
    }
}
