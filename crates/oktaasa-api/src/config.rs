//! Client configuration and credential loading.
//!
//! All credential state is held in explicit values passed to the client
//! constructor; there is no process-wide singleton.

use std::time::Duration;

use serde::Serialize;
use url::Url;

use crate::error::ApiError;

/// Base URL of the hosted ASA API.
pub const DEFAULT_BASE_URL: &str = "https://app.scaleft.com/v1";

const ENV_BASE_URL: &str = "OKTAASA_API_URL";
const ENV_TEAM: &str = "OKTAASA_TEAM";
const ENV_TOKEN: &str = "OKTAASA_TOKEN";
const ENV_KEY_ID: &str = "OKTAASA_KEY";
const ENV_KEY_SECRET: &str = "OKTAASA_KEY_SECRET";

/// Configuration for [`crate::AsaClient`].
///
/// Identifies the team whose resources are managed and carries the
/// bearer token used on every request.
#[derive(Debug, Clone)]
pub struct AsaConfig {
    /// Base URL of the API, e.g. `https://app.scaleft.com/v1`.
    pub base_url: Url,
    /// Team name; appears as the first path segment of every resource URL.
    pub team: String,
    /// Bearer token sent in the `Authorization` header.
    pub token: String,
    /// Per-request timeout (default: 30 seconds).
    pub request_timeout: Duration,
}

impl AsaConfig {
    /// Creates a configuration with the default request timeout.
    #[must_use]
    pub fn new(base_url: Url, team: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url,
            team: team.into(),
            token: token.into(),
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Builds a configuration from `OKTAASA_API_URL`, `OKTAASA_TEAM`,
    /// and `OKTAASA_TOKEN`.
    ///
    /// `OKTAASA_API_URL` falls back to [`DEFAULT_BASE_URL`] when unset.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingEnv`] when the team or token variable
    /// is absent, or [`ApiError::InvalidBaseUrl`] when the URL does not
    /// parse.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let base_url = lookup(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&base_url)?;
        let team = lookup(ENV_TEAM).ok_or(ApiError::MissingEnv(ENV_TEAM))?;
        let token = lookup(ENV_TOKEN).ok_or(ApiError::MissingEnv(ENV_TOKEN))?;
        Ok(Self::new(base_url, team, token))
    }
}

/// API key credentials for the service-token exchange.
///
/// Serializes directly as the body of the `POST .../service_token`
/// request.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    /// API key identifier.
    pub key_id: String,
    /// API key secret.
    pub key_secret: String,
}

impl Credentials {
    /// Creates credentials from a key id and secret.
    #[must_use]
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: key_secret.into(),
        }
    }

    /// Loads credentials from `OKTAASA_KEY` and `OKTAASA_KEY_SECRET`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingEnv`] when either variable is absent.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let key_id = lookup(ENV_KEY_ID).ok_or(ApiError::MissingEnv(ENV_KEY_ID))?;
        let key_secret = lookup(ENV_KEY_SECRET).ok_or(ApiError::MissingEnv(ENV_KEY_SECRET))?;
        Ok(Self::new(key_id, key_secret))
    }
}
