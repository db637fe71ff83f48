//! Bearer-token HTTP transport for the Okta ASA team API.
//!
//! This crate is deliberately dumb: it knows how to address project
//! resources under `/teams/{team}/projects/{name}`, how to authenticate
//! (stored bearer token or service-token exchange), and nothing about
//! what the payloads mean. Classification of statuses and bodies
//! belongs to the reconciliation core in `oktaasa-project`.

pub mod client;
pub mod config;
pub mod error;

pub use client::{ApiResponse, AsaClient};
pub use config::{AsaConfig, Credentials, DEFAULT_BASE_URL};
pub use error::ApiError;
