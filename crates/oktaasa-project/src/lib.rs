//! Reconciliation core for Okta ASA project resources.
//!
//! Given a declared [`ProjectSpec`] and the last-known remote
//! [`Project`], this crate converges the remote service to match the
//! declaration and reports true removal on teardown. The subtle part is
//! that "deleted" is not "HTTP 404" here: the service soft-deletes, so
//! a deleted project still answers GET with 200 and a marker flag, and
//! both drift detection and delete verification have to account for it.
//!
//! Structure:
//!
//! - [`model`] — typed wire schema and declared configuration
//! - [`reconcile`] — pure diff producing a minimal change-set
//! - [`soft_delete`] — deletion-marker interpretation
//! - [`lifecycle`] — the create/read/update/delete/import state machine
//! - [`error`] — the error taxonomy surfaced to callers

pub mod error;
pub mod lifecycle;
pub mod model;
pub mod reconcile;
pub mod soft_delete;

pub use error::{LifecycleError, Result};
pub use lifecycle::{DeleteVerification, ProjectLifecycle};
pub use model::{Project, ProjectSpec};
pub use reconcile::{ChangeSet, Plan, plan};
pub use soft_delete::is_soft_deleted;
