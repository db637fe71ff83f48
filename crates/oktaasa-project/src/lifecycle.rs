//! Project lifecycle state machine.
//!
//! [`ProjectLifecycle`] drives one project through create, read,
//! update, delete, and import against the remote service. The caller
//! (the surrounding declarative engine) invokes operations one at a
//! time; the controller holds no mutable state of its own and returns
//! immutable [`Project`] snapshots.

use std::time::Duration;

use oktaasa_api::{ApiResponse, AsaClient};

use crate::error::{LifecycleError, Result};
use crate::model::{Project, ProjectSpec};
use crate::reconcile::{Plan, plan};
use crate::soft_delete::is_soft_deleted;

/// How to confirm that a delete actually took effect.
///
/// The service removes projects asynchronously, so the verification
/// read after a DELETE may briefly still see the object live. Each
/// attempt is one GET; attempts after the first wait `backoff` first.
#[derive(Debug, Clone)]
pub struct DeleteVerification {
    /// Verification reads to attempt before giving up (minimum 1).
    pub attempts: u32,
    /// Pause between attempts.
    pub backoff: Duration,
}

impl Default for DeleteVerification {
    fn default() -> Self {
        Self {
            attempts: 1,
            backoff: Duration::ZERO,
        }
    }
}

/// Lifecycle controller for a single project resource.
pub struct ProjectLifecycle {
    client: AsaClient,
    verification: DeleteVerification,
}

impl ProjectLifecycle {
    /// Creates a controller with default delete verification (a single
    /// read, no retries).
    #[must_use]
    pub fn new(client: AsaClient) -> Self {
        Self {
            client,
            verification: DeleteVerification::default(),
        }
    }

    /// Overrides the delete verification policy.
    #[must_use]
    pub fn with_delete_verification(mut self, verification: DeleteVerification) -> Self {
        self.verification = verification;
        self
    }

    /// Creates the project and returns the server's view of it.
    ///
    /// Only explicitly declared attributes are sent; the service
    /// assigns everything else. The immediate read-back captures those
    /// server-assigned values (uid/gid in particular) so the caller's
    /// stored state starts out accurate.
    ///
    /// # Errors
    ///
    /// [`LifecycleError::RemoteRejected`] on a name conflict or
    /// validation failure, [`LifecycleError::Transport`] on
    /// network/auth failure.
    pub async fn create(&self, desired: &ProjectSpec) -> Result<Project> {
        tracing::debug!(name = %desired.name, "creating project");
        let response = self.client.create_project(desired).await?;
        if !response.is_success() {
            return Err(classify(&desired.name, &response));
        }

        match self.read(&desired.name).await? {
            Some(project) => Ok(project),
            None => Err(LifecycleError::not_found(&desired.name)),
        }
    }

    /// Fetches current remote state.
    ///
    /// Returns `Ok(None)` when the object exists but is soft-deleted;
    /// the caller should drop the resource from tracking exactly as it
    /// would for a hard 404.
    ///
    /// # Errors
    ///
    /// [`LifecycleError::NotFound`] on a true HTTP 404,
    /// [`LifecycleError::MalformedResponse`] when the body violates the
    /// wire contract, [`LifecycleError::Transport`] otherwise.
    pub async fn read(&self, name: &str) -> Result<Option<Project>> {
        let response = self.client.get_project(name).await?;
        if !response.is_success() {
            return Err(classify(name, &response));
        }

        let project = decode_project(&response.body)?;
        if project.deleted {
            tracing::debug!(name, "project is soft-deleted, reporting absence");
            return Ok(None);
        }
        Ok(Some(project))
    }

    /// Converges remote state to the declaration.
    ///
    /// Delegates to the reconciler for the change-set. An empty
    /// change-set issues no PUT but still refreshes from a fresh read,
    /// so repeated updates with an unchanged declaration are idempotent.
    ///
    /// # Errors
    ///
    /// [`LifecycleError::ImmutableFieldChanged`] when the declared name
    /// differs from the stored one; no request is issued in that case.
    pub async fn update(&self, stored: &Project, desired: &ProjectSpec) -> Result<Project> {
        let changes = match plan(stored, desired) {
            Plan::RequiresReplacement { stored, desired } => {
                return Err(LifecycleError::ImmutableFieldChanged { stored, desired });
            }
            Plan::Update(changes) => changes,
        };

        if changes.is_empty() {
            tracing::debug!(name = %stored.name, "declaration matches remote state, refreshing only");
        } else {
            tracing::debug!(name = %stored.name, ?changes, "applying change-set");
            let response = self.client.update_project(&stored.name, &changes).await?;
            if !response.is_success() {
                return Err(classify(&stored.name, &response));
            }
        }

        match self.read(&stored.name).await? {
            Some(project) => Ok(project),
            None => Err(LifecycleError::not_found(&stored.name)),
        }
    }

    /// Deletes the project and verifies the deletion took effect.
    ///
    /// The DELETE status alone is not trusted: the object counts as
    /// gone only when a verification read answers 404 or reports the
    /// soft-delete marker. A 404 from the DELETE itself is fine (the
    /// object was already gone).
    ///
    /// # Errors
    ///
    /// [`LifecycleError::DeleteNotConfirmed`] when the object is still
    /// live after the configured verification attempts; callers may
    /// retry. [`LifecycleError::MalformedResponse`] when a verification
    /// body lacks a usable deletion marker.
    pub async fn delete(&self, name: &str) -> Result<()> {
        tracing::debug!(name, "deleting project");
        let response = self.client.delete_project(name).await?;
        if !response.is_success() && response.status != 404 {
            return Err(classify(name, &response));
        }

        let attempts = self.verification.attempts.max(1);
        for attempt in 0..attempts {
            if attempt > 0 && !self.verification.backoff.is_zero() {
                tokio::time::sleep(self.verification.backoff).await;
            }

            let check = self.client.get_project(name).await?;
            if check.status == 404 {
                return Ok(());
            }
            if !check.is_success() {
                return Err(classify(name, &check));
            }
            if is_soft_deleted(&check.body)? {
                return Ok(());
            }
            tracing::debug!(name, attempt, "project still live after delete");
        }

        Err(LifecycleError::DeleteNotConfirmed {
            name: name.to_string(),
        })
    }

    /// Adopts an existing remote project, establishing stored state
    /// purely from remote data.
    ///
    /// # Errors
    ///
    /// [`LifecycleError::NotFound`] when the project does not exist or
    /// is soft-deleted; a soft-deleted project cannot be imported.
    pub async fn import(&self, name: &str) -> Result<Project> {
        match self.read(name).await? {
            Some(project) => Ok(project),
            None => Err(LifecycleError::not_found(name)),
        }
    }
}

/// Maps a non-success response to the lifecycle taxonomy.
///
/// Validation and conflict statuses become `RemoteRejected` with the
/// body carried verbatim; 404 is `NotFound`; everything else, auth
/// failures and server errors included, is transport-class.
fn classify(name: &str, response: &ApiResponse) -> LifecycleError {
    match response.status {
        404 => LifecycleError::not_found(name),
        400 | 409 | 412 | 422 => {
            tracing::warn!(name, status = response.status, "remote service rejected request");
            LifecycleError::remote_rejected(response.status, &response.body)
        }
        status => LifecycleError::transport(format!(
            "unexpected status {status} for project {name}: {}",
            response.body
        )),
    }
}

fn decode_project(body: &str) -> Result<Project> {
    serde_json::from_str(body)
        .map_err(|e| LifecycleError::malformed(format!("project body failed to decode: {e}")))
}
