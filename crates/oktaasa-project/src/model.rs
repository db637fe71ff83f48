//! Typed project model: the remote wire schema and the declared
//! (desired) configuration.
//!
//! The two shapes are deliberately distinct. [`Project`] is what the
//! service returns: every attribute has a concrete value, because the
//! service materializes defaults. [`ProjectSpec`] is what a declaration
//! provides: every attribute except the name is optional, and "unset"
//! is a real state the reconciler must preserve, not a zero value.

use serde::{Deserialize, Serialize};

/// A project as reported by the remote service.
///
/// `name`, `next_unix_uid`, `next_unix_gid`, and `deleted` are required
/// by the wire contract; a body missing any of them fails to decode and
/// is surfaced as a malformed response. Policy booleans default to
/// `false` when the service omits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique name within the team; doubles as the resource ID.
    pub name: String,
    /// Next POSIX uid the service will allocate for server accounts.
    pub next_unix_uid: i64,
    /// Next POSIX gid the service will allocate for server accounts.
    pub next_unix_gid: i64,
    #[serde(default)]
    pub create_server_users: bool,
    #[serde(default)]
    pub force_shared_ssh_users: bool,
    #[serde(default)]
    pub forward_traffic: bool,
    #[serde(default)]
    pub rdp_session_recording: bool,
    #[serde(default)]
    pub require_preauthorization: bool,
    #[serde(default)]
    pub ssh_session_recording: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_admin_user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_standard_user_name: Option<String>,
    /// Soft-delete marker. A project with `deleted: true` still answers
    /// GET with 200 but is considered absent.
    pub deleted: bool,
}

impl Project {
    /// Whether the project counts as present: it must exist *and* not
    /// be soft-deleted.
    #[must_use]
    pub fn is_present(&self) -> bool {
        !self.deleted
    }

    /// A declaration that pins every attribute to this project's
    /// current remote values. Updating with it is a no-op.
    #[must_use]
    pub fn as_spec(&self) -> ProjectSpec {
        ProjectSpec {
            name: self.name.clone(),
            next_unix_uid: Some(self.next_unix_uid),
            next_unix_gid: Some(self.next_unix_gid),
            create_server_users: Some(self.create_server_users),
            force_shared_ssh_users: Some(self.force_shared_ssh_users),
            forward_traffic: Some(self.forward_traffic),
            rdp_session_recording: Some(self.rdp_session_recording),
            require_preauthorization: Some(self.require_preauthorization),
            ssh_session_recording: Some(self.ssh_session_recording),
            shared_admin_user_name: self.shared_admin_user_name.clone(),
            shared_standard_user_name: self.shared_standard_user_name.clone(),
        }
    }
}

/// The declared configuration of a project.
///
/// `None` means "not declared": the service keeps or assigns its own
/// value, and the reconciler never sends or compares the attribute.
/// `Some(0)` for uid/gid is an explicit value like any other, distinct
/// from unset.
///
/// Serializes as the POST body for creation; unset attributes are
/// omitted from the wire entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectSpec {
    /// Project name. Required and immutable after creation.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_unix_uid: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_unix_gid: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_server_users: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_shared_ssh_users: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward_traffic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rdp_session_recording: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_preauthorization: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_session_recording: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_admin_user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_standard_user_name: Option<String>,
}

impl ProjectSpec {
    /// Creates a declaration with only the name set.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_next_unix_uid(mut self, uid: i64) -> Self {
        self.next_unix_uid = Some(uid);
        self
    }

    #[must_use]
    pub fn with_next_unix_gid(mut self, gid: i64) -> Self {
        self.next_unix_gid = Some(gid);
        self
    }

    #[must_use]
    pub fn with_create_server_users(mut self, enabled: bool) -> Self {
        self.create_server_users = Some(enabled);
        self
    }

    #[must_use]
    pub fn with_force_shared_ssh_users(mut self, enabled: bool) -> Self {
        self.force_shared_ssh_users = Some(enabled);
        self
    }

    #[must_use]
    pub fn with_forward_traffic(mut self, enabled: bool) -> Self {
        self.forward_traffic = Some(enabled);
        self
    }

    #[must_use]
    pub fn with_rdp_session_recording(mut self, enabled: bool) -> Self {
        self.rdp_session_recording = Some(enabled);
        self
    }

    #[must_use]
    pub fn with_require_preauthorization(mut self, enabled: bool) -> Self {
        self.require_preauthorization = Some(enabled);
        self
    }

    #[must_use]
    pub fn with_ssh_session_recording(mut self, enabled: bool) -> Self {
        self.ssh_session_recording = Some(enabled);
        self
    }

    #[must_use]
    pub fn with_shared_admin_user_name(mut self, name: impl Into<String>) -> Self {
        self.shared_admin_user_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_shared_standard_user_name(mut self, name: impl Into<String>) -> Self {
        self.shared_standard_user_name = Some(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn spec_serialization_omits_unset_attributes() {
        let spec = ProjectSpec::new("web").with_next_unix_uid(60120);
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value, json!({"name": "web", "next_unix_uid": 60120}));
    }

    #[test]
    fn spec_preserves_explicit_zero() {
        let spec = ProjectSpec::new("web").with_next_unix_uid(0);
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value, json!({"name": "web", "next_unix_uid": 0}));
    }

    #[test]
    fn project_decodes_with_policy_defaults() {
        let project: Project = serde_json::from_value(json!({
            "name": "web",
            "next_unix_uid": 60120,
            "next_unix_gid": 63020,
            "deleted": false
        }))
        .unwrap();
        assert_eq!(project.name, "web");
        assert!(!project.create_server_users);
        assert!(project.shared_admin_user_name.is_none());
        assert!(project.is_present());
    }

    #[test]
    fn project_requires_deletion_marker() {
        let result: std::result::Result<Project, _> = serde_json::from_value(json!({
            "name": "web",
            "next_unix_uid": 60120,
            "next_unix_gid": 63020
        }));
        assert!(result.is_err());
    }

    #[test]
    fn as_spec_round_trips_to_empty_diff_inputs() {
        let project = Project {
            name: "web".into(),
            next_unix_uid: 60120,
            next_unix_gid: 63020,
            create_server_users: true,
            force_shared_ssh_users: false,
            forward_traffic: false,
            rdp_session_recording: true,
            require_preauthorization: false,
            ssh_session_recording: true,
            shared_admin_user_name: Some("sauser".into()),
            shared_standard_user_name: None,
            deleted: false,
        };
        let spec = project.as_spec();
        assert_eq!(spec.name, "web");
        assert_eq!(spec.next_unix_uid, Some(60120));
        assert_eq!(spec.shared_admin_user_name.as_deref(), Some("sauser"));
        assert_eq!(spec.shared_standard_user_name, None);
    }
}
