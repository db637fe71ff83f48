//! Attribute reconciler: computes the minimal change-set that converges
//! remote state to a declaration.
//!
//! `plan` is a pure function. It never mutates its inputs, never
//! performs IO, and the same inputs always yield the same plan.

use serde::Serialize;

use crate::model::{Project, ProjectSpec};

/// The fields an update must send. Serializes as the PUT body; fields
/// not in the change-set are omitted from the wire so the service
/// leaves them untouched.
///
/// The project name is never part of a change-set. A name difference is
/// a replacement, not an update, and is surfaced through
/// [`Plan::RequiresReplacement`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSet {
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

impl ChangeSet {
    /// Whether the change-set carries no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Outcome of planning an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// The declared name differs from the stored name. The resource
    /// must be destroyed and recreated; no PUT may be issued.
    RequiresReplacement {
        /// Name in stored state.
        stored: String,
        /// Name in the declaration.
        desired: String,
    },
    /// Converge in place by sending the contained change-set (possibly
    /// empty, in which case the update is a no-op).
    Update(ChangeSet),
}

/// Diffs a declaration against the last-known remote state.
///
/// An attribute enters the change-set only when the declaration sets it
/// explicitly *and* the value differs from the stored one. Attributes
/// the declaration leaves unset are never sent, whatever the stored
/// value; for `next_unix_uid`/`next_unix_gid` this is what keeps the
/// reconciler from fighting the server's auto-assignment.
#[must_use]
pub fn plan(stored: &Project, desired: &ProjectSpec) -> Plan {
    if stored.name != desired.name {
        return Plan::RequiresReplacement {
            stored: stored.name.clone(),
            desired: desired.name.clone(),
        };
    }

    fn changed<T: PartialEq + Clone>(desired: &Option<T>, stored: &T) -> Option<T> {
        desired.as_ref().filter(|v| *v != stored).cloned()
    }

    Plan::Update(ChangeSet {
        next_unix_uid: changed(&desired.next_unix_uid, &stored.next_unix_uid),
        next_unix_gid: changed(&desired.next_unix_gid, &stored.next_unix_gid),
        create_server_users: changed(&desired.create_server_users, &stored.create_server_users),
        force_shared_ssh_users: changed(
            &desired.force_shared_ssh_users,
            &stored.force_shared_ssh_users,
        ),
        forward_traffic: changed(&desired.forward_traffic, &stored.forward_traffic),
        rdp_session_recording: changed(
            &desired.rdp_session_recording,
            &stored.rdp_session_recording,
        ),
        require_preauthorization: changed(
            &desired.require_preauthorization,
            &stored.require_preauthorization,
        ),
        ssh_session_recording: changed(
            &desired.ssh_session_recording,
            &stored.ssh_session_recording,
        ),
        shared_admin_user_name: desired
            .shared_admin_user_name
            .clone()
            .filter(|v| stored.shared_admin_user_name.as_ref() != Some(v)),
        shared_standard_user_name: desired
            .shared_standard_user_name
            .clone()
            .filter(|v| stored.shared_standard_user_name.as_ref() != Some(v)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stored() -> Project {
        Project {
            name: "web".into(),
            next_unix_uid: 60120,
            next_unix_gid: 63020,
            create_server_users: false,
            force_shared_ssh_users: false,
            forward_traffic: false,
            rdp_session_recording: false,
            require_preauthorization: false,
            ssh_session_recording: false,
            shared_admin_user_name: None,
            shared_standard_user_name: None,
            deleted: false,
        }
    }

    #[test]
    fn matching_declaration_plans_empty_change_set() {
        let project = stored();
        match plan(&project, &project.as_spec()) {
            Plan::Update(changes) => assert!(changes.is_empty()),
            other => panic!("unexpected plan: {other:?}"),
        }
    }

    #[test]
    fn unset_uid_and_gid_never_enter_the_change_set() {
        // Declaration leaves uid/gid unset while the server has
        // assigned its own values.
        let project = stored();
        let spec = ProjectSpec::new("web").with_forward_traffic(true);
        match plan(&project, &spec) {
            Plan::Update(changes) => {
                assert_eq!(changes.next_unix_uid, None);
                assert_eq!(changes.next_unix_gid, None);
                assert_eq!(changes.forward_traffic, Some(true));
            }
            other => panic!("unexpected plan: {other:?}"),
        }
    }

    #[test]
    fn explicit_zero_is_a_real_value() {
        let project = stored();
        let spec = ProjectSpec::new("web").with_next_unix_uid(0);
        match plan(&project, &spec) {
            Plan::Update(changes) => assert_eq!(changes.next_unix_uid, Some(0)),
            other => panic!("unexpected plan: {other:?}"),
        }
    }

    #[test]
    fn explicit_value_equal_to_stored_is_not_sent() {
        let project = stored();
        let spec = ProjectSpec::new("web")
            .with_next_unix_uid(60120)
            .with_next_unix_gid(63400);
        match plan(&project, &spec) {
            Plan::Update(changes) => {
                assert_eq!(changes.next_unix_uid, None);
                assert_eq!(changes.next_unix_gid, Some(63400));
            }
            other => panic!("unexpected plan: {other:?}"),
        }
    }

    #[test]
    fn name_change_requires_replacement() {
        let project = stored();
        let spec = ProjectSpec::new("renamed").with_next_unix_uid(61200);
        assert_eq!(
            plan(&project, &spec),
            Plan::RequiresReplacement {
                stored: "web".into(),
                desired: "renamed".into(),
            }
        );
    }

    #[test]
    fn shared_user_names_diff_against_remote_values() {
        let mut project = stored();
        project.shared_admin_user_name = Some("sauser".into());

        let spec = ProjectSpec::new("web")
            .with_shared_admin_user_name("sauser")
            .with_shared_standard_user_name("ssuser");
        match plan(&project, &spec) {
            Plan::Update(changes) => {
                assert_eq!(changes.shared_admin_user_name, None);
                assert_eq!(changes.shared_standard_user_name.as_deref(), Some("ssuser"));
            }
            other => panic!("unexpected plan: {other:?}"),
        }
    }

    #[test]
    fn change_set_serializes_only_changed_fields() {
        let project = stored();
        let spec = ProjectSpec::new("web")
            .with_next_unix_uid(61200)
            .with_next_unix_gid(63400);
        let Plan::Update(changes) = plan(&project, &spec) else {
            panic!("expected update plan");
        };
        assert_eq!(
            serde_json::to_value(&changes).unwrap(),
            json!({"next_unix_uid": 61200, "next_unix_gid": 63400})
        );
    }

    #[test]
    fn plan_is_deterministic() {
        let project = stored();
        let spec = ProjectSpec::new("web").with_require_preauthorization(true);
        assert_eq!(plan(&project, &spec), plan(&project, &spec));
    }
}
