//! Soft-delete interpretation.
//!
//! The service never hard-removes a project right away: a deleted
//! project still answers `GET` with 200 and a `deleted: true` marker in
//! the body. Deletion verification depends on exactly one field, so
//! this interpreter decodes only that field and tolerates anything else
//! in the body, well-formed or not.

use serde_json::Value;

use crate::error::LifecycleError;

/// Reads the `deleted` marker out of a raw project response body.
///
/// # Errors
///
/// Returns [`LifecycleError::MalformedResponse`] when the body is not a
/// JSON object, or when the `deleted` field is missing or not a
/// boolean. Other fields are not inspected; a body whose `next_unix_uid`
/// is a string still interprets cleanly.
pub fn is_soft_deleted(body: &str) -> Result<bool, LifecycleError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| LifecycleError::malformed(format!("body is not valid JSON: {e}")))?;
    let object = value
        .as_object()
        .ok_or_else(|| LifecycleError::malformed("body is not a JSON object"))?;
    match object.get("deleted") {
        Some(Value::Bool(deleted)) => Ok(*deleted),
        Some(other) => Err(LifecycleError::malformed(format!(
            "deletion marker has wrong shape: {other}"
        ))),
        None => Err(LifecycleError::malformed("deletion marker is missing")),
    }
}
