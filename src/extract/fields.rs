//! Raw-record field access shared by all flatteners
//!
//! Required fields raise a malformed-response error that aborts the
//! current resource; optional fields substitute the documented `Null`
//! placeholder. "Absent" follows the upstream convention where empty
//! strings and JSON null both count as missing.

use serde_json::Value;

use crate::error::{AuditError, Result};

/// Placeholder written for absent optional fields
pub(crate) const NULL_CELL: &str = "Null";

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

/// Whether a field is present and non-empty
pub(crate) fn truthy(record: &Value, field: &str) -> bool {
    record.get(field).map(|v| !is_falsy(v)).unwrap_or(false)
}

fn missing(context: &str, field: &str) -> AuditError {
    AuditError::Malformed(format!(
        "{}: record missing required field '{}'",
        context, field
    ))
}

pub(crate) fn req_u64(record: &Value, field: &str, context: &str) -> Result<u64> {
    record
        .get(field)
        .and_then(Value::as_u64)
        .ok_or_else(|| missing(context, field))
}

pub(crate) fn req_str(record: &Value, field: &str, context: &str) -> Result<String> {
    record
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| missing(context, field))
}

pub(crate) fn req_bool(record: &Value, field: &str, context: &str) -> Result<bool> {
    record
        .get(field)
        .and_then(Value::as_bool)
        .ok_or_else(|| missing(context, field))
}

/// Optional text cell: absent, null or empty -> `Null`
pub(crate) fn text_or_null(record: &Value, field: &str) -> String {
    match record.get(field) {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => NULL_CELL.to_string(),
    }
}

/// Optional integer cell: absent or null -> `Null`
pub(crate) fn int_or_null(record: &Value, field: &str) -> String {
    record
        .get(field)
        .and_then(Value::as_i64)
        .map(|v| v.to_string())
        .unwrap_or_else(|| NULL_CELL.to_string())
}

/// Counter cell: absent defaults to 0
pub(crate) fn count_cell(record: &Value, field: &str) -> String {
    record
        .get(field)
        .and_then(Value::as_i64)
        .unwrap_or(0)
        .to_string()
}

/// Boolean cell rendered `True`/`False`, absent -> `False`
pub(crate) fn bool_cell(record: &Value, field: &str) -> String {
    if record.get(field).and_then(Value::as_bool).unwrap_or(false) {
        "True".to_string()
    } else {
        "False".to_string()
    }
}

/// `summary_fields.<obj>.<key>` as text, if present
pub(crate) fn summary_str(record: &Value, obj: &str, key: &str) -> Option<String> {
    record
        .pointer(&format!("/summary_fields/{}/{}", obj, key))
        .and_then(Value::as_str)
        .map(str::to_string)
}

pub(crate) fn req_summary_str(
    record: &Value,
    obj: &str,
    key: &str,
    context: &str,
) -> Result<String> {
    summary_str(record, obj, key)
        .ok_or_else(|| missing(context, &format!("summary_fields.{}.{}", obj, key)))
}

pub(crate) fn req_summary_u64(
    record: &Value,
    obj: &str,
    key: &str,
    context: &str,
) -> Result<u64> {
    record
        .pointer(&format!("/summary_fields/{}/{}", obj, key))
        .and_then(Value::as_u64)
        .ok_or_else(|| missing(context, &format!("summary_fields.{}.{}", obj, key)))
}

/// Foreign-key cell: FK set means the summary name is required, FK unset
/// means `Null`. Used for organization/credential/project/inventory links.
pub(crate) fn linked_name_or_null(record: &Value, field: &str, context: &str) -> Result<String> {
    if truthy(record, field) {
        req_summary_str(record, field, "name", context)
    } else {
        Ok(NULL_CELL.to_string())
    }
}
