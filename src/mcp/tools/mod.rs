//! MCP tools for the HR Enterprise API.
//!
//! Each module covers one upstream resource area:
//! - `employees`: directory listing and per-employee detail
//! - `vacations`: request listing, balances, and request submission
//! - `jobs`: job postings and posting detail
//! - `performance`: reviews and aggregate analytics
//!
//! Every tool contributes a descriptor (the schema the agent runtime plans
//! against) and a handler that makes exactly one upstream call and formats
//! the JSON response into display text. The helpers below are the shared
//! plumbing: argument extraction, ordered query construction, and value
//! rendering.

pub mod employees;
pub mod jobs;
pub mod performance;
pub mod vacations;

use std::sync::Arc;

use rmcp::model::JsonObject;
use serde_json::Value;

use crate::mcp::error::HrError;

/// Converts a `json!` object literal into the schema map `Tool` expects.
pub(crate) fn object_schema(schema: Value) -> Arc<JsonObject> {
    match schema {
        Value::Object(map) => Arc::new(map),
        _ => Arc::new(JsonObject::new()),
    }
}

/// Renders a scalar JSON value the way it should appear in display text:
/// strings without quotes, everything else via its JSON form.
pub(crate) fn text_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Looks up a required argument, failing with `MissingArgument` before any
/// upstream call is made. `null` counts as absent.
pub(crate) fn required<'a>(
    args: &'a JsonObject,
    field: &'static str,
) -> Result<&'a Value, HrError> {
    match args.get(field) {
        Some(value) if !value.is_null() => Ok(value),
        _ => Err(HrError::MissingArgument(field)),
    }
}

/// Required argument rendered as text, for interpolation into a path.
pub(crate) fn required_text(args: &JsonObject, field: &'static str) -> Result<String, HrError> {
    required(args, field).map(text_value)
}

/// Collects the filters present in `args`, in the declared order, keyed by
/// the upstream API's parameter names. Absent filters are omitted entirely.
pub(crate) fn present_filters(
    args: &JsonObject,
    keys: &[(&'static str, &'static str)],
) -> Vec<(&'static str, String)> {
    keys.iter()
        .filter_map(|(arg_name, upstream_name)| {
            args.get(*arg_name)
                .filter(|value| !value.is_null())
                .map(|value| (*upstream_name, text_value(value)))
        })
        .collect()
}

/// Appends `?k=v&k2=v2` to `path` when any filters are present.
pub(crate) fn with_query(path: &str, filters: &[(&'static str, String)]) -> String {
    if filters.is_empty() {
        return path.to_string();
    }
    let query: Vec<String> = filters.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("{path}?{}", query.join("&"))
}

/// Renders a field of an upstream record, `N/A` when absent or null.
pub(crate) fn field(record: &Value, key: &str) -> String {
    match record.get(key) {
        Some(value) if !value.is_null() => text_value(value),
        _ => "N/A".to_string(),
    }
}

/// `$95,000`-style rendering for salary figures.
pub(crate) fn money(value: &Value) -> String {
    match value.as_i64() {
        Some(n) => format!("${}", thousands(n)),
        None => format!("${}", text_value(value)),
    }
}

/// Inserts thousands separators into an integer.
pub(crate) fn thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if n < 0 { format!("-{grouped}") } else { grouped }
}
