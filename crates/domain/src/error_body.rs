//! Error body convention of the backend.
//!
//! Error responses carry a human-readable message in one of the `error`,
//! `message` or `detail` fields, checked in that order.

use serde_json::Value;

const MESSAGE_FIELDS: [&str; 3] = ["error", "message", "detail"];

/// Extracts the displayable message from an error body, if one is present.
#[must_use]
pub fn error_message(body: &Value) -> Option<String> {
    MESSAGE_FIELDS.iter().find_map(|field| match body.get(field) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    })
}

/// Extracts the displayable message from raw body bytes, or returns `fallback`.
#[must_use]
pub fn error_message_or(body: &[u8], fallback: impl Into<String>) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .as_ref()
        .and_then(error_message)
        .unwrap_or_else(|| fallback.into())
}
