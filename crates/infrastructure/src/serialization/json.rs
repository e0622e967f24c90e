//! JSON helpers for on-disk files.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(serde_json::Error),
}

/// Serializes a value to pretty JSON bytes with a trailing newline.
///
/// Key order follows the source type, so maps should be `BTreeMap`s.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_pretty_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    buffer.push(b'\n');
    Ok(buffer)
}

/// Deserializes JSON from bytes.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    serde_json::from_slice(bytes).map_err(SerializationError::Deserialize)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    #[test]
    fn pretty_output_is_sorted_and_newline_terminated() {
        let mut map = BTreeMap::new();
        map.insert("refresh_token", "r1");
        map.insert("access_token", "a1");

        let bytes = to_json_pretty_bytes(&map).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(
            text,
            "{\n  \"access_token\": \"a1\",\n  \"refresh_token\": \"r1\"\n}\n"
        );
    }

    #[test]
    fn invalid_bytes_are_a_deserialize_error() {
        let result: Result<BTreeMap<String, String>, _> = from_json_bytes(b"{\"a\": }");
        assert!(matches!(result, Err(SerializationError::Deserialize(_))));
    }
}
