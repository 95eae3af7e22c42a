//! Forgiving deserializers for hand-edited schedule files.
//!
//! Schedule documents are often written by hand or exported from
//! spreadsheets, so scalar fields arrive as numbers or `null`, and optional
//! collections are sometimes missing or of the wrong type. These helpers
//! normalise such values instead of rejecting the whole document.

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;
use uuid::Uuid;

/// Converts any JSON scalar into its text form.
///
/// `null` becomes the empty string and numbers keep their decimal form.
pub fn text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(text)
}

/// A list of strings; anything other than an array yields an empty list.
pub fn strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter(|item| !item.is_null())
            .map(text)
            .collect(),
        _ => Vec::new(),
    })
}

/// A list of records; malformed entries are skipped and a non-array yields
/// an empty list.
pub fn seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!("Skipping malformed entry: {e}");
                None
            }
        })
        .collect())
}

/// A record that falls back to its default when the value is not an object.
pub fn record<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => Ok(serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::debug!("Replacing malformed record with defaults: {e}");
            T::default()
        })),
        _ => Ok(T::default()),
    }
}

/// An identifier that is regenerated when absent or unparseable.
pub fn id<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<Uuid>,
{
    let value = Value::deserialize(deserializer)?;
    let uuid = value
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);
    Ok(T::from(uuid))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use test_case::test_case;

    use super::text;

    #[test_case(json!("3"), "3"; "string")]
    #[test_case(json!(3), "3"; "integer")]
    #[test_case(json!(null), ""; "null")]
    #[test_case(json!(true), "true"; "boolean")]
    fn scalars_become_text(value: serde_json::Value, expected: &str) {
        assert_eq!(text(value), expected);
    }
}
