//! Free-form string maps attached to events, actors and targets.

use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

/// Unordered string-to-string attributes.
///
/// Ordering is never relied on: canonical hashing and export both sort keys
/// before use.
pub type Fields = HashMap<String, String>;

#[derive(Deserialize)]
struct FieldEntry {
    key: String,
    value: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFields {
    List(Vec<FieldEntry>),
    Map(HashMap<String, serde_json::Value>),
}

/// Deserializes [`Fields`] from either wire shape the service produces.
///
/// Query results encode maps as `[{"key": "...", "value": "..."}]`, while
/// plain JSON documents use `{"key": value}`. In the object form non-string
/// values are rendered with their JSON text (`true` becomes `"true"`).
/// `null` yields an empty map.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Fields, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawFields>::deserialize(deserializer)?;
    let fields = match raw {
        None => Fields::new(),
        Some(RawFields::List(entries)) => entries
            .into_iter()
            .map(|entry| (entry.key, entry.value))
            .collect(),
        Some(RawFields::Map(map)) => map
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, value)
            })
            .collect(),
    };
    Ok(fields)
}
