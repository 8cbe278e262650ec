//! Lenient deserialization helpers
//!
//! Catalog records come from hand-edited JSON files and from a document
//! store that cannot hold nested arrays, so the same logical list may
//! arrive as an array, an index-keyed map (`{"0": .., "1": ..}`) or be
//! missing entirely. These helpers fold every encoding into one Rust shape.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Collect the string entries of a JSON value.
///
/// Arrays yield their string elements, index-keyed maps yield their string
/// values in key order, a bare string yields itself. Anything else, and
/// any non-string entry, yields nothing.
pub fn strings_from_value(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by_key(|(key, _)| index_key(key));
            entries
                .into_iter()
                .filter_map(|(_, v)| v.as_str().map(str::to_string))
                .collect()
        }
        _ => Vec::new(),
    }
}

/// Sort key for index-keyed maps: numeric keys first in numeric order
fn index_key(key: &str) -> (usize, String) {
    (key.parse::<usize>().unwrap_or(usize::MAX), key.to_string())
}

/// Deserialize a list that may be encoded as an array, an index-keyed map,
/// or `null`/absent.
pub fn seq_or_indexed<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr<T> {
        Seq(Vec<T>),
        Indexed(BTreeMap<String, T>),
    }

    Ok(match Option::<Repr<T>>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(Repr::Seq(items)) => items,
        Some(Repr::Indexed(map)) => {
            let mut entries: Vec<(String, T)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| index_key(a).cmp(&index_key(b)));
            entries.into_iter().map(|(_, v)| v).collect()
        }
    })
}

/// Deserialize a set of strings from any list encoding
pub fn string_set<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?.unwrap_or(Value::Null);
    Ok(strings_from_value(&value).into_iter().collect())
}

/// Deserialize an optional identifier that may be a string or a number
pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Deserialize a string field that may be `null` or a number
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}
