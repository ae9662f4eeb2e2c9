//! Field lookup over loosely typed backend records.
//!
//! The backend has renamed columns over time, so one logical field may
//! arrive under several keys (`agent_name`, `agentName`, …). Each field
//! lists its keys in preference order and the first usable one wins.

use serde_json::{Map, Value};

/// Keys for one logical field, most preferred first.
pub(super) type Synonyms = &'static [&'static str];

/// The first present, non-null scalar among `keys`, as a string.
///
/// Numbers are stringified. Booleans, arrays, and objects count as absent.
pub(super) fn pick(fields: &Map<String, Value>, keys: Synonyms) -> Option<String> {
    keys.iter().find_map(|key| scalar(fields.get(*key)?))
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn first_present_key_wins() {
        let fields = object(json!({ "agentName": "B", "agent_name": "A" }));
        assert_eq!(pick(&fields, &["agent_name", "agentName"]).as_deref(), Some("A"));
    }

    #[test]
    fn null_falls_through_to_next_key() {
        let fields = object(json!({ "agent_name": null, "agentName": "B" }));
        assert_eq!(pick(&fields, &["agent_name", "agentName"]).as_deref(), Some("B"));
    }

    #[test]
    fn numbers_are_stringified() {
        let fields = object(json!({ "id": 42 }));
        assert_eq!(pick(&fields, &["id"]).as_deref(), Some("42"));
    }

    #[test]
    fn empty_string_is_present() {
        let fields = object(json!({ "containerNumber": "", "container": "X" }));
        assert_eq!(
            pick(&fields, &["containerNumber", "container"]).as_deref(),
            Some("")
        );
    }

    #[test]
    fn non_scalars_count_as_absent() {
        let fields = object(json!({ "title": true, "note": ["a"], "vin": {} }));
        assert_eq!(pick(&fields, &["title", "note", "vin"]), None);
    }

    #[test]
    fn missing_keys_yield_none() {
        let fields = object(json!({}));
        assert_eq!(pick(&fields, &["id"]), None);
    }
}
