//! Reduce a sample document to an editable template.
//!
//! Every array of objects collapses to its first element, which stands in for
//! the shape of all its siblings. Keys are never renamed or reordered.

use serde_json::{Map, Value};
use tracing::debug;

/// Derive the initial template from a source document.
///
/// - an array whose first element is an array is treated as rows: each row is
///   reduced to its representative object, the result stays an array
/// - any other array yields its pruned first element, or `{}` when empty
/// - an object is pruned one level deep
/// - scalars and `null` yield `{}`, meaning "no usable schema"
pub fn normalize(json: &Value) -> Value {
    let out = match json {
        Value::Array(items) => match items.first() {
            Some(Value::Array(_)) => Value::Array(items.iter().map(normalize_row).collect()),
            Some(first) => Value::Object(prune_value(first)),
            None => Value::Object(Map::new()),
        },
        Value::Object(map) => Value::Object(prune_array_fields(map)),
        _ => Value::Object(Map::new()),
    };
    debug!(usable = is_usable(&out), "normalized source");
    out
}

/// Shallow-copy `obj`, collapsing every non-empty array whose first element is
/// an object to `[first]`. The kept element is not pruned any further.
pub fn prune_array_fields(obj: &Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::with_capacity(obj.len());
    for (k, v) in obj {
        let v = match v {
            Value::Array(items) if matches!(items.first(), Some(Value::Object(_))) => {
                Value::Array(items[..1].to_vec())
            }
            _ => v.clone(),
        };
        out.insert(k.clone(), v);
    }
    out
}

/// Whether a normalized template has anything to edit: a non-empty object, or
/// rows containing at least one non-empty object.
pub fn is_usable(template: &Value) -> bool {
    match template {
        Value::Object(m) => !m.is_empty(),
        Value::Array(rows) => rows
            .iter()
            .any(|r| r.as_object().is_some_and(|m| !m.is_empty())),
        _ => false,
    }
}

fn prune_value(v: &Value) -> Map<String, Value> {
    match v {
        Value::Object(m) => prune_array_fields(m),
        _ => Map::new(),
    }
}

// A row is itself an array of alternates; its first entry represents it.
fn normalize_row(row: &Value) -> Value {
    let pruned = match row {
        Value::Array(alts) => alts.first().map(prune_value).unwrap_or_default(),
        Value::Object(m) => prune_array_fields(m),
        _ => Map::new(),
    };
    Value::Object(pruned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_have_no_schema() {
        for v in [json!(null), json!(true), json!(3.5), json!("x")] {
            assert_eq!(normalize(&v), json!({}));
        }
    }

    #[test]
    fn prune_keeps_key_order() {
        let v = json!({"z": 1, "a": [{"x": 1}, {"x": 2}], "m": "s"});
        let out = normalize(&v);
        let keys: Vec<&str> = out.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn prune_is_one_level_deep() {
        let v = json!({"a": [{"b": [{"c": 1}, {"c": 2}]}, {"b": []}]});
        assert_eq!(normalize(&v), json!({"a": [{"b": [{"c": 1}, {"c": 2}]}]}));
    }

    #[test]
    fn arrays_of_scalars_and_empty_arrays_pass_through() {
        let v = json!({"tags": ["a", "b"], "none": [], "grid": [[1], [2]], "n": [null, {"x": 1}]});
        assert_eq!(normalize(&v), v);
    }

    #[test]
    fn rows_with_empty_or_scalar_entries() {
        let v = json!([[{"a": 1}], [], [7], {"b": 2}]);
        assert_eq!(normalize(&v), json!([{"a": 1}, {}, {}, {"b": 2}]));
    }

    #[test]
    fn usable_templates() {
        assert!(is_usable(&json!({"a": 1})));
        assert!(is_usable(&json!([{}, {"a": 1}])));
        assert!(!is_usable(&json!({})));
        assert!(!is_usable(&json!([{}, {}])));
        assert!(!is_usable(&json!([])));
    }
}
