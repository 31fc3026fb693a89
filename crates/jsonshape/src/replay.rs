//! Project full documents through a (possibly pruned) template.
//!
//! Replay keeps a key only when it appears in both the template and the data.
//! It never fails: shape mismatches fall through to a verbatim copy or an
//! empty object.

use serde_json::{Map, Value};
use tracing::debug;

use crate::options::{EmptyArrayPolicy, Options};

/// Replay `template` over `data` with default options.
pub fn replay(template: &Value, data: &Value) -> Value {
    replay_with(template, data, &Options::default())
}

/// Replay `template` over `data`.
///
/// A template that is not an object retains nothing and yields `{}`, as does
/// data that is not an object.
pub fn replay_with(template: &Value, data: &Value, options: &Options) -> Value {
    match (template, data) {
        (Value::Object(t), Value::Object(d)) => Value::Object(replay_object(t, d, options)),
        _ => Value::Object(Map::new()),
    }
}

/// Replay against a whole source: a sequence is replayed element by element,
/// anything else once.
///
/// A row template (an array, as produced for an array of arrays) replays row
/// `i` of the source with its own entry `i`, falling back to the first entry
/// for rows it has no entry for. Every element of a row shares that template.
pub fn replay_all(template: &Value, source: &Value, options: &Options) -> Value {
    match (template, source) {
        (Value::Array(rows), Value::Array(items)) => {
            debug!(len = items.len(), rows = rows.len(), "replaying row templates");
            let Some(first) = rows.first() else {
                return Value::Array(items.iter().map(|_| Value::Object(Map::new())).collect());
            };
            let out = items.iter().enumerate().map(|(i, row)| {
                let t = rows.get(i).unwrap_or(first);
                match row {
                    Value::Array(alts) => {
                        Value::Array(alts.iter().map(|d| replay_with(t, d, options)).collect())
                    }
                    _ => replay_with(t, row, options),
                }
            });
            Value::Array(out.collect())
        }
        (_, Value::Array(items)) => {
            debug!(len = items.len(), "replaying template over sequence");
            Value::Array(items.iter().map(|d| replay_with(template, d, options)).collect())
        }
        _ => replay_with(template, source, options),
    }
}

fn replay_object(
    template: &Map<String, Value>,
    data: &Map<String, Value>,
    options: &Options,
) -> Map<String, Value> {
    let mut out = Map::new();
    for (k, t) in template {
        let Some(d) = data.get(k) else {
            continue;
        };
        let v = match (t, d) {
            (Value::Array(schema), Value::Array(items)) => match schema.first() {
                Some(elem) => Value::Array(items.iter().map(|i| project(elem, i, options)).collect()),
                None => match options.empty_array {
                    EmptyArrayPolicy::EmptyElements => Value::Array(
                        items.iter().map(|_| Value::Object(Map::new())).collect(),
                    ),
                    EmptyArrayPolicy::Omit => continue,
                },
            },
            (Value::Object(_), _) => replay_with(t, d, options),
            _ => d.clone(),
        };
        out.insert(k.clone(), v);
    }
    out
}

// Apply an array's element schema to one element.
fn project(schema: &Value, item: &Value, options: &Options) -> Value {
    match (schema, item) {
        (Value::Object(_), _) => replay_with(schema, item, options),
        (Value::Array(inner), Value::Array(items)) => match inner.first() {
            Some(elem) => Value::Array(items.iter().map(|i| project(elem, i, options)).collect()),
            None => Value::Array(Vec::new()),
        },
        _ => item.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn drops_keys_missing_from_either_side() {
        let t = json!({"a": 0, "gone": 0});
        let d = json!({"a": 1, "extra": 2});
        assert_eq!(replay(&t, &d), json!({"a": 1}));
    }

    #[test]
    fn scalar_leaf_copies_data_without_coercion() {
        let t = json!({"a": 0});
        let d = json!({"a": {"deep": [1, "x"]}});
        assert_eq!(replay(&t, &d), d);
    }

    #[test]
    fn object_template_over_scalar_data_is_empty() {
        let t = json!({"a": {"b": 1}});
        let d = json!({"a": null});
        assert_eq!(replay(&t, &d), json!({"a": {}}));
    }

    #[test]
    fn array_template_over_scalar_data_copies() {
        let t = json!({"a": [{"b": 1}]});
        let d = json!({"a": "flat"});
        assert_eq!(replay(&t, &d), json!({"a": "flat"}));
    }

    #[test]
    fn empty_template_array_policies() {
        let t = json!({"items": [], "id": 0});
        let d = json!({"id": 9, "items": [{"x": 1}, {"x": 2}]});
        assert_eq!(replay(&t, &d), json!({"items": [{}, {}], "id": 9}));

        let opts = Options { empty_array: EmptyArrayPolicy::Omit, ..Options::default() };
        assert_eq!(replay_with(&t, &d, &opts), json!({"id": 9}));
    }

    #[test]
    fn scalar_element_schema_keeps_elements() {
        let t = json!({"tags": ["a"]});
        let d = json!({"tags": ["x", "y", 3]});
        assert_eq!(replay(&t, &d), d);
    }

    #[test]
    fn nested_array_element_schema() {
        let t = json!({"grid": [[{"v": 0}]]});
        let d = json!({"grid": [[{"v": 1, "w": 2}], [{"v": 3}, {"w": 4}]]});
        assert_eq!(replay(&t, &d), json!({"grid": [[{"v": 1}], [{"v": 3}, {}]]}));
    }

    #[test]
    fn replay_all_maps_sequences() {
        let t = json!({"a": 0});
        let d = json!([{"a": 1, "b": 2}, {"b": 3}, 4]);
        assert_eq!(replay_all(&t, &d, &Options::default()), json!([{"a": 1}, {}, {}]));
    }

    #[test]
    fn replay_all_uses_row_templates() {
        let t = json!([{"a": 0}, {"b": 0}]);
        let d = json!([[{"a": 1, "b": 1}, {"a": 2}], [{"a": 3, "b": 3}], [{"a": 4, "b": 4}]]);
        assert_eq!(
            replay_all(&t, &d, &Options::default()),
            json!([[{"a": 1}, {"a": 2}], [{"b": 3}], [{"a": 4}]])
        );
    }
}
