use jsonshape::normalize;
use serde_json::{Value, json};

fn samples() -> Vec<Value> {
    vec![
        json!(null),
        json!("text"),
        json!({}),
        json!([]),
        json!({"a": 1, "s": "x", "f": 1.5, "n": null, "t": true}),
        json!({"items": [{"id": 1, "sub": [{"k": 1}, {"k": 2}]}, {"id": 2}], "tags": ["a", "b"]}),
        json!([{"a": 1, "b": [{"x": 1}, {"x": 2}]}, {"a": 2, "b": [{"x": 3}]}]),
        json!([1, 2, 3]),
        json!({"grid": [[{"a": 1}]], "empty": []}),
    ]
}

#[test]
fn normalization_is_idempotent() {
    for x in samples() {
        let once = normalize(&x);
        assert_eq!(normalize(&once), once, "input: {x}");
    }
}

#[test]
fn array_of_objects_collapses_to_first() {
    let o = json!({"k": [{"a0": 0}, {"a1": 1}, {"a2": 2}], "other": 1});
    assert_eq!(normalize(&o)["k"], json!([{"a0": 0}]));
}

#[test]
fn scalar_objects_pass_through() {
    let o = json!({"a": 1, "b": "two", "c": false, "d": null, "e": 2.5});
    assert_eq!(normalize(&o), o);
}

#[test]
fn array_of_objects_source() {
    let src = json!([{"a": 1, "b": [{"x": 1}, {"x": 2}]}, {"a": 2, "b": [{"x": 3}]}]);
    assert_eq!(normalize(&src), json!({"a": 1, "b": [{"x": 1}]}));
}

#[test]
fn array_of_arrays_source() {
    let src = json!([[{"a": 1}, {"a": 2}], [{"a": 3}]]);
    assert_eq!(normalize(&src), json!([{"a": 1}, {"a": 3}]));
}

#[test]
fn empty_inputs_have_no_keys() {
    assert_eq!(normalize(&json!({})), json!({}));
    assert_eq!(normalize(&json!([])), json!({}));
    assert_eq!(normalize(&json!(7)), json!({}));
}
