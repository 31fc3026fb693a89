#![no_main]
use jsonshape::{Options, replay, replay_with};
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

mod json_gen;

fn check_subset(out: &Value, template: &Value, data: &Value) {
    let (Some(o), Some(t), Some(d)) = (out.as_object(), template.as_object(), data.as_object()) else {
        return;
    };
    for (k, v) in o {
        assert!(t.contains_key(k) && d.contains_key(k), "key {k} not in both sides");
        match &t[k] {
            Value::Object(_) => check_subset(v, &t[k], &d[k]),
            Value::Array(_) => {}
            _ => assert_eq!(v, &d[k], "leaf {k} not copied verbatim"),
        }
    }
}

fuzz_target!(|data: &[u8]| {
    let mut u = arbitrary::Unstructured::new(data);
    let (Some(template), Some(doc)) = (
        json_gen::arbitrary_value(&mut u),
        json_gen::arbitrary_value(&mut u),
    ) else {
        return;
    };

    let out = replay(&template, &doc);
    check_subset(&out, &template, &doc);

    // A replayed document is a fixed point of the same template.
    let again = replay_with(&template, &out, &Options::default());
    if again != out {
        panic!(
            "replay not stable!\nTemplate: {}\nData: {}\nOut: {}\nAgain: {}",
            serde_json::to_string_pretty(&template).unwrap(),
            serde_json::to_string_pretty(&doc).unwrap(),
            serde_json::to_string_pretty(&out).unwrap(),
            serde_json::to_string_pretty(&again).unwrap()
        );
    }
});
