#![no_main]
use jsonshape::normalize;
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

mod json_gen;

fuzz_target!(|data: &[u8]| {
    let mut u = arbitrary::Unstructured::new(data);
    let Some(value) = json_gen::arbitrary_value(&mut u) else {
        return;
    };

    let once = normalize(&value);

    // Arrays of arrays normalize to rows, which are not a fixed point.
    let rows = matches!(&value, Value::Array(a) if matches!(a.first(), Some(Value::Array(_))));
    if !rows {
        let twice = normalize(&once);
        if once != twice {
            panic!(
                "normalize not idempotent!\nInput: {}\nOnce: {}\nTwice: {}",
                serde_json::to_string_pretty(&value).unwrap(),
                serde_json::to_string_pretty(&once).unwrap(),
                serde_json::to_string_pretty(&twice).unwrap()
            );
        }
    }

    if let (Value::Object(src), Value::Object(out)) = (&value, &once) {
        let keys_in: Vec<&String> = src.keys().collect();
        let keys_out: Vec<&String> = out.keys().collect();
        assert_eq!(keys_in, keys_out, "normalize changed key order");
    }
});
