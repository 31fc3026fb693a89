// Structured JSON generator shared by the fuzz targets.
use arbitrary::{Arbitrary, Unstructured};
use serde_json::{Number, Value};

const MAX_DEPTH: usize = 6;
const MAX_ARRAY_SIZE: usize = 8;
const MAX_OBJECT_SIZE: usize = 8;
// Small key space so templates and data overlap.
const KEYS: [&str; 6] = ["a", "b", "c", "id", "items", "meta"];

#[derive(Arbitrary, Debug)]
pub struct FuzzValue {
    choice: u8,
}

impl FuzzValue {
    pub fn to_json_value(&self, u: &mut Unstructured, depth: usize) -> arbitrary::Result<Value> {
        if depth >= MAX_DEPTH {
            return Ok(Value::Null);
        }

        Ok(match self.choice % 10 {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: i64 = u.arbitrary()?;
                Value::Number(Number::from(n))
            }
            3 => {
                let s: String = u.arbitrary()?;
                Value::String(s)
            }
            4..=6 => {
                let size = u.int_in_range(0..=MAX_ARRAY_SIZE)?;
                let mut arr = Vec::with_capacity(size);
                for _ in 0..size {
                    let fv: FuzzValue = u.arbitrary()?;
                    arr.push(fv.to_json_value(u, depth + 1)?);
                }
                Value::Array(arr)
            }
            _ => {
                let size = u.int_in_range(0..=MAX_OBJECT_SIZE)?;
                let mut obj = serde_json::Map::new();
                for _ in 0..size {
                    let key = *u.choose(&KEYS)?;
                    let fv: FuzzValue = u.arbitrary()?;
                    obj.insert(key.to_string(), fv.to_json_value(u, depth + 1)?);
                }
                Value::Object(obj)
            }
        })
    }
}

pub fn arbitrary_value(u: &mut Unstructured) -> Option<Value> {
    let fv: FuzzValue = u.arbitrary().ok()?;
    fv.to_json_value(u, 0).ok()
}
