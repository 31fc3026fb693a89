#![doc = include_str!("../README.md")]

pub mod error;
pub mod options;
pub mod normalize;
pub mod replay;
pub mod builder;
pub mod editor;
pub mod notice;

pub use crate::builder::{Session, Step, Workspace};
pub use crate::error::{Error, Result};
pub use crate::normalize::normalize;
pub use crate::options::{EmptyArrayPolicy, Options};
pub use crate::replay::{replay, replay_all, replay_with};

use std::io::{Read, Write};

use serde_json::Value;

/// Read a JSON document and return its initial template.
pub fn normalize_from_reader<R: Read>(mut reader: R) -> Result<Value> {
    let mut s = String::new();
    reader.read_to_string(&mut s)?;
    let v: Value = serde_json::from_str(&s)?;
    Ok(normalize(&v))
}

/// Replay `template` over every document in `source` and write the result as JSON.
pub fn replay_to_writer<W: Write>(
    mut writer: W,
    template: &Value,
    source: &Value,
    options: &Options,
    pretty: bool,
) -> Result<()> {
    let out = replay_all(template, source, options);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, &out)?;
    } else {
        serde_json::to_writer(&mut writer, &out)?;
    }
    writer.write_all(b"\n")?;
    Ok(())
}
