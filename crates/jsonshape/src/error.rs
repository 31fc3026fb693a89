use std::io;

use thiserror::Error;

use crate::builder::Step;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("serde_json error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// The source normalized to an empty template, so there is nothing to prune.
    #[error("no source JSON available")]
    NoUsableSchema,

    #[error("cannot {action} while {step}")]
    InvalidTransition { step: Step, action: &'static str },

    #[error("{0}")]
    Message(String),
}

pub type Result<T> = core::result::Result<T, Error>;
