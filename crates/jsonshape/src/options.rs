use serde::{Deserialize, Serialize};

use crate::editor::EditorConfig;

/// What replay does with an array field whose template array is empty.
///
/// An empty template array carries no element schema, so no keys can be
/// retained for the elements of the matching data array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyArrayPolicy {
    /// Keep the array, every element becomes `{}`.
    #[default]
    EmptyElements,
    /// Drop the key from the result.
    Omit,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    pub empty_array: EmptyArrayPolicy,
    /// Settings handed to the editor collaborator.
    pub editor: EditorConfig,
}

impl Options {
    /// Parse options from a JSON document; missing fields take their defaults.
    pub fn from_json_str(s: &str) -> crate::Result<Self> {
        serde_json::from_str(s).map_err(|e| crate::Error::Message(format!("invalid options: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_keeps_defaults() {
        let opts = Options::from_json_str(r#"{"emptyArray": "omit"}"#).unwrap();
        assert_eq!(opts.empty_array, EmptyArrayPolicy::Omit);
        assert_eq!(opts.editor, EditorConfig::default());
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let err = Options::from_json_str(r#"{"emptyArray": "keep"}"#).unwrap_err();
        assert!(matches!(err, crate::Error::Message(_)));
        assert!(err.to_string().starts_with("invalid options:"));
    }

    #[test]
    fn empty_document_is_default() {
        let opts = Options::from_json_str("{}").unwrap();
        assert_eq!(opts, Options::default());
    }
}
