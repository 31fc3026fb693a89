//! Completion signals shown to the user after a workflow action.
//!
//! A notice must be acknowledged before the caller navigates anywhere.
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    SourceUpdated,
    TargetSaved,
}

impl NoticeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NoticeKind::SourceUpdated => "source_updated",
            NoticeKind::TargetSaved => "target_saved",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn source_updated() -> Self {
        Self {
            kind: NoticeKind::SourceUpdated,
            message: "Source JSON updated with deletions".to_string(),
        }
    }

    pub fn target_saved() -> Self {
        Self {
            kind: NoticeKind::TargetSaved,
            message: "Data saved in target".to_string(),
        }
    }
}

pub fn notice_json(notice: &Notice) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(notice.kind.as_str()));
    inner.insert("message".to_string(), json!(notice.message));

    let mut outer = Map::new();
    outer.insert("notice".to_string(), Value::Object(inner));
    Value::Object(outer)
}
