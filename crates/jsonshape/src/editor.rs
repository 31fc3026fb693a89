//! Contract with the external tree/code editor widget.
//!
//! The widget itself lives outside this crate. It is handed a value plus an
//! [`EditorConfig`] and reports user edits back; the session stores them as-is.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::builder::{Session, View};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    /// Structural view.
    Tree,
    /// Raw text view.
    Code,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Modes the user may switch between.
    pub modes: Vec<EditorMode>,
    /// Mode shown first.
    pub mode: EditorMode,
    /// Undo history.
    pub history: bool,
    /// In-editor search.
    pub search: bool,
    /// Indentation used by the code view.
    pub indentation: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            modes: vec![EditorMode::Tree, EditorMode::Code],
            mode: EditorMode::Tree,
            history: true,
            search: true,
            indentation: 4,
        }
    }
}

pub trait TemplateEditor {
    /// Show `value`; called again whenever the session's value changes.
    fn render(&mut self, value: &Value, config: &EditorConfig);

    /// Show the placeholder used when the source has no usable schema.
    fn render_empty(&mut self);

    /// The latest edit since the last call, if any.
    fn take_change(&mut self) -> Option<Value>;
}

/// Forward a pending edit into the session, then render its current view.
pub fn drive<E: TemplateEditor + ?Sized>(session: &mut Session, editor: &mut E) {
    if let Some(v) = editor.take_change() {
        session.edit(v);
    }
    match session.view() {
        View::NoData => editor.render_empty(),
        View::Editor { value, config, .. } => editor.render(value, config),
    }
}
