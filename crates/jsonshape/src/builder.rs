//! Two-step schema builder workflow.
//!
//! `Editing` lets the user prune the normalized template. Confirming the
//! pruning replays the template over the source, writes the result back into
//! the [`Workspace`] and moves to `Reviewing`. Setting the target ends the
//! session. The workflow only moves forward.

use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::editor::EditorConfig;
use crate::error::{Error, Result};
use crate::normalize::{is_usable, normalize};
use crate::notice::Notice;
use crate::options::Options;
use crate::replay::replay_all;

/// Values shared with the screens before and after the builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub source: Value,
    pub target: Option<Value>,
}

impl Workspace {
    pub fn new(source: Value) -> Self {
        Self { source, target: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    Editing,
    Reviewing,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Editing => f.write_str("editing"),
            Step::Reviewing => f.write_str("reviewing"),
        }
    }
}

/// The action offered alongside the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    UpdateSource,
    SetTarget,
}

/// What the screen should show.
#[derive(Debug, PartialEq)]
pub enum View<'a> {
    /// The source has no usable schema; no editor and no pruning action.
    NoData,
    Editor {
        value: &'a Value,
        config: &'a EditorConfig,
        action: Action,
    },
}

/// Screen to navigate to once the session is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    JsonMapper,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::JsonMapper => "/json-mapper",
        }
    }
}

/// Result of the terminal action.
#[derive(Debug, Clone, PartialEq)]
pub struct Committed {
    pub workspace: Workspace,
    pub notice: Notice,
    pub route: Route,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    step: Step,
    template: Value,
    workspace: Workspace,
    options: Options,
}

impl Session {
    /// Enter `Editing` with a template derived from the workspace source.
    pub fn start(workspace: Workspace, options: Options) -> Self {
        let template = normalize(&workspace.source);
        info!(usable = is_usable(&template), "schema builder started");
        Self { step: Step::Editing, template, workspace, options }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// The value currently shown in the editor.
    pub fn template(&self) -> &Value {
        &self.template
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn view(&self) -> View<'_> {
        match self.step {
            Step::Editing if !is_usable(&self.template) => View::NoData,
            Step::Editing => View::Editor {
                value: &self.template,
                config: &self.options.editor,
                action: Action::UpdateSource,
            },
            Step::Reviewing => View::Editor {
                value: &self.template,
                config: &self.options.editor,
                action: Action::SetTarget,
            },
        }
    }

    /// Store an edit from the editor as-is.
    pub fn edit(&mut self, value: Value) {
        debug!(step = %self.step, "template edited");
        self.template = value;
    }

    /// The upstream source changed: re-derive the template, dropping any edits.
    pub fn source_changed(mut self, source: Value) -> Self {
        self.template = normalize(&source);
        self.workspace.source = source;
        info!(step = %self.step, "source replaced, template recomputed");
        self
    }

    /// Confirm the pruning: `Editing` → `Reviewing`.
    ///
    /// The source is replaced by the template replayed over it. Like any other
    /// source change, the editor value is then re-derived from the new source.
    pub fn update_source(mut self) -> Result<(Self, Notice)> {
        if self.step != Step::Editing {
            return Err(Error::InvalidTransition { step: self.step, action: "update source" });
        }
        if !is_usable(&self.template) {
            return Err(Error::NoUsableSchema);
        }
        let filtered = replay_all(&self.template, &self.workspace.source, &self.options);
        self.template = normalize(&filtered);
        self.workspace.source = filtered;
        self.step = Step::Reviewing;
        info!("source updated from template");
        Ok((self, Notice::source_updated()))
    }

    /// Save the reviewed value as the target and end the session.
    pub fn set_target(self) -> Result<Committed> {
        if self.step != Step::Reviewing {
            return Err(Error::InvalidTransition { step: self.step, action: "set target" });
        }
        let mut workspace = self.workspace;
        workspace.target = Some(self.template);
        info!("target saved");
        Ok(Committed { workspace, notice: Notice::target_saved(), route: Route::JsonMapper })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn start(source: Value) -> Session {
        Session::start(Workspace::new(source), Options::default())
    }

    #[test]
    fn scalar_source_shows_no_data() {
        let s = start(json!(42));
        assert_eq!(s.view(), View::NoData);
        assert!(matches!(s.update_source(), Err(Error::NoUsableSchema)));
    }

    #[test]
    fn set_target_requires_review() {
        let s = start(json!({"a": 1}));
        let err = s.set_target().unwrap_err();
        assert_eq!(err.to_string(), "cannot set target while editing");
    }

    #[test]
    fn update_source_only_once() {
        let (s, _) = start(json!({"a": 1})).update_source().unwrap();
        let err = s.update_source().unwrap_err();
        assert!(matches!(err, Error::InvalidTransition { step: Step::Reviewing, .. }));
    }

    #[test]
    fn source_change_discards_edits_and_keeps_step() {
        let mut s = start(json!({"a": 1, "b": 2}));
        s.edit(json!({"a": 1}));
        let s = s.source_changed(json!([{"c": [{"d": 1}, {"d": 2}]}]));
        assert_eq!(s.step(), Step::Editing);
        assert_eq!(s.template(), &json!({"c": [{"d": 1}]}));
    }

    #[test]
    fn review_shows_normalized_filtered_source() {
        let mut s = start(json!({"a": 1, "b": [{"x": 1, "y": 0}, {"x": 2, "y": 0}]}));
        s.edit(json!({"b": [{"x": 0}]}));
        let (s, _) = s.update_source().unwrap();
        assert_eq!(s.workspace().source, json!({"b": [{"x": 1}, {"x": 2}]}));
        assert_eq!(s.template(), &json!({"b": [{"x": 1}]}));
        let done = s.set_target().unwrap();
        assert_eq!(done.workspace.target, Some(json!({"b": [{"x": 1}]})));
    }

    #[test]
    fn source_change_in_review_keeps_step() {
        let (s, _) = start(json!({"a": 1})).update_source().unwrap();
        let s = s.source_changed(json!([{"c": 1, "d": [{"e": 1}, {"e": 2}]}, {"c": 2}]));
        assert_eq!(s.step(), Step::Reviewing);
        assert_eq!(s.template(), &json!({"c": 1, "d": [{"e": 1}]}));
        assert!(matches!(s.view(), View::Editor { action: Action::SetTarget, .. }));
    }

    #[test]
    fn edits_in_review_reach_target() {
        let (mut s, _) = start(json!({"a": 1, "b": 2})).update_source().unwrap();
        s.edit(json!({"a": "changed"}));
        let done = s.set_target().unwrap();
        assert_eq!(done.workspace.target, Some(json!({"a": "changed"})));
        assert_eq!(done.workspace.source, json!({"a": 1, "b": 2}));
        assert_eq!(done.route.path(), "/json-mapper");
    }
}
