use jsonshape::builder::{Session, Workspace};
use jsonshape::notice::Notice;
use jsonshape::{Options, normalize, replay_all};
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

/// Use wee_alloc as the global allocator for smaller WASM binary size
#[cfg(feature = "size_opt")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Maximum input size in bytes (10 MB)
const MAX_INPUT_SIZE: usize = 10 * 1024 * 1024;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn parse(json_str: &str) -> Result<Value, String> {
    if json_str.len() > MAX_INPUT_SIZE {
        return Err(format!(
            "Input exceeds maximum size limit of {} bytes",
            MAX_INPUT_SIZE
        ));
    }
    serde_json::from_str(json_str).map_err(|e| format!("Invalid JSON: {}", e))
}

fn render(value: &Value, pretty: bool) -> Result<String, String> {
    if pretty {
        serde_json::to_string_pretty(value).map_err(|e| format!("JSON encoding error: {}", e))
    } else {
        serde_json::to_string(value).map_err(|e| format!("JSON encoding error: {}", e))
    }
}

#[cfg(target_arch = "wasm32")]
fn log_notice(notice: &Notice) {
    web_sys::console::info_1(&JsValue::from_str(&notice.message));
}

#[cfg(not(target_arch = "wasm32"))]
fn log_notice(_notice: &Notice) {}

/// Derive the initial template from a JSON string
#[wasm_bindgen]
pub fn normalize_json(json_str: &str, pretty: bool) -> Result<String, String> {
    let value = parse(json_str)?;
    render(&normalize(&value), pretty)
}

/// Replay a template over a JSON string (element-wise for arrays)
#[wasm_bindgen]
pub fn replay_json(template_str: &str, data_str: &str, pretty: bool) -> Result<String, String> {
    let template = parse(template_str)?;
    let data = parse(data_str)?;
    render(&replay_all(&template, &data, &Options::default()), pretty)
}

/// Normalize a JS value directly, without going through a string
#[wasm_bindgen(js_name = normalizeValue)]
pub fn normalize_value(value: JsValue) -> Result<JsValue, JsValue> {
    let v: Value = serde_wasm_bindgen::from_value(value)?;
    let out = normalize(&v);
    Ok(out.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?)
}

/// Get the version of the jsonshape bindings
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Stateful two-step builder for the schema screen.
#[wasm_bindgen]
pub struct SchemaBuilder {
    session: Option<Session>,
    /// Workspace handed over by `setTarget`.
    committed: Option<Workspace>,
}

#[wasm_bindgen]
impl SchemaBuilder {
    #[wasm_bindgen(constructor)]
    pub fn new(source_json: &str) -> Result<SchemaBuilder, String> {
        let source = parse(source_json)?;
        let session = Session::start(Workspace::new(source), Options::default());
        Ok(Self { session: Some(session), committed: None })
    }

    /// Whether the editor should be shown instead of the "no data" placeholder.
    #[wasm_bindgen(js_name = hasData)]
    pub fn has_data(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| jsonshape::normalize::is_usable(s.template()))
    }

    /// "editing", "reviewing" or "done"
    pub fn step(&self) -> String {
        match &self.session {
            Some(s) => s.step().to_string(),
            None => "done".to_string(),
        }
    }

    pub fn template(&self, pretty: bool) -> Result<String, String> {
        let s = self.active()?;
        render(s.template(), pretty)
    }

    pub fn edit(&mut self, json: &str) -> Result<(), String> {
        let value = parse(json)?;
        match self.session.as_mut() {
            Some(s) => {
                s.edit(value);
                Ok(())
            }
            None => Err("schema builder already finished".to_string()),
        }
    }

    /// Confirm the pruning; returns the message to show the user.
    #[wasm_bindgen(js_name = updateSource)]
    pub fn update_source(&mut self) -> Result<String, String> {
        let (next, notice) = self.active()?.clone().update_source().map_err(|e| e.to_string())?;
        self.session = Some(next);
        log_notice(&notice);
        Ok(notice.message)
    }

    /// Save the reviewed value as the target; returns the route to navigate to.
    #[wasm_bindgen(js_name = setTarget)]
    pub fn set_target(&mut self) -> Result<String, String> {
        let done = self.active()?.clone().set_target().map_err(|e| e.to_string())?;
        self.session = None;
        log_notice(&done.notice);
        self.committed = Some(done.workspace);
        Ok(done.route.path().to_string())
    }

    pub fn source(&self, pretty: bool) -> Result<String, String> {
        render(&self.workspace()?.source, pretty)
    }

    /// The committed target, or `null` before `setTarget`.
    pub fn target(&self, pretty: bool) -> Result<String, String> {
        let workspace = self.workspace()?;
        render(workspace.target.as_ref().unwrap_or(&Value::Null), pretty)
    }
}

impl SchemaBuilder {
    fn workspace(&self) -> Result<&Workspace, String> {
        match (&self.session, &self.committed) {
            (Some(s), _) => Ok(s.workspace()),
            (None, Some(w)) => Ok(w),
            (None, None) => Err("schema builder has no workspace".to_string()),
        }
    }

    fn active(&self) -> Result<&Session, String> {
        self.session
            .as_ref()
            .ok_or_else(|| "schema builder already finished".to_string())
    }
}
