//! Fitness Coach WASM Module
//!
//! This crate exposes the plan workspace to a browser host. The host sends
//! events as JSON, performs the returned effects itself (fetches, audio,
//! downloads), and reports their outcomes back as further events.

use fitness_coach_shared::view::Screen;
use fitness_coach_shared::{update, Event, WorkspaceState, EXPORT_FILE_NAME};
use wasm_bindgen::prelude::*;

/// Browser-side plan workspace
#[wasm_bindgen]
#[derive(Default)]
pub struct PlanWorkspace {
    state: WorkspaceState,
}

#[wasm_bindgen]
impl PlanWorkspace {
    #[wasm_bindgen(constructor)]
    pub fn new() -> PlanWorkspace {
        PlanWorkspace::default()
    }

    /// Rebuild a workspace from `stateJson()` output
    pub fn restore(state_json: &str) -> Result<PlanWorkspace, JsValue> {
        let state = serde_json::from_str(state_json).map_err(to_js)?;
        Ok(PlanWorkspace { state })
    }

    /// Apply one event; returns the effects as a JSON array
    pub fn dispatch(&mut self, event_json: &str) -> Result<String, JsValue> {
        self.dispatch_json(event_json).map_err(|err| JsValue::from_str(&err))
    }

    #[wasm_bindgen(js_name = viewJson)]
    pub fn view_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&Screen::from_state(&self.state)).map_err(to_js)
    }

    #[wasm_bindgen(js_name = stateJson)]
    pub fn state_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state).map_err(to_js)
    }
}

impl PlanWorkspace {
    fn dispatch_json(&mut self, event_json: &str) -> Result<String, String> {
        let event: Event =
            serde_json::from_str(event_json).map_err(|err| format!("Invalid event: {}", err))?;
        let effects = update(&mut self.state, event);
        serde_json::to_string(&effects).map_err(|err| err.to_string())
    }
}

/// File name the host should save an exported plan under
#[wasm_bindgen(js_name = exportFileName)]
pub fn export_file_name() -> String {
    EXPORT_FILE_NAME.to_string()
}

fn to_js(err: serde_json::Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}
