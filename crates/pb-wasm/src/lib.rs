//! WASM bridge for PB: exposes the page builder engine to JavaScript.
//!
//! Compiled via `wasm-pack build --target web` and driven by the browser
//! host, which owns the DOM. The host forwards pointer and key events with
//! canvas-local coordinates and re-renders from `state()` after each call.

use pb_core::{ComponentId, ComponentKind, ComponentPatch, Point};
use pb_editor::{Editor, EditorConfig, Modifiers, PressTarget};
use wasm_bindgen::prelude::*;

/// The main WASM-facing editor.
///
/// Wraps the editor shell; every interaction from the host goes through it.
#[wasm_bindgen]
pub struct PbEditor {
    editor: Editor,
}

#[wasm_bindgen]
impl PbEditor {
    /// Create an editor. `config_json` is an optional `EditorConfig`
    /// document; an invalid one falls back to defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Self {
        console_error_panic_hook_setup();
        console_logger_setup();

        let config = match config_json.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(json) => EditorConfig::from_json(json).unwrap_or_else(|e| {
                log::warn!("invalid editor config, using defaults: {e}");
                EditorConfig::default()
            }),
            None => EditorConfig::default(),
        };
        Self {
            editor: Editor::new(config),
        }
    }

    // ─── State ───────────────────────────────────────────────────────────

    /// `{components, selectedId, canUndo, canRedo, canvasWidth, ...}` as a
    /// JS object.
    pub fn state(&self) -> JsValue {
        js_sys::JSON::parse(&self.state_json()).unwrap_or(JsValue::NULL)
    }

    /// Same as `state()`, as a JSON string.
    pub fn state_json(&self) -> String {
        serde_json::to_string(&self.editor.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }

    /// The component list as a JSON array.
    pub fn components_json(&self) -> String {
        serde_json::to_string(self.editor.components()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Currently selected component ID, or empty string if none.
    pub fn get_selected_id(&self) -> String {
        self.editor
            .selected_id()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    /// Select a component by ID; an empty ID deselects.
    /// Returns `true` if the selection now matches the request.
    pub fn select_by_id(&mut self, id: &str) -> bool {
        if id.is_empty() {
            self.editor.deselect();
            return true;
        }
        let Some(id) = known_id(id) else {
            return false;
        };
        self.editor.select(Some(id));
        self.editor.selected_id() == Some(id)
    }

    // ─── Commands ────────────────────────────────────────────────────────

    /// Add a component of `kind` at canvas-local `(x, y)`.
    /// Returns the new ID, or empty string for an unknown kind.
    pub fn add_component(&mut self, kind: &str, x: f64, y: f64) -> String {
        match ComponentKind::from_name(kind) {
            Some(kind) => self.editor.add_component(kind, Point::new(x, y)).as_str().to_string(),
            None => {
                log::warn!("unknown component type {kind:?}");
                String::new()
            }
        }
    }

    /// Add a component dropped from the palette at viewport point
    /// `(x, y)` onto a canvas whose top-left is at `(origin_x, origin_y)`.
    pub fn drop_component(&mut self, kind: &str, x: f64, y: f64, origin_x: f64, origin_y: f64) -> String {
        match ComponentKind::from_name(kind) {
            Some(kind) => self
                .editor
                .drop_component(kind, Point::new(x, y), Point::new(origin_x, origin_y))
                .as_str()
                .to_string(),
            None => {
                log::warn!("unknown component type {kind:?}");
                String::new()
            }
        }
    }

    /// Apply a JSON patch `{"position": {...}, "props": {...}}`; both keys
    /// are optional. Returns `true` if the component changed.
    pub fn update_component(&mut self, id: &str, patch_json: &str) -> bool {
        let Some(id) = known_id(id) else {
            return false;
        };
        match serde_json::from_str::<ComponentPatch>(patch_json) {
            Ok(patch) => self.editor.update_component(id, &patch),
            Err(e) => {
                log::warn!("invalid patch for {id}: {e}");
                false
            }
        }
    }

    pub fn delete_component(&mut self, id: &str) -> bool {
        known_id(id).is_some_and(|id| self.editor.delete_component(id))
    }

    pub fn delete_selected(&mut self) -> bool {
        self.editor.delete_selected()
    }

    /// Duplicate a component. Returns the copy's ID, or empty string.
    pub fn duplicate_component(&mut self, id: &str) -> String {
        known_id(id)
            .and_then(|id| self.editor.duplicate_component(id))
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    pub fn duplicate_selected(&mut self) -> String {
        self.editor
            .duplicate_selected()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    pub fn bring_to_front(&mut self, id: &str) -> bool {
        known_id(id).is_some_and(|id| self.editor.bring_to_front(id))
    }

    pub fn send_to_back(&mut self, id: &str) -> bool {
        known_id(id).is_some_and(|id| self.editor.send_to_back(id))
    }

    pub fn bring_forward(&mut self, id: &str) -> bool {
        known_id(id).is_some_and(|id| self.editor.bring_forward(id))
    }

    pub fn send_backward(&mut self, id: &str) -> bool {
        known_id(id).is_some_and(|id| self.editor.send_backward(id))
    }

    /// Remove everything. The host asks for confirmation first.
    pub fn clear_canvas(&mut self) -> bool {
        self.editor.clear_canvas()
    }

    pub fn undo(&mut self) -> bool {
        self.editor.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.editor.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.editor.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.editor.can_redo()
    }

    // ─── Canvas width ────────────────────────────────────────────────────

    /// Width field `input` event.
    pub fn set_canvas_width_input(&mut self, text: &str) {
        self.editor.set_canvas_width_draft(text);
    }

    /// Width field `blur` event. Returns the committed percentage.
    pub fn commit_canvas_width(&mut self) -> u32 {
        self.editor.commit_canvas_width()
    }

    /// Effective width percentage.
    pub fn canvas_width(&self) -> u32 {
        self.editor.canvas_width_percent()
    }

    /// Report the canvas element's inner pixel width (on layout/resize).
    pub fn set_canvas_pixel_width(&mut self, width: f64) {
        self.editor.set_canvas_pixel_width(width);
    }

    // ─── Pointer API ─────────────────────────────────────────────────────

    /// Handle pointer down. `target` is `"canvas"`, `"body"` or `"handle"`;
    /// `id` and `handle` describe the hit element when relevant.
    /// Returns `true` if anything changed.
    pub fn handle_pointer_down(
        &mut self,
        x: f64,
        y: f64,
        target: &str,
        id: Option<String>,
        handle: Option<String>,
    ) -> bool {
        let target = PressTarget::from_parts(target, id.as_deref(), handle.as_deref());
        self.editor.pointer_down(x, y, target)
    }

    pub fn handle_pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.editor.pointer_move(x, y)
    }

    /// Listened for at document level so a release outside the canvas
    /// still ends the gesture.
    pub fn handle_pointer_up(&mut self, x: f64, y: f64) -> bool {
        self.editor.pointer_up(x, y)
    }

    pub fn handle_pointer_cancel(&mut self) -> bool {
        self.editor.pointer_cancel()
    }

    // ─── Keyboard Shortcut API ───────────────────────────────────────────

    /// Handle a keyboard event. Returns the action name (e.g. `"undo"`),
    /// or `"none"` when nothing applied and the host should let the event
    /// through.
    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> String {
        let modifiers = Modifiers {
            ctrl,
            shift,
            alt,
            meta,
        };
        self.editor
            .handle_key(key, modifiers)
            .map_or("none", |action| action.as_str())
            .to_string()
    }

    // ─── Import / export ─────────────────────────────────────────────────

    pub fn export_json(&self) -> String {
        self.editor.export_json()
    }

    pub fn export_html(&self) -> String {
        self.editor.export_html()
    }

    /// Replace the canvas with a project file. Returns empty string on
    /// success, otherwise a message for the user.
    pub fn import_json(&mut self, json: &str) -> String {
        match self.editor.import_json(json) {
            Ok(()) => String::new(),
            Err(e) => format!("Failed to import: {e}"),
        }
    }
}

/// Resolve a host-supplied ID without interning unknown strings.
fn known_id(id: &str) -> Option<ComponentId> {
    let found = ComponentId::lookup(id);
    if found.is_none() {
        log::debug!("unknown component id {id:?}");
    }
    found
}

// ─── Standalone functions (no editor needed) ─────────────────────────────

/// Palette entries as JSON: `[{"type":"text","label":"Text","props":{...}}, ...]`.
#[wasm_bindgen]
pub fn palette_json() -> String {
    let entries: Vec<serde_json::Value> = ComponentKind::ALL
        .iter()
        .map(|kind| {
            serde_json::json!({
                "type": kind.as_str(),
                "label": kind.label(),
                "resizable": kind.is_resizable(),
                "handles": kind.resize_handles().iter().map(|h| h.as_str()).collect::<Vec<_>>(),
                "props": kind.default_props(),
            })
        })
        .collect();
    serde_json::Value::Array(entries).to_string()
}

// ─── Console logging ─────────────────────────────────────────────────────

#[cfg(target_arch = "wasm32")]
struct ConsoleLogger;

#[cfg(target_arch = "wasm32")]
static LOGGER: ConsoleLogger = ConsoleLogger;

#[cfg(target_arch = "wasm32")]
impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg: JsValue = format!("[{}] {}", record.target(), record.args()).into();
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&msg),
            log::Level::Warn => web_sys::console::warn_1(&msg),
            log::Level::Info => web_sys::console::info_1(&msg),
            log::Level::Debug | log::Level::Trace => web_sys::console::debug_1(&msg),
        }
    }

    fn flush(&self) {}
}

fn console_logger_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(log::LevelFilter::Info);
        }
    }
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("PB WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn state(ed: &PbEditor) -> serde_json::Value {
        serde_json::from_str(&ed.state_json()).unwrap()
    }

    #[test]
    fn invalid_config_falls_back_to_defaults() {
        let ed = PbEditor::new(Some("{not json".to_string()));
        assert_eq!(ed.canvas_width(), 100);
        let ed = PbEditor::new(Some(r#"{"canvasWidth": 50}"#.to_string()));
        assert_eq!(ed.canvas_width(), 50);
    }

    #[test]
    fn add_and_drag_through_the_bridge() {
        let mut ed = PbEditor::new(None);
        let id = ed.add_component("flexbox", 100.0, 50.0);
        assert!(!id.is_empty());
        assert_eq!(ed.get_selected_id(), id);

        assert!(ed.handle_pointer_down(110.0, 60.0, "body", Some(id.clone()), None));
        assert!(ed.handle_pointer_move(1160.0, 60.0));
        assert!(ed.handle_pointer_up(1160.0, 60.0));

        let s = state(&ed);
        assert_eq!(s["components"][0]["position"]["x"], 1000.0);
        assert_eq!(s["canUndo"], true);
        assert_eq!(s["selectedId"], id.as_str());
    }

    #[test]
    fn unknown_kind_and_ids_are_rejected() {
        let mut ed = PbEditor::new(None);
        assert_eq!(ed.add_component("marquee", 0.0, 0.0), "");
        assert!(!ed.delete_component("wasm-never-seen"));
        assert!(!ed.select_by_id("wasm-never-seen-either"));
        assert_eq!(ed.duplicate_component("wasm-nope"), "");
        assert!(!ed.update_component("wasm-nope", "{}"));
    }

    #[test]
    fn update_component_takes_json_patch() {
        let mut ed = PbEditor::new(None);
        let id = ed.add_component("text", 0.0, 0.0);
        assert!(ed.update_component(&id, r#"{"props": {"content": "Hi", "fontSize": 24}}"#));
        assert!(!ed.update_component(&id, "not a patch"));
        let s = state(&ed);
        assert_eq!(s["components"][0]["props"]["content"], "Hi");
        assert_eq!(s["components"][0]["props"]["fontSize"], 24);
    }

    #[test]
    fn handle_key_reports_action_name() {
        let mut ed = PbEditor::new(None);
        ed.add_component("image", 0.0, 0.0);
        assert_eq!(ed.handle_key("d", true, false, false, false), "duplicate");
        assert_eq!(ed.handle_key("z", false, false, false, true), "undo");
        assert_eq!(ed.handle_key("q", false, false, false, false), "none");
    }

    #[test]
    fn import_errors_are_messages() {
        let mut ed = PbEditor::new(None);
        assert_eq!(
            ed.import_json(r#"{"canvasWidth": 90}"#),
            "Failed to import: Invalid JSON format: missing components array"
        );
        assert_eq!(ed.import_json(r#"{"canvasWidth": 90, "components": []}"#), "");
        assert_eq!(ed.canvas_width(), 90);
    }

    #[test]
    fn canvas_width_field_lifecycle() {
        let mut ed = PbEditor::new(None);
        ed.set_canvas_width_input("");
        assert_eq!(ed.canvas_width(), 100);
        assert_eq!(ed.commit_canvas_width(), 10);
        ed.set_canvas_width_input("55");
        assert_eq!(ed.commit_canvas_width(), 55);
    }

    #[test]
    fn palette_lists_every_kind() {
        let v: serde_json::Value = serde_json::from_str(&palette_json()).unwrap();
        let types: Vec<&str> = v
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|e| e["type"].as_str())
            .collect();
        assert_eq!(types, ["text", "textarea", "flexbox", "image", "button"]);
        assert_eq!(v[4]["resizable"], false);
        assert_eq!(v[0]["handles"], serde_json::json!(["e", "w"]));
    }
}
