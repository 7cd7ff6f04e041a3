//! Editor shell: the single owner of all mutable editor state.
//!
//! Holds the component history, the selection, the canvas width and the
//! interaction controller. Every command builds a new component list from
//! the current one and pushes it to history; commands that would not change
//! anything push nothing, so they never create empty undo steps.

use crate::config::EditorConfig;
use crate::gesture::{GestureEffect, InteractionController};
use crate::history::History;
use crate::input::{InputEvent, Modifiers, PressTarget};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use pb_core::geometry::{clamp_to_canvas, drop_position};
use pb_core::project::{MAX_CANVAS_WIDTH, MIN_CANVAS_WIDTH, clamp_canvas_width};
use pb_core::{Component, ComponentId, ComponentKind, ComponentPatch, Point, ProjectError, ordering};
use serde::Serialize;

// ─── Canvas width ────────────────────────────────────────────────────────

/// Contents of the canvas-width field, which may be transiently blank or
/// out of range while the user types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasWidthInput {
    Blank,
    Value(i64),
}

impl CanvasWidthInput {
    /// Parse field text the way a number input is read: leading whitespace,
    /// optional sign, then digits; anything after the digits is ignored.
    /// Returns `None` when the text holds no number at all.
    pub fn parse(text: &str) -> Option<Self> {
        if text.is_empty() {
            return Some(CanvasWidthInput::Blank);
        }
        let trimmed = text.trim_start();
        let (sign, rest) = match trimmed.as_bytes().first() {
            Some(b'-') => (-1, &trimmed[1..]),
            Some(b'+') => (1, &trimmed[1..]),
            _ => (1, trimmed),
        };
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        // Overlong digit runs saturate
        let value = rest[..digits].parse::<i64>().unwrap_or(i64::MAX);
        Some(CanvasWidthInput::Value(sign * value))
    }

    /// Percentage used for display and export while the field is a draft.
    pub fn effective(&self) -> u32 {
        match self {
            CanvasWidthInput::Blank => MAX_CANVAS_WIDTH,
            CanvasWidthInput::Value(v) => clamp_canvas_width(*v as f64),
        }
    }

    /// Value the field snaps to on commit: blank counts as too small.
    pub fn committed(&self) -> u32 {
        match self {
            CanvasWidthInput::Blank => MIN_CANVAS_WIDTH,
            CanvasWidthInput::Value(v) => clamp_canvas_width(*v as f64),
        }
    }

    /// Text to show in the field.
    pub fn text(&self) -> String {
        match self {
            CanvasWidthInput::Blank => String::new(),
            CanvasWidthInput::Value(v) => v.to_string(),
        }
    }
}

// ─── State snapshot ──────────────────────────────────────────────────────

/// Everything the host needs to render, in one serializable value.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSnapshot<'a> {
    pub components: &'a [Component],
    pub selected_id: Option<ComponentId>,
    pub can_undo: bool,
    pub can_redo: bool,
    /// Effective width percentage.
    pub canvas_width: u32,
    /// Raw contents of the width field.
    pub canvas_width_input: String,
    pub canvas_pixel_width: f64,
}

// ─── Editor ──────────────────────────────────────────────────────────────

pub struct Editor {
    history: History<Vec<Component>>,
    selected: Option<ComponentId>,
    canvas_width: CanvasWidthInput,
    canvas_pixel_width: f64,
    controller: InteractionController,
    config: EditorConfig,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        let config = config.normalized();
        Self {
            history: History::with_limit(Vec::new(), config.history_limit),
            selected: None,
            canvas_width: CanvasWidthInput::Value(i64::from(config.canvas_width)),
            canvas_pixel_width: config.canvas_pixel_width,
            controller: InteractionController::new(),
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The component list as currently shown (including a live gesture).
    pub fn components(&self) -> &[Component] {
        self.history.current()
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components().iter().find(|c| c.id == id)
    }

    pub fn snapshot(&self) -> EditorSnapshot<'_> {
        EditorSnapshot {
            components: self.components(),
            selected_id: self.selected,
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            canvas_width: self.canvas_width_percent(),
            canvas_width_input: self.canvas_width.text(),
            canvas_pixel_width: self.canvas_pixel_width,
        }
    }

    /// Push `next` unless it equals the current list.
    fn commit(&mut self, next: Vec<Component>, what: &str) -> bool {
        if next == *self.history.current() {
            log::debug!("{what}: no change");
            return false;
        }
        if self.history.is_batching() {
            log::trace!("{what}: preview");
        } else {
            log::debug!("{what}: {} components", next.len());
        }
        self.history.push(next);
        true
    }

    /// Drop the selection if it points at a component that no longer exists.
    fn reconcile_selection(&mut self) {
        if let Some(id) = self.selected
            && self.component(id).is_none()
        {
            log::debug!("selection {id} cleared: component gone");
            self.selected = None;
        }
    }

    // ─── Adding ──────────────────────────────────────────────────────────

    /// Add a palette component at `position` (clamped to the canvas) and
    /// select it.
    pub fn add_component(&mut self, kind: ComponentKind, position: Point) -> ComponentId {
        let position = clamp_to_canvas(position, kind.default_width(), self.canvas_pixel_width);
        let component = Component::new(kind, position);
        let id = component.id;
        let mut next = self.components().to_vec();
        next.push(component);
        self.commit(next, "add");
        self.selected = Some(id);
        id
    }

    /// Add a component dropped from the palette. `pointer` and
    /// `canvas_origin` are in the same (viewport) coordinate space.
    pub fn drop_component(&mut self, kind: ComponentKind, pointer: Point, canvas_origin: Point) -> ComponentId {
        self.add_component(kind, drop_position(pointer, canvas_origin))
    }

    // ─── Editing ─────────────────────────────────────────────────────────

    /// Merge `patch` into component `id`, then clamp its position to the
    /// canvas using the merged width. Unknown id → no-op.
    pub fn update_component(&mut self, id: ComponentId, patch: &ComponentPatch) -> bool {
        if patch.is_empty() {
            return false;
        }
        let mut next = self.components().to_vec();
        let Some(component) = next.iter_mut().find(|c| c.id == id) else {
            log::debug!("update: unknown component {id}");
            return false;
        };
        component.apply(patch);
        component.position = clamp_to_canvas(component.position, component.width(), self.canvas_pixel_width);
        self.commit(next, "update")
    }

    pub fn delete_component(&mut self, id: ComponentId) -> bool {
        let next: Vec<Component> = self.components().iter().filter(|c| c.id != id).cloned().collect();
        if next.len() == self.components().len() {
            log::debug!("delete: unknown component {id}");
            return false;
        }
        let changed = self.commit(next, "delete");
        self.reconcile_selection();
        changed
    }

    pub fn delete_selected(&mut self) -> bool {
        match self.selected {
            Some(id) => self.delete_component(id),
            None => false,
        }
    }

    /// Append a copy of `id` shifted by the configured offset, clamped to
    /// the canvas, and select it.
    pub fn duplicate_component(&mut self, id: ComponentId) -> Option<ComponentId> {
        let Some(original) = self.component(id) else {
            log::debug!("duplicate: unknown component {id}");
            return None;
        };
        let mut copy = ordering::duplicate(original, self.config.duplicate_offset);
        copy.position = clamp_to_canvas(copy.position, copy.width(), self.canvas_pixel_width);
        let copy_id = copy.id;
        let mut next = self.components().to_vec();
        next.push(copy);
        self.commit(next, "duplicate");
        self.selected = Some(copy_id);
        Some(copy_id)
    }

    pub fn duplicate_selected(&mut self) -> Option<ComponentId> {
        self.selected.and_then(|id| self.duplicate_component(id))
    }

    /// Remove every component. No-op on an empty canvas.
    pub fn clear_canvas(&mut self) -> bool {
        if self.components().is_empty() {
            return false;
        }
        let changed = self.commit(Vec::new(), "clear");
        self.selected = None;
        changed
    }

    // ─── Layering ────────────────────────────────────────────────────────

    pub fn bring_to_front(&mut self, id: ComponentId) -> bool {
        let next = ordering::bring_to_front(self.components(), id);
        self.commit(next, "bring to front")
    }

    pub fn send_to_back(&mut self, id: ComponentId) -> bool {
        let next = ordering::send_to_back(self.components(), id);
        self.commit(next, "send to back")
    }

    pub fn bring_forward(&mut self, id: ComponentId) -> bool {
        let next = ordering::bring_forward(self.components(), id);
        self.commit(next, "bring forward")
    }

    pub fn send_backward(&mut self, id: ComponentId) -> bool {
        let next = ordering::send_backward(self.components(), id);
        self.commit(next, "send backward")
    }

    pub fn bring_selected_to_front(&mut self) -> bool {
        self.selected.is_some_and(|id| self.bring_to_front(id))
    }

    pub fn send_selected_to_back(&mut self) -> bool {
        self.selected.is_some_and(|id| self.send_to_back(id))
    }

    pub fn bring_selected_forward(&mut self) -> bool {
        self.selected.is_some_and(|id| self.bring_forward(id))
    }

    pub fn send_selected_backward(&mut self) -> bool {
        self.selected.is_some_and(|id| self.send_backward(id))
    }

    // ─── Selection ───────────────────────────────────────────────────────

    /// Select `id`, or clear the selection with `None`. Selecting an id that
    /// is not on the canvas clears the selection.
    pub fn select(&mut self, id: Option<ComponentId>) {
        self.selected = id.filter(|id| self.component(*id).is_some());
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<ComponentId> {
        self.selected
    }

    pub fn selected_component(&self) -> Option<&Component> {
        self.selected.and_then(|id| self.component(id))
    }

    // ─── History ─────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        self.controller.reset();
        let moved = self.history.undo();
        self.reconcile_selection();
        moved
    }

    pub fn redo(&mut self) -> bool {
        self.controller.reset();
        let moved = self.history.redo();
        self.reconcile_selection();
        moved
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &History<Vec<Component>> {
        &self.history
    }

    // ─── Canvas width ────────────────────────────────────────────────────

    /// Store field text as a draft. Text with no number in it is ignored.
    pub fn set_canvas_width_draft(&mut self, text: &str) {
        match CanvasWidthInput::parse(text) {
            Some(input) => self.canvas_width = input,
            None => log::debug!("canvas width: ignoring non-numeric {text:?}"),
        }
    }

    /// Snap the draft into 10–100 (blank counts as 10).
    pub fn commit_canvas_width(&mut self) -> u32 {
        let width = self.canvas_width.committed();
        self.canvas_width = CanvasWidthInput::Value(i64::from(width));
        width
    }

    pub fn canvas_width_input(&self) -> CanvasWidthInput {
        self.canvas_width
    }

    /// Effective width percentage.
    pub fn canvas_width_percent(&self) -> u32 {
        self.canvas_width.effective()
    }

    /// Record the live pixel width of the canvas element. Non-finite or
    /// negative values are ignored.
    pub fn set_canvas_pixel_width(&mut self, width: f64) {
        if width.is_finite() && width >= 0.0 {
            self.canvas_pixel_width = width;
        } else {
            log::debug!("canvas pixel width: ignoring {width}");
        }
    }

    pub fn canvas_pixel_width(&self) -> f64 {
        self.canvas_pixel_width
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    pub fn pointer_down(&mut self, x: f64, y: f64, target: PressTarget) -> bool {
        !self.handle_input(&InputEvent::from_pointer_down(x, y, target)).is_empty()
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        !self.handle_input(&InputEvent::from_pointer_move(x, y)).is_empty()
    }

    pub fn pointer_up(&mut self, x: f64, y: f64) -> bool {
        !self.handle_input(&InputEvent::from_pointer_up(x, y)).is_empty()
    }

    pub fn pointer_cancel(&mut self) -> bool {
        !self.handle_input(&InputEvent::PointerCancel).is_empty()
    }

    pub fn is_gesture_active(&self) -> bool {
        self.controller.is_active()
    }

    /// Run one event through the controller and apply what it emits.
    pub fn handle_input(&mut self, event: &InputEvent) -> Vec<GestureEffect> {
        let effects = self.controller.handle(
            event,
            self.history.current(),
            self.selected,
            self.canvas_pixel_width,
        );
        for effect in &effects {
            self.apply_effect(*effect);
        }
        effects
    }

    fn apply_effect(&mut self, effect: GestureEffect) {
        match effect {
            GestureEffect::Select(id) => self.select(id),
            GestureEffect::Begin => self.history.begin_batch(),
            GestureEffect::Move { id, position } => {
                self.update_component(id, &ComponentPatch::position(position));
            }
            GestureEffect::Resize { id, bounds } => {
                self.update_component(id, &ComponentPatch::bounds(bounds.position, bounds.size));
            }
            GestureEffect::End => {
                if self.history.end_batch() {
                    log::debug!("gesture committed ({} snapshots)", self.history.len());
                }
            }
            GestureEffect::Cancel => {
                self.history.cancel_batch();
                self.reconcile_selection();
                log::debug!("gesture cancelled");
            }
        }
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    /// Resolve and run a shortcut. Returns the action only if it applied:
    /// selection-dependent actions with nothing selected return `None`, so
    /// the host can leave the key event alone.
    pub fn handle_key(&mut self, key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        let action = ShortcutMap::resolve_with(key, modifiers)?;
        if action.needs_selection() && self.selected.is_none() {
            return None;
        }
        self.run_action(action);
        Some(action)
    }

    pub fn run_action(&mut self, action: ShortcutAction) {
        match action {
            ShortcutAction::Undo => {
                self.undo();
            }
            ShortcutAction::Redo => {
                self.redo();
            }
            ShortcutAction::Delete => {
                self.delete_selected();
            }
            ShortcutAction::Duplicate => {
                self.duplicate_selected();
            }
            ShortcutAction::BringForward => {
                self.bring_selected_forward();
            }
            ShortcutAction::SendBackward => {
                self.send_selected_backward();
            }
            ShortcutAction::BringToFront => {
                self.bring_selected_to_front();
            }
            ShortcutAction::SendToBack => {
                self.send_selected_to_back();
            }
            ShortcutAction::Deselect => self.deselect(),
        }
    }

    // ─── Import / export ─────────────────────────────────────────────────

    pub fn export_json(&self) -> String {
        pb_core::export_json(self.components(), self.canvas_width_percent())
    }

    pub fn export_html(&self) -> String {
        pb_core::export_html(self.components(), self.canvas_width_percent(), self.canvas_pixel_width)
    }

    /// Replace the whole canvas with a project file's contents as one undo
    /// step. On error nothing changes.
    ///
    /// # Errors
    /// Returns the [`ProjectError`] describing why the file was rejected.
    pub fn import_json(&mut self, json: &str) -> Result<(), ProjectError> {
        let project = pb_core::import_json(json).inspect_err(|e| log::warn!("import rejected: {e}"))?;
        self.controller.reset();
        self.history.cancel_batch();
        let mut components = project.components;
        for c in &mut components {
            c.position = clamp_to_canvas(c.position, c.width(), self.canvas_pixel_width);
        }
        self.commit(components, "import");
        self.canvas_width = CanvasWidthInput::Value(i64::from(clamp_canvas_width(project.canvas_width)));
        self.selected = None;
        Ok(())
    }
}
