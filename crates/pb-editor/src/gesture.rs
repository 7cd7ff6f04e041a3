//! Canvas interaction controller.
//!
//! A small state machine that turns normalized pointer events into
//! `GestureEffect`s. It reads the component list but never writes it and
//! never touches history: the editor shell applies the effects.
//!
//! ```text
//!            press body                  press handle (selected, offered)
//!   Idle ──────────────▶ Dragging    Idle ───────────────────────────────▶ Resizing
//!     ▲                     │          ▲                                       │
//!     └──── release/cancel ─┘          └──────────── release/cancel ───────────┘
//! ```
//!
//! A press while a gesture is already running is ignored.

use crate::input::{InputEvent, PressTarget};
use pb_core::geometry::{clamp_drag_position, clamp_resize};
use pb_core::{Bounds, Component, ComponentId, Handle, Point, Size};

/// What the editor should do in response to an input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEffect {
    /// Change the selection (`None` = deselect).
    Select(Option<ComponentId>),
    /// A drag or resize started; open a history batch.
    Begin,
    /// Live drag update.
    Move { id: ComponentId, position: Point },
    /// Live resize update.
    Resize { id: ComponentId, bounds: Bounds },
    /// The gesture finished; commit the batch.
    End,
    /// The gesture was aborted; roll the batch back.
    Cancel,
}

/// Current gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging {
        id: ComponentId,
        /// Press point minus the component's top-left at press time.
        anchor: Point,
    },
    Resizing {
        id: ComponentId,
        handle: Handle,
        /// Press point; move deltas are measured from here.
        start: Point,
        start_size: Size,
        start_position: Point,
        allow_vertical: bool,
    },
}

impl GestureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, GestureState::Idle)
    }

    /// Component being dragged or resized.
    pub fn target(&self) -> Option<ComponentId> {
        match self {
            GestureState::Idle => None,
            GestureState::Dragging { id, .. } | GestureState::Resizing { id, .. } => Some(*id),
        }
    }
}

#[derive(Debug, Default)]
pub struct InteractionController {
    state: GestureState,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        !self.state.is_idle()
    }

    /// Drop any gesture without emitting effects. Used when the component
    /// list is replaced underneath a running gesture.
    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
    }

    /// Feed one event.
    ///
    /// `components` is the list as currently shown, `selected` the current
    /// selection, and `canvas_width` the live canvas pixel width, read at
    /// event time so a window resize mid-drag is honoured.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        components: &[Component],
        selected: Option<ComponentId>,
        canvas_width: f64,
    ) -> Vec<GestureEffect> {
        match *event {
            InputEvent::PointerDown { x, y, target } => {
                if self.is_active() {
                    log::debug!("press ignored: gesture already active");
                    return vec![];
                }
                self.press(Point::new(x, y), target, components, selected)
            }
            InputEvent::PointerMove { x, y } => self.motion(Point::new(x, y), components, canvas_width),
            InputEvent::PointerUp { .. } => self.finish(GestureEffect::End),
            InputEvent::PointerCancel => self.finish(GestureEffect::Cancel),
        }
    }

    fn press(
        &mut self,
        point: Point,
        target: PressTarget,
        components: &[Component],
        selected: Option<ComponentId>,
    ) -> Vec<GestureEffect> {
        match target {
            PressTarget::Canvas => vec![GestureEffect::Select(None)],
            PressTarget::Body(id) => {
                let Some(component) = components.iter().find(|c| c.id == id) else {
                    log::debug!("press on unknown component {id}");
                    return vec![];
                };
                self.state = GestureState::Dragging {
                    id,
                    anchor: point - component.position,
                };
                vec![GestureEffect::Select(Some(id)), GestureEffect::Begin]
            }
            PressTarget::Handle(id, handle) => {
                if selected != Some(id) {
                    log::debug!("handle {handle} pressed on unselected {id}");
                    return vec![];
                }
                let Some(component) = components.iter().find(|c| c.id == id) else {
                    return vec![];
                };
                if !component.kind.resize_handles().contains(&handle) {
                    log::debug!("{} offers no {handle} handle", component.kind);
                    return vec![];
                }
                self.state = GestureState::Resizing {
                    id,
                    handle,
                    start: point,
                    start_size: component.size(),
                    start_position: component.position,
                    allow_vertical: component.kind.allows_vertical_resize(),
                };
                vec![GestureEffect::Begin]
            }
        }
    }

    fn motion(&mut self, point: Point, components: &[Component], canvas_width: f64) -> Vec<GestureEffect> {
        match self.state {
            GestureState::Idle => vec![],
            GestureState::Dragging { id, anchor } => {
                let Some(component) = components.iter().find(|c| c.id == id) else {
                    return vec![];
                };
                let position = clamp_drag_position(point, anchor, component.width(), canvas_width);
                log::trace!("drag {id} -> ({}, {})", position.x, position.y);
                vec![GestureEffect::Move { id, position }]
            }
            GestureState::Resizing {
                id,
                handle,
                start,
                start_size,
                start_position,
                allow_vertical,
            } => {
                let bounds = clamp_resize(
                    handle,
                    start_size,
                    start_position,
                    point - start,
                    canvas_width,
                    allow_vertical,
                );
                log::trace!(
                    "resize {id} {handle} -> ({}, {}) {}x{}",
                    bounds.position.x,
                    bounds.position.y,
                    bounds.size.width,
                    bounds.size.height
                );
                vec![GestureEffect::Resize { id, bounds }]
            }
        }
    }

    fn finish(&mut self, effect: GestureEffect) -> Vec<GestureEffect> {
        if self.state.is_idle() {
            return vec![];
        }
        self.state = GestureState::Idle;
        vec![effect]
    }
}
