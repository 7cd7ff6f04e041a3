//! Input abstraction layer.
//!
//! Normalizes mouse and touch events into a unified `InputEvent` enum
//! consumed by the interaction controller. Coordinates are canvas-local
//! pixels; the host subtracts the canvas origin before calling in.

use pb_core::{ComponentId, Handle};

/// What the pointer landed on when it was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressTarget {
    /// Empty canvas background.
    Canvas,
    /// The body of a component.
    Body(ComponentId),
    /// One of the resize handles of a component.
    Handle(ComponentId, Handle),
}

impl PressTarget {
    /// Build a target from the host's description of the hit.
    ///
    /// `kind` is `"canvas"`, `"body"` or `"handle"`. Anything the engine
    /// cannot resolve falls back to `Canvas`: an unknown kind, a bad handle
    /// name, or an id that was never interned. Host ids are looked up, not
    /// interned.
    pub fn from_parts(kind: &str, id: Option<&str>, handle: Option<&str>) -> Self {
        let id = id.and_then(ComponentId::lookup);
        match (kind, id) {
            ("body", Some(id)) => PressTarget::Body(id),
            ("handle", Some(id)) => match handle.and_then(Handle::from_name) {
                Some(h) => PressTarget::Handle(id, h),
                None => PressTarget::Canvas,
            },
            _ => PressTarget::Canvas,
        }
    }

    /// The component under the pointer, if any.
    pub fn component(&self) -> Option<ComponentId> {
        match self {
            PressTarget::Canvas => None,
            PressTarget::Body(id) | PressTarget::Handle(id, _) => Some(*id),
        }
    }
}

/// A normalized input event from any pointing device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed (mouse down, touch start).
    PointerDown { x: f64, y: f64, target: PressTarget },

    /// Pointer moved (mouse move, touch move).
    PointerMove { x: f64, y: f64 },

    /// Pointer released. The host listens for this at document level so a
    /// release outside the canvas still ends the gesture.
    PointerUp { x: f64, y: f64 },

    /// Gesture aborted (touch cancel, window blur).
    PointerCancel,
}

impl InputEvent {
    pub fn from_pointer_down(x: f64, y: f64, target: PressTarget) -> Self {
        Self::PointerDown { x, y, target }
    }

    pub fn from_pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn from_pointer_up(x: f64, y: f64) -> Self {
        Self::PointerUp { x, y }
    }

    /// Extract position if this is a pointer event with coordinates.
    pub fn position(&self) -> Option<(f64, f64)> {
        match self {
            Self::PointerDown { x, y, .. } | Self::PointerMove { x, y } | Self::PointerUp { x, y } => {
                Some((*x, *y))
            }
            Self::PointerCancel => None,
        }
    }
}

/// Modifier keys held during a key event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    };

    /// Ctrl on Linux/Windows, ⌘ on macOS.
    pub fn cmd(&self) -> bool {
        self.ctrl || self.meta
    }
}
