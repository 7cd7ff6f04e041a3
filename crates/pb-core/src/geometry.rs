//! Canvas geometry: drag, resize and drop math under boundary constraints.
//!
//! All functions here are pure. The canvas is bounded on the left, right and
//! top; it grows without limit downward, so nothing clamps the bottom edge.
//!
//! ## Resize handles
//!
//! | Handle | Moves edge(s) | Fixed edge(s) |
//! |--------|---------------|---------------|
//! | `n` | top | bottom |
//! | `s` | bottom | top |
//! | `e` | right | left |
//! | `w` | left | right |
//! | `ne` / `nw` / `se` / `sw` | the two named | the two opposite |
//!
//! When the canvas boundary and the 50px floor disagree, the canvas clamp is
//! applied first and the floor last, so sizes never drop below the floor and
//! `x` never goes negative. The right edge may overflow in that case.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Smallest width/height a resize may produce, in pixels.
pub const MIN_SIZE: f64 = 50.0;

// ─── Primitives ──────────────────────────────────────────────────────────

/// A canvas-relative point (or offset) in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Width × height in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Position plus size, as produced by a resize.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub position: Point,
    pub size: Size,
}

impl Bounds {
    pub fn right(&self) -> f64 {
        self.position.x + self.size.width
    }

    pub fn bottom(&self) -> f64 {
        self.position.y + self.size.height
    }
}

// ─── Handles ─────────────────────────────────────────────────────────────

/// A named resize handle on a selected component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl Handle {
    pub const ALL: [Handle; 8] = [
        Handle::N,
        Handle::S,
        Handle::E,
        Handle::W,
        Handle::NE,
        Handle::NW,
        Handle::SE,
        Handle::SW,
    ];

    /// Parse a handle name (`"n"`, `"se"`, ...). Case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "n" => Some(Handle::N),
            "s" => Some(Handle::S),
            "e" => Some(Handle::E),
            "w" => Some(Handle::W),
            "ne" => Some(Handle::NE),
            "nw" => Some(Handle::NW),
            "se" => Some(Handle::SE),
            "sw" => Some(Handle::SW),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Handle::N => "n",
            Handle::S => "s",
            Handle::E => "e",
            Handle::W => "w",
            Handle::NE => "ne",
            Handle::NW => "nw",
            Handle::SE => "se",
            Handle::SW => "sw",
        }
    }

    pub fn moves_left(&self) -> bool {
        matches!(self, Handle::W | Handle::NW | Handle::SW)
    }

    pub fn moves_right(&self) -> bool {
        matches!(self, Handle::E | Handle::NE | Handle::SE)
    }

    pub fn moves_top(&self) -> bool {
        matches!(self, Handle::N | Handle::NE | Handle::NW)
    }

    pub fn moves_bottom(&self) -> bool {
        matches!(self, Handle::S | Handle::SE | Handle::SW)
    }

    /// Whether this handle changes height at all.
    pub fn is_vertical(&self) -> bool {
        self.moves_top() || self.moves_bottom()
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Drag / drop ─────────────────────────────────────────────────────────

/// Clamp a top-left position so the component stays inside the canvas
/// horizontally and below the top edge.
///
/// `x` lands in `[0, max(0, canvas_width - width)]`; a component wider than
/// the canvas is pinned at `x = 0` and overflows to the right.
#[must_use]
pub fn clamp_to_canvas(position: Point, width: f64, canvas_width: f64) -> Point {
    let max_x = (canvas_width - width).max(0.0);
    Point {
        x: position.x.min(max_x).max(0.0),
        y: position.y.max(0.0),
    }
}

/// New top-left for a dragged component: `pointer - anchor`, clamped.
///
/// `anchor` is the offset from the component's top-left to the press point,
/// captured when the drag started.
#[must_use]
pub fn clamp_drag_position(
    pointer: Point,
    anchor: Point,
    component_width: f64,
    canvas_width: f64,
) -> Point {
    clamp_to_canvas(pointer - anchor, component_width, canvas_width)
}

/// Canvas-local drop point. Callers pass the result through
/// [`clamp_to_canvas`] with the dropped kind's default width.
#[must_use]
pub fn drop_position(pointer: Point, canvas_origin: Point) -> Point {
    pointer - canvas_origin
}

// ─── Resize ──────────────────────────────────────────────────────────────

/// Compute the new bounds for a resize gesture.
///
/// `delta` is measured from the gesture's start point, not from the previous
/// move, and `start_size`/`start_position` are the values captured when the
/// gesture began. With `allow_vertical == false` the vertical part of any
/// handle is ignored, so `y` and height stay put.
#[must_use]
pub fn clamp_resize(
    handle: Handle,
    start_size: Size,
    start_position: Point,
    delta: Point,
    canvas_width: f64,
    allow_vertical: bool,
) -> Bounds {
    let (x, width) = if handle.moves_right() {
        resize_far_edge(start_position.x, start_size.width, delta.x, Some(canvas_width))
    } else if handle.moves_left() {
        resize_near_edge(start_position.x, start_size.width, delta.x)
    } else {
        (start_position.x, start_size.width.round())
    };

    let (y, height) = if allow_vertical && handle.moves_bottom() {
        resize_far_edge(start_position.y, start_size.height, delta.y, None)
    } else if allow_vertical && handle.moves_top() {
        resize_near_edge(start_position.y, start_size.height, delta.y)
    } else {
        (start_position.y, start_size.height.round())
    };

    Bounds {
        position: Point { x, y },
        size: Size { width, height },
    }
}

/// Move the far (right/bottom) edge; the near edge stays where it is.
///
/// The length is rounded before the limit applies, so a fractional near
/// edge never rounds the far edge past `limit`.
fn resize_far_edge(near: f64, length: f64, delta: f64, limit: Option<f64>) -> (f64, f64) {
    let mut len = (length + delta).round();
    if let Some(limit) = limit {
        len = len.min((limit - near).floor());
    }
    (near, len.max(MIN_SIZE))
}

/// Move the near (left/top) edge; the far edge stays fixed.
///
/// The near edge absorbs the rounding, so `near + len == far` unless the
/// size floor forces the far edge out.
fn resize_near_edge(near: f64, length: f64, delta: f64) -> (f64, f64) {
    let far = near + length;
    let len = (length - delta).round().min(far.floor()).max(MIN_SIZE);
    ((far - len).max(0.0), len)
}
