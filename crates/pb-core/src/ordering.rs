//! Layering and duplication over a component list.
//!
//! Every function takes the list by reference and returns a new list; the
//! input is never modified. An unknown ID, or a move past either end, returns
//! an unchanged copy.

use crate::geometry::Point;
use crate::id::ComponentId;
use crate::model::Component;

/// Offset applied to a duplicate when the caller has no preference.
pub const DUPLICATE_OFFSET: Point = Point { x: 20.0, y: 20.0 };

/// Z-index of `id` (0 = back-most).
pub fn layer_of(components: &[Component], id: ComponentId) -> Option<usize> {
    components.iter().position(|c| c.id == id)
}

/// Move `id` to the end of the list (painted last, on top).
#[must_use]
pub fn bring_to_front(components: &[Component], id: ComponentId) -> Vec<Component> {
    let Some(index) = layer_of(components, id) else {
        return components.to_vec();
    };
    let mut out = components.to_vec();
    let item = out.remove(index);
    out.push(item);
    out
}

/// Move `id` to index 0 (painted first, at the back).
#[must_use]
pub fn send_to_back(components: &[Component], id: ComponentId) -> Vec<Component> {
    let Some(index) = layer_of(components, id) else {
        return components.to_vec();
    };
    let mut out = components.to_vec();
    let item = out.remove(index);
    out.insert(0, item);
    out
}

/// Swap `id` with its successor.
#[must_use]
pub fn bring_forward(components: &[Component], id: ComponentId) -> Vec<Component> {
    let mut out = components.to_vec();
    if let Some(index) = layer_of(components, id)
        && index + 1 < components.len()
    {
        out.swap(index, index + 1);
    }
    out
}

/// Swap `id` with its predecessor.
#[must_use]
pub fn send_backward(components: &[Component], id: ComponentId) -> Vec<Component> {
    let mut out = components.to_vec();
    if let Some(index) = layer_of(components, id)
        && index > 0
    {
        out.swap(index, index - 1);
    }
    out
}

/// Copy `component` under a fresh ID, shifted by `offset`.
///
/// The copy owns its own props; editing one never shows up in the other.
#[must_use]
pub fn duplicate(component: &Component, offset: Point) -> Component {
    Component {
        id: ComponentId::fresh(),
        kind: component.kind,
        position: component.position + offset,
        props: component.props.clone(),
    }
}
