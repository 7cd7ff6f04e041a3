//! Integration tests: pointer gestures through the editor shell.
//!
//! Each test drives `Editor::pointer_*` the way the browser host does and
//! checks the resulting component list, selection and history.

use pb_core::{ComponentId, ComponentKind, Handle, MIN_SIZE, Point, Size};
use pb_editor::{Editor, Modifiers, PressTarget, ShortcutAction};
use pretty_assertions::assert_eq;

// ─── Helpers ────────────────────────────────────────────────────────────

fn editor() -> Editor {
    let _ = env_logger::builder().is_test(true).try_init();
    Editor::default()
}

fn position(ed: &Editor, id: ComponentId) -> Point {
    ed.component(id).map(|c| c.position).unwrap_or_default()
}

fn size(ed: &Editor, id: ComponentId) -> Size {
    ed.component(id).map(|c| c.size()).unwrap_or_default()
}

/// Press at `from`, move through `path`, release at the last point.
fn drag(ed: &mut Editor, target: PressTarget, from: Point, path: &[Point]) {
    ed.pointer_down(from.x, from.y, target);
    for p in path {
        ed.pointer_move(p.x, p.y);
    }
    let end = path.last().copied().unwrap_or(from);
    ed.pointer_up(end.x, end.y);
}

// ─── Drag ───────────────────────────────────────────────────────────────

#[test]
fn drag_is_one_undo_step() {
    let mut ed = editor();
    let id = ed.add_component(ComponentKind::FlexBox, Point::new(100.0, 50.0));
    let steps = ed.history().len();

    let path: Vec<Point> = (1..=20).map(|i| Point::new(110.0 + 10.0 * f64::from(i), 60.0)).collect();
    drag(&mut ed, PressTarget::Body(id), Point::new(110.0, 60.0), &path);

    assert_eq!(position(&ed, id), Point::new(300.0, 50.0));
    assert_eq!(ed.history().len(), steps + 1);
    assert!(!ed.is_gesture_active());

    ed.undo();
    assert_eq!(position(&ed, id), Point::new(100.0, 50.0));
}

#[test]
fn drag_selects_the_pressed_component() {
    let mut ed = editor();
    let a = ed.add_component(ComponentKind::Text, Point::ZERO);
    let b = ed.add_component(ComponentKind::Text, Point::new(300.0, 0.0));
    assert_eq!(ed.selected_id(), Some(b));
    ed.pointer_down(5.0, 5.0, PressTarget::Body(a));
    assert_eq!(ed.selected_id(), Some(a));
    ed.pointer_up(5.0, 5.0);
}

#[test]
fn click_without_motion_adds_no_history() {
    let mut ed = editor();
    let id = ed.add_component(ComponentKind::Image, Point::new(40.0, 40.0));
    let steps = ed.history().len();
    drag(&mut ed, PressTarget::Body(id), Point::new(50.0, 50.0), &[]);
    assert_eq!(ed.history().len(), steps);
}

#[test]
fn drag_uses_live_canvas_width() {
    let mut ed = editor();
    let id = ed.add_component(ComponentKind::FlexBox, Point::ZERO);
    ed.pointer_down(10.0, 10.0, PressTarget::Body(id));
    ed.set_canvas_pixel_width(800.0);
    ed.pointer_move(5000.0, 10.0);
    ed.pointer_up(5000.0, 10.0);
    assert_eq!(position(&ed, id), Point::new(600.0, 0.0));
}

#[test]
fn cancel_rolls_the_gesture_back() {
    let mut ed = editor();
    let id = ed.add_component(ComponentKind::FlexBox, Point::new(100.0, 100.0));
    let steps = ed.history().len();

    ed.pointer_down(110.0, 110.0, PressTarget::Body(id));
    ed.pointer_move(400.0, 400.0);
    assert_eq!(position(&ed, id), Point::new(390.0, 390.0));
    ed.pointer_cancel();

    assert_eq!(position(&ed, id), Point::new(100.0, 100.0));
    assert_eq!(ed.history().len(), steps);
    assert!(!ed.is_gesture_active());
}

#[test]
fn cancel_after_mid_drag_duplicate_clears_selection() {
    let mut ed = editor();
    let id = ed.add_component(ComponentKind::FlexBox, Point::new(100.0, 100.0));

    ed.pointer_down(110.0, 110.0, PressTarget::Body(id));
    assert_eq!(ed.handle_key("d", Modifiers { ctrl: true, ..Modifiers::NONE }), Some(ShortcutAction::Duplicate));
    assert_ne!(ed.selected_id(), Some(id));
    ed.pointer_cancel();

    assert_eq!(ed.components().len(), 1);
    assert_eq!(ed.selected_id(), None);
}

#[test]
fn press_on_empty_canvas_deselects() {
    let mut ed = editor();
    ed.add_component(ComponentKind::Text, Point::ZERO);
    assert!(ed.selected_id().is_some());
    ed.pointer_down(900.0, 900.0, PressTarget::Canvas);
    ed.pointer_up(900.0, 900.0);
    assert_eq!(ed.selected_id(), None);
}

// ─── Resize ─────────────────────────────────────────────────────────────

#[test]
fn resize_south_east_is_one_step() {
    let mut ed = editor();
    let id = ed.add_component(ComponentKind::Image, Point::new(100.0, 100.0));
    let steps = ed.history().len();

    drag(
        &mut ed,
        PressTarget::Handle(id, Handle::SE),
        Point::new(300.0, 300.0),
        &[Point::new(320.0, 310.0), Point::new(350.0, 350.0)],
    );

    assert_eq!(size(&ed, id), Size::new(250.0, 250.0));
    assert_eq!(position(&ed, id), Point::new(100.0, 100.0));
    assert_eq!(ed.history().len(), steps + 1);
}

#[test]
fn resize_west_keeps_right_edge() {
    let mut ed = editor();
    let id = ed.add_component(ComponentKind::FlexBox, Point::new(100.0, 50.0));
    drag(
        &mut ed,
        PressTarget::Handle(id, Handle::NW),
        Point::new(100.0, 50.0),
        &[Point::new(400.0, 50.0)],
    );
    assert_eq!(size(&ed, id).width, MIN_SIZE);
    assert_eq!(position(&ed, id).x + size(&ed, id).width, 300.0);
}

#[test]
fn resize_from_fractional_position_keeps_left_edge() {
    let mut ed = editor();
    let id = ed.add_component(ComponentKind::FlexBox, Point::new(900.5, 40.0));
    drag(
        &mut ed,
        PressTarget::Handle(id, Handle::SE),
        Point::new(1100.5, 240.0),
        &[Point::new(5000.0, 260.0)],
    );
    assert_eq!(position(&ed, id), Point::new(900.5, 40.0));
    assert_eq!(size(&ed, id).width, 299.0);
    assert!(position(&ed, id).x + size(&ed, id).width <= 1200.0);
}

#[test]
fn text_resize_is_horizontal_only() {
    let mut ed = editor();
    let id = ed.add_component(ComponentKind::Text, Point::new(10.0, 10.0));
    drag(
        &mut ed,
        PressTarget::Handle(id, Handle::E),
        Point::new(110.0, 25.0),
        &[Point::new(190.0, 500.0)],
    );
    assert_eq!(size(&ed, id), Size::new(180.0, 30.0));
    assert_eq!(position(&ed, id), Point::new(10.0, 10.0));
}

#[test]
fn resize_needs_selection() {
    let mut ed = editor();
    let id = ed.add_component(ComponentKind::Image, Point::ZERO);
    ed.deselect();
    let steps = ed.history().len();
    drag(
        &mut ed,
        PressTarget::Handle(id, Handle::SE),
        Point::new(200.0, 200.0),
        &[Point::new(260.0, 260.0)],
    );
    assert_eq!(size(&ed, id), Size::new(200.0, 200.0));
    assert_eq!(ed.history().len(), steps);
}

// ─── Scenario ───────────────────────────────────────────────────────────

#[test]
fn drag_to_right_edge_duplicate_and_layer() {
    let mut ed = editor();
    let original = ed.add_component(ComponentKind::FlexBox, Point::new(100.0, 50.0));

    drag(
        &mut ed,
        PressTarget::Body(original),
        Point::new(110.0, 60.0),
        &[Point::new(600.0, 60.0), Point::new(1160.0, 60.0)],
    );
    assert_eq!(position(&ed, original), Point::new(1000.0, 50.0));

    // The shell keeps the copy on the canvas
    let copy = ed.duplicate_selected().unwrap();
    assert_eq!(position(&ed, copy), Point::new(1000.0, 70.0));

    ed.select(Some(original));
    assert!(ed.bring_selected_to_front());
    let order: Vec<ComponentId> = ed.components().iter().map(|c| c.id).collect();
    assert_eq!(order, vec![copy, original]);

    let steps = ed.history().len();
    assert!(!ed.send_backward(copy));
    assert_eq!(ed.history().len(), steps);
}

#[test]
fn undo_mid_gesture_ends_it() {
    let mut ed = editor();
    let id = ed.add_component(ComponentKind::FlexBox, Point::new(0.0, 0.0));
    ed.pointer_down(5.0, 5.0, PressTarget::Body(id));
    ed.pointer_move(105.0, 5.0);
    ed.undo();
    assert!(!ed.is_gesture_active());
    assert_eq!(position(&ed, id), Point::ZERO);
    // The stray release is ignored
    assert!(!ed.pointer_up(105.0, 5.0));
    assert!(ed.can_redo());
}
