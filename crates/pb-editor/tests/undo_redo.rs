//! Integration tests: undo/redo history (pb-editor).
//!
//! Exercises the generic `History` store on its own and through the
//! `Editor` shell, where every state-changing command is one undo step.

use pb_core::{ComponentId, ComponentKind, ComponentPatch, Point, Props};
use pb_editor::{Editor, EditorConfig, History};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

// ─── Helpers ────────────────────────────────────────────────────────────

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn editor() -> Editor {
    init_logs();
    Editor::default()
}

fn ids(ed: &Editor) -> Vec<ComponentId> {
    ed.components().iter().map(|c| c.id).collect()
}

// ─── Editor history ─────────────────────────────────────────────────────

#[test]
fn undo_walks_back_through_commands() {
    let mut ed = editor();
    let a = ed.add_component(ComponentKind::Text, Point::new(10.0, 10.0));
    let b = ed.add_component(ComponentKind::FlexBox, Point::new(200.0, 10.0));
    ed.bring_to_front(a);
    assert_eq!(ids(&ed), vec![b, a]);

    assert!(ed.undo());
    assert_eq!(ids(&ed), vec![a, b]);
    assert!(ed.undo());
    assert_eq!(ids(&ed), vec![a]);
    assert!(ed.undo());
    assert!(ed.components().is_empty());
    assert!(!ed.undo(), "undo at the start is a no-op");
    assert!(!ed.can_undo());

    assert!(ed.redo());
    assert!(ed.redo());
    assert!(ed.redo());
    assert_eq!(ids(&ed), vec![b, a]);
    assert!(!ed.redo(), "redo at the end is a no-op");
}

#[test]
fn new_command_after_undo_drops_redo_branch() {
    let mut ed = editor();
    let a = ed.add_component(ComponentKind::Text, Point::ZERO);
    ed.add_component(ComponentKind::Image, Point::ZERO);
    ed.undo();
    assert!(ed.can_redo());

    let mut props = Props::new();
    props.set("content", "Hello");
    ed.update_component(a, &ComponentPatch::props(props));
    assert!(!ed.can_redo());
    assert_eq!(ed.components().len(), 1);
    assert_eq!(
        ed.component(a).and_then(|c| c.props.text("content")),
        Some("Hello")
    );
}

#[test]
fn undo_clears_selection_of_removed_component() {
    let mut ed = editor();
    let id = ed.add_component(ComponentKind::Button, Point::ZERO);
    assert_eq!(ed.selected_id(), Some(id));
    ed.undo();
    assert_eq!(ed.selected_id(), None);
}

#[test]
fn redo_clears_selection_of_deleted_component() {
    let mut ed = editor();
    let id = ed.add_component(ComponentKind::Button, Point::ZERO);
    ed.delete_component(id);
    ed.undo();
    ed.select(Some(id));
    assert_eq!(ed.selected_id(), Some(id));
    ed.redo();
    assert_eq!(ed.selected_id(), None);
}

#[test]
fn history_limit_from_config() {
    init_logs();
    let mut ed = Editor::new(EditorConfig {
        history_limit: 3,
        ..EditorConfig::default()
    });
    for i in 0..6 {
        ed.add_component(ComponentKind::Text, Point::new(f64::from(i) * 10.0, 0.0));
    }
    assert_eq!(ed.history().len(), 3);
    let mut steps = 0;
    while ed.undo() {
        steps += 1;
    }
    assert_eq!(steps, 2);
    assert_eq!(ed.components().len(), 4);
}

#[test]
fn duplicate_is_one_step_and_detached() {
    let mut ed = editor();
    let a = ed.add_component(ComponentKind::FlexBox, Point::new(100.0, 100.0));
    let b = ed.duplicate_component(a).unwrap();
    assert_eq!(ed.selected_id(), Some(b));
    assert_eq!(ed.component(b).map(|c| c.position), Some(Point::new(120.0, 120.0)));

    let mut props = Props::new();
    props.set("backgroundColor", "#ff0000");
    ed.update_component(b, &ComponentPatch::props(props));
    assert_eq!(
        ed.component(a).and_then(|c| c.props.text("backgroundColor")),
        Some("#ffffff")
    );

    ed.undo();
    ed.undo();
    assert_eq!(ids(&ed), vec![a]);
}

// ─── History properties ─────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Push(u32),
    Undo,
    Redo,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u32..1000).prop_map(Op::Push),
        Just(Op::Undo),
        Just(Op::Redo),
    ]
}

proptest! {
    #[test]
    fn cursor_stays_in_bounds(ops in proptest::collection::vec(op(), 0..80), limit in 1usize..10) {
        let mut h = History::with_limit(0u32, limit);
        for op in ops {
            match op {
                Op::Push(v) => h.push(v),
                Op::Undo => { h.undo(); }
                Op::Redo => { h.redo(); }
            }
            prop_assert!(h.cursor() < h.len());
            prop_assert!(h.len() <= limit);
            prop_assert_eq!(h.can_undo(), h.cursor() > 0);
            prop_assert_eq!(h.can_redo(), h.cursor() + 1 < h.len());
        }
    }

    #[test]
    fn undo_then_redo_is_identity(values in proptest::collection::vec(0u32..1000, 1..20), back in 0usize..20) {
        let mut h = History::new(0u32);
        for v in &values {
            h.push(*v);
        }
        let before = *h.current();
        let mut undone = 0;
        for _ in 0..back {
            if h.undo() {
                undone += 1;
            }
        }
        for _ in 0..undone {
            prop_assert!(h.redo());
        }
        prop_assert_eq!(*h.current(), before);
    }

    #[test]
    fn push_after_undo_makes_it_newest(values in proptest::collection::vec(0u32..1000, 2..20), next in 1000u32..2000) {
        let mut h = History::new(0u32);
        for v in &values {
            h.push(*v);
        }
        h.undo();
        h.push(next);
        prop_assert!(!h.can_redo());
        prop_assert_eq!(*h.current(), next);
        prop_assert_eq!(h.cursor(), h.len() - 1);
    }
}
