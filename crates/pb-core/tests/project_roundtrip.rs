//! Integration tests: export → import round-trip for project files.
//!
//! Verifies that ids, kinds, positions, props and the canvas width survive
//! a trip through the JSON format unchanged.

use pb_core::id::ComponentId;
use pb_core::model::*;
use pb_core::project::{ProjectError, export_json, import_json};
use pb_core::{Point, export_html};
use pretty_assertions::assert_eq;

// ─── Helpers ─────────────────────────────────────────────────────────────

fn sample_page() -> Vec<Component> {
    let mut title = Component::new(ComponentKind::Text, Point::new(100.0, 50.0));
    title.props.set("content", "Welcome \"home\"");
    title.props.set("fontWeight", "bold");

    let mut body = Component::new(ComponentKind::TextArea, Point::new(100.0, 120.5));
    body.props.set("lineHeight", 1.75);

    let hero = Component::new(ComponentKind::Image, Point::new(0.0, 400.0));
    let card = Component::new(ComponentKind::FlexBox, Point::new(640.0, 380.0));
    let cta = Component::new(ComponentKind::Button, Point::new(700.0, 420.0));

    vec![title, body, hero, card, cta]
}

// ─── Round trip ──────────────────────────────────────────────────────────

#[test]
fn roundtrip_preserves_every_component() {
    let page = sample_page();
    let json = export_json(&page, 85);
    let imported = import_json(&json).expect("import failed");

    assert_eq!(imported.canvas_width, 85.0);
    assert_eq!(imported.components.len(), page.len());
    for (before, after) in page.iter().zip(&imported.components) {
        assert_eq!(before.id, after.id);
        assert_eq!(before.kind, after.kind);
        assert_eq!(before.position, after.position);
        assert_eq!(before.props, after.props);
    }
}

#[test]
fn roundtrip_preserves_z_order() {
    let page = sample_page();
    let imported = import_json(&export_json(&page, 100)).unwrap();
    let before: Vec<ComponentId> = page.iter().map(|c| c.id).collect();
    let after: Vec<ComponentId> = imported.components.iter().map(|c| c.id).collect();
    assert_eq!(before, after);
}

#[test]
fn empty_page_roundtrips() {
    let imported = import_json(&export_json(&[], 10)).unwrap();
    assert!(imported.components.is_empty());
    assert_eq!(imported.canvas_width, 10.0);
}

// ─── Hand-written files ──────────────────────────────────────────────────

#[test]
fn imports_hand_written_file() {
    let json = r##"{
      "version": "1.0.0",
      "timestamp": "2024-01-01T00:00:00.000Z",
      "canvasWidth": 60,
      "components": [
        {
          "id": "component-1700000000000-abc123def",
          "type": "button",
          "position": { "x": 12, "y": 34 },
          "props": { "text": "Buy", "url": "#", "fontSize": 16, "padding": 10 }
        }
      ]
    }"##;
    let imported = import_json(json).unwrap();
    let button = &imported.components[0];
    assert_eq!(button.id.as_str(), "component-1700000000000-abc123def");
    assert_eq!(button.kind, ComponentKind::Button);
    assert_eq!(button.position, Point::new(12.0, 34.0));
    assert_eq!(button.props.text("text"), Some("Buy"));
    assert_eq!(button.props.number("fontSize"), Some(16.0));
}

#[test]
fn import_error_messages_are_user_facing() {
    let err = import_json(r#"{"canvasWidth": 100}"#).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid JSON format: missing components array"
    );
    let err = import_json(r#"{"components": []}"#).unwrap_err();
    assert!(matches!(err, ProjectError::MissingCanvasWidth));
    assert_eq!(err.to_string(), "Invalid JSON format: missing canvasWidth");
}

// ─── HTML projection ─────────────────────────────────────────────────────

#[test]
fn html_has_one_element_per_component_in_order() {
    let page = sample_page();
    let html = export_html(&page, 100, 1200.0);
    for index in 0..page.len() {
        assert!(
            html.contains(&format!(".component-{index} {{")),
            "missing css for component-{index}"
        );
        assert!(html.contains(&format!("class=\"component-{index}\"")));
    }
    let img = html.find("<img").unwrap();
    let button = html.find("<button").unwrap();
    assert!(img < button, "z-order not preserved in markup");
    assert!(html.contains("Welcome &quot;home&quot;"));
}
