//! Component data model for PB pages.
//!
//! A page is an ordered list of `Component`s. List order is z-order:
//! index 0 paints first (back-most), the last element paints on top.
//! Components are plain values; every edit produces a new list, which is
//! what the editor's history stores.

use crate::geometry::{Handle, Point, Size};
use crate::id::ComponentId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::fmt;

/// Width assumed when a component's props carry no `width`.
pub const FALLBACK_WIDTH: f64 = 200.0;

/// Height assumed when a component's props carry no `height`.
pub const FALLBACK_HEIGHT: f64 = 100.0;

// ─── Kinds ───────────────────────────────────────────────────────────────

/// The closed set of element types offered by the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Text,
    TextArea,
    FlexBox,
    Image,
    Button,
}

impl ComponentKind {
    /// Palette order.
    pub const ALL: [ComponentKind; 5] = [
        ComponentKind::Text,
        ComponentKind::TextArea,
        ComponentKind::FlexBox,
        ComponentKind::Image,
        ComponentKind::Button,
    ];

    /// Wire name used in project files and by the host.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Text => "text",
            ComponentKind::TextArea => "textarea",
            ComponentKind::FlexBox => "flexbox",
            ComponentKind::Image => "image",
            ComponentKind::Button => "button",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }

    /// Human-readable palette label.
    pub fn label(&self) -> &'static str {
        match self {
            ComponentKind::Text => "Text",
            ComponentKind::TextArea => "Text Area",
            ComponentKind::FlexBox => "Flexbox",
            ComponentKind::Image => "Image",
            ComponentKind::Button => "Button",
        }
    }

    /// Buttons size themselves from padding and font; everything else
    /// can be resized on the canvas.
    pub fn is_resizable(&self) -> bool {
        !matches!(self, ComponentKind::Button)
    }

    /// Single-line text only stretches horizontally.
    pub fn allows_vertical_resize(&self) -> bool {
        self.is_resizable() && !matches!(self, ComponentKind::Text)
    }

    /// Handles shown on the selected component.
    pub fn resize_handles(&self) -> SmallVec<[Handle; 4]> {
        match self {
            ComponentKind::Text => SmallVec::from_slice(&[Handle::E, Handle::W]),
            ComponentKind::TextArea | ComponentKind::FlexBox | ComponentKind::Image => {
                SmallVec::from_slice(&[Handle::NW, Handle::NE, Handle::SW, Handle::SE])
            }
            ComponentKind::Button => SmallVec::new(),
        }
    }

    /// Props a freshly dropped component starts with.
    pub fn default_props(&self) -> Props {
        let mut p = Props::new();
        match self {
            ComponentKind::Text => {
                p.set("content", "Text");
                p.set("fontSize", 16);
                p.set("color", "#000000");
                p.set("fontWeight", "normal");
                p.set("textAlign", "left");
                p.set("width", 100);
                p.set("height", 30);
            }
            ComponentKind::TextArea => {
                p.set(
                    "content",
                    "This is a longer text area content that can span multiple lines.",
                );
                p.set("fontSize", 16);
                p.set("color", "#000000");
                p.set("lineHeight", 1.5);
                p.set("textAlign", "left");
                p.set("width", 300);
                p.set("height", 100);
            }
            ComponentKind::FlexBox => {
                p.set("backgroundColor", "#ffffff");
                p.set("width", 200);
                p.set("height", 100);
                p.set("padding", 16);
                p.set("borderRadius", 4);
            }
            ComponentKind::Image => {
                p.set("src", "");
                p.set("width", 200);
                p.set("height", 200);
                p.set("alt", "Image");
                p.set("borderRadius", 0);
            }
            ComponentKind::Button => {
                p.set("text", "Button");
                p.set("url", "#");
                p.set("fontSize", 16);
                p.set("padding", 10);
                p.set("backgroundColor", "#007bff");
                p.set("color", "#ffffff");
                p.set("borderRadius", 4);
            }
        }
        p
    }

    /// Width used to clamp a drop before the component exists.
    pub fn default_width(&self) -> f64 {
        self.default_props().width().unwrap_or(FALLBACK_WIDTH)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Props ───────────────────────────────────────────────────────────────

/// A single property value: numeric, free text, or a flag.
/// Enum-like props (`textAlign`, `fontWeight`) are stored as text.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl PropValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// CSS-ready rendering: integral numbers print without a fraction.
    pub fn to_css(&self) -> String {
        match self {
            PropValue::Number(n) => format_number(*n),
            PropValue::Text(s) => s.clone(),
            PropValue::Bool(b) => b.to_string(),
        }
    }
}

/// Print `16.0` as `16` and `1.5` as `1.5`.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

impl From<f64> for PropValue {
    fn from(v: f64) -> Self {
        PropValue::Number(v)
    }
}

impl From<i32> for PropValue {
    fn from(v: i32) -> Self {
        PropValue::Number(f64::from(v))
    }
}

impl From<&str> for PropValue {
    fn from(v: &str) -> Self {
        PropValue::Text(v.to_string())
    }
}

impl From<String> for PropValue {
    fn from(v: String) -> Self {
        PropValue::Text(v)
    }
}

impl From<bool> for PropValue {
    fn from(v: bool) -> Self {
        PropValue::Bool(v)
    }
}

impl Serialize for PropValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Keep integral values as JSON integers so exported files read
            // `"width": 200` rather than `200.0`.
            PropValue::Number(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => {
                serializer.serialize_i64(*n as i64)
            }
            PropValue::Number(n) => serializer.serialize_f64(*n),
            PropValue::Text(s) => serializer.serialize_str(s),
            PropValue::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

impl<'de> Deserialize<'de> for PropValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
            Bool(bool),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => PropValue::Number(n),
            Raw::Text(s) => PropValue::Text(s),
            Raw::Bool(b) => PropValue::Bool(b),
        })
    }
}

/// Variant-specific attributes keyed by name (`width`, `fontSize`, ...).
///
/// Owned and cloned by value, so a duplicated component never shares its
/// props with the original.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Props(BTreeMap<String, PropValue>);

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: &str, value: impl Into<PropValue>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<PropValue> {
        self.0.remove(key)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(PropValue::as_number)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PropValue::as_text)
    }

    pub fn width(&self) -> Option<f64> {
        self.number("width")
    }

    pub fn height(&self) -> Option<f64> {
        self.number("height")
    }

    /// Overlay every key of `other` onto `self`.
    pub fn merge(&mut self, other: &Props) {
        for (k, v) in &other.0 {
            self.0.insert(k.clone(), v.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Props(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ─── Components ──────────────────────────────────────────────────────────

/// One placed element on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,

    #[serde(rename = "type")]
    pub kind: ComponentKind,

    /// Top-left corner, canvas-relative.
    pub position: Point,

    pub props: Props,
}

impl Component {
    /// A new component of `kind` with palette defaults and a fresh ID.
    pub fn new(kind: ComponentKind, position: Point) -> Self {
        Self {
            id: ComponentId::fresh(),
            kind,
            position,
            props: kind.default_props(),
        }
    }

    pub fn width(&self) -> f64 {
        self.props.width().unwrap_or(FALLBACK_WIDTH)
    }

    pub fn height(&self) -> f64 {
        self.props.height().unwrap_or(FALLBACK_HEIGHT)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Apply a patch in place. Callers work on a cloned list, so the
    /// snapshot in history is never touched.
    pub fn apply(&mut self, patch: &ComponentPatch) {
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(props) = &patch.props {
            self.props.merge(props);
        }
    }
}

/// A partial edit from the properties surface or a gesture.
///
/// Props are merged key by key; keys not mentioned keep their value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<Props>,
}

impl ComponentPatch {
    pub fn position(position: Point) -> Self {
        Self {
            position: Some(position),
            props: None,
        }
    }

    pub fn props(props: Props) -> Self {
        Self {
            position: None,
            props: Some(props),
        }
    }

    /// Position plus rounded `width`/`height`, as committed by a resize.
    pub fn bounds(position: Point, size: Size) -> Self {
        let mut props = Props::new();
        props.set("width", size.width.round());
        props.set("height", size.height.round());
        Self {
            position: Some(position),
            props: Some(props),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_none() && self.props.as_ref().is_none_or(Props::is_empty)
    }
}
