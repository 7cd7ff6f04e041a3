pub mod geometry;
pub mod html;
pub mod id;
pub mod model;
pub mod ordering;
pub mod project;

pub use geometry::{Bounds, Handle, MIN_SIZE, Point, Size};
pub use html::export_html;
pub use id::ComponentId;
pub use model::*;
pub use project::{ImportedProject, ProjectError, export_json, import_json};
