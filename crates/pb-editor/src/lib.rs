pub mod config;
pub mod editor;
pub mod gesture;
pub mod history;
pub mod input;
pub mod shortcuts;

pub use config::EditorConfig;
pub use editor::{CanvasWidthInput, Editor, EditorSnapshot};
pub use gesture::{GestureEffect, GestureState, InteractionController};
pub use history::History;
pub use input::{InputEvent, Modifiers, PressTarget};
pub use shortcuts::{ShortcutAction, ShortcutMap};
