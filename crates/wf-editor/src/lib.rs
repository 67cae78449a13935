pub mod config;
pub mod editor;
pub mod history;
pub mod input;
pub mod shortcuts;

pub use config::EditorConfig;
pub use editor::{Change, Changes, Editor, EditorMode, Selection};
pub use history::History;
pub use input::{InputEvent, Modifiers, PointerButton};
pub use shortcuts::{ShortcutAction, ShortcutMap};
