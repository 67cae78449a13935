//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s.

use crate::input::Modifiers;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Undo,
    /// Remove the selected node (with its edges) or edge.
    Delete,
    /// Drop the pending edge and clear the selection.
    Cancel,
    /// Space pressed: the next primary press pans.
    PanStart,
    /// Space released.
    PanEnd,
}

/// Resolves key events into shortcut actions.
///
/// On macOS `meta` is ⌘, elsewhere `ctrl` serves the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key press. Returns `None` if the combo has no binding.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        let cmd = modifiers.ctrl || modifiers.meta;

        if cmd {
            return match key {
                "z" | "Z" if !modifiers.shift => Some(ShortcutAction::Undo),
                _ => None,
            };
        }

        match key {
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            "Escape" => Some(ShortcutAction::Cancel),
            " " => Some(ShortcutAction::PanStart),
            _ => None,
        }
    }

    /// Resolve a key release.
    pub fn resolve_release(key: &str) -> Option<ShortcutAction> {
        match key {
            " " => Some(ShortcutAction::PanEnd),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_undo() {
        assert_eq!(
            ShortcutMap::resolve("z", Modifiers::CTRL),
            Some(ShortcutAction::Undo)
        );
        assert_eq!(
            ShortcutMap::resolve("Z", Modifiers::META),
            Some(ShortcutAction::Undo)
        );
        // No redo binding.
        let redo = Modifiers {
            shift: true,
            ..Modifiers::CTRL
        };
        assert_eq!(ShortcutMap::resolve("z", redo), None);
        assert_eq!(ShortcutMap::resolve("z", Modifiers::NONE), None);
    }

    #[test]
    fn resolve_edit_keys() {
        assert_eq!(
            ShortcutMap::resolve("Delete", Modifiers::NONE),
            Some(ShortcutAction::Delete)
        );
        assert_eq!(
            ShortcutMap::resolve("Backspace", Modifiers::NONE),
            Some(ShortcutAction::Delete)
        );
        assert_eq!(
            ShortcutMap::resolve("Escape", Modifiers::NONE),
            Some(ShortcutAction::Cancel)
        );
        assert_eq!(ShortcutMap::resolve("Delete", Modifiers::CTRL), None);
    }

    #[test]
    fn resolve_space_pan() {
        assert_eq!(
            ShortcutMap::resolve(" ", Modifiers::NONE),
            Some(ShortcutAction::PanStart)
        );
        assert_eq!(
            ShortcutMap::resolve_release(" "),
            Some(ShortcutAction::PanEnd)
        );
        assert_eq!(ShortcutMap::resolve_release("a"), None);
    }
}
