//! An editor attached to the host's keyboard.
//!
//! Mounting subscribes the editor keymap; the subscription lives inside the
//! [`MountedEditor`], so unmounting (or dropping) releases the shortcuts.

use super::LayoutEditor;
use crate::shortcuts::{KeyCombo, Keymap, ShortcutRegistry, ShortcutSubscription};

pub struct MountedEditor {
    editor: LayoutEditor,
    registry: ShortcutRegistry,
    subscription: ShortcutSubscription,
}

impl MountedEditor {
    /// Bind the default editor shortcuts on `registry`.
    pub fn mount(editor: LayoutEditor, registry: &ShortcutRegistry) -> Self {
        Self::mount_with(editor, registry, Keymap::editor_default())
    }

    pub fn mount_with(editor: LayoutEditor, registry: &ShortcutRegistry, keymap: Keymap) -> Self {
        let subscription = registry.subscribe(keymap);
        tracing::debug!(layout = editor.name(), "editor mounted");
        Self {
            editor,
            registry: registry.clone(),
            subscription,
        }
    }

    pub fn editor(&self) -> &LayoutEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut LayoutEditor {
        &mut self.editor
    }

    /// Route a key press. Returns `true` when it reached this editor and the
    /// bound action did something.
    pub fn handle_key(&mut self, combo: &KeyCombo) -> bool {
        match self.registry.dispatch(combo) {
            Some(dispatch) if dispatch.subscription == self.subscription.id() => {
                tracing::debug!(key = %combo, action = ?dispatch.action, "shortcut");
                self.editor.apply(dispatch.action)
            }
            _ => false,
        }
    }

    /// Release the shortcuts and hand the editor back.
    pub fn unmount(self) -> LayoutEditor {
        let MountedEditor {
            editor,
            subscription,
            ..
        } = self;
        drop(subscription);
        tracing::debug!(layout = editor.name(), "editor unmounted");
        editor
    }
}
