//! Keyboard shortcuts bound for the lifetime of a mounted editor.
//!
//! A [`ShortcutRegistry`] stands in for the host's global key listener.
//! [`ShortcutRegistry::subscribe`] binds a [`Keymap`] and returns a
//! [`ShortcutSubscription`]; the keymap stays bound exactly as long as the
//! subscription is alive. Dropping it unbinds the keys, so a screen that
//! goes away cannot leave handlers behind.
//!
//! ```
//! use seatplan::shortcuts::{EditorAction, KeyCombo, Keymap, ShortcutRegistry};
//!
//! let registry = ShortcutRegistry::new();
//! let ctrl_z: KeyCombo = "Ctrl+Z".parse().unwrap();
//!
//! let subscription = registry.subscribe(Keymap::editor_default());
//! assert_eq!(registry.dispatch(&ctrl_z).map(|d| d.action), Some(EditorAction::Undo));
//!
//! drop(subscription);
//! assert!(registry.dispatch(&ctrl_z).is_none());
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};
use std::str::FromStr;

// ============================================================================
// KEYS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable key, stored lowercase.
    Char(char),
    Delete,
    Backspace,
    Escape,
}

/// A key plus modifiers. `Cmd`/`Meta` parse as `Ctrl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub ctrl: bool,
    pub shift: bool,
    pub key: Key,
}

impl KeyCombo {
    pub fn plain(key: Key) -> Self {
        Self {
            ctrl: false,
            shift: false,
            key,
        }
    }

    pub fn ctrl(ch: char) -> Self {
        Self {
            ctrl: true,
            shift: false,
            key: Key::Char(ch.to_ascii_lowercase()),
        }
    }

    pub fn ctrl_shift(ch: char) -> Self {
        Self {
            shift: true,
            ..Self::ctrl(ch)
        }
    }
}

impl FromStr for KeyCombo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut ctrl = false;
        let mut shift = false;
        let mut key = None;

        for part in s.split('+').map(str::trim) {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" | "cmd" | "meta" => ctrl = true,
                "shift" => shift = true,
                "delete" | "del" => key = Some(Key::Delete),
                "backspace" => key = Some(Key::Backspace),
                "escape" | "esc" => key = Some(Key::Escape),
                other => {
                    let mut chars = other.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => key = Some(Key::Char(c)),
                        _ => return Err(format!("unknown key '{}' in '{}'", part, s)),
                    }
                }
            }
        }

        key.map(|key| KeyCombo { ctrl, shift, key })
            .ok_or_else(|| format!("no key in '{}'", s))
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            f.write_str("Ctrl+")?;
        }
        if self.shift {
            f.write_str("Shift+")?;
        }
        match self.key {
            Key::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            Key::Delete => f.write_str("Delete"),
            Key::Backspace => f.write_str("Backspace"),
            Key::Escape => f.write_str("Escape"),
        }
    }
}

// ============================================================================
// ACTIONS AND KEYMAPS
// ============================================================================

/// Editor operations reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    Undo,
    Redo,
    Copy,
    Paste,
    DeleteSelected,
}

#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: HashMap<KeyCombo, EditorAction>,
}

impl Keymap {
    /// Ctrl+Z undo, Ctrl+Y / Ctrl+Shift+Z redo, Ctrl+C copy, Ctrl+V paste,
    /// Delete / Backspace delete.
    pub fn editor_default() -> Self {
        Keymap::default()
            .bind(KeyCombo::ctrl('z'), EditorAction::Undo)
            .bind(KeyCombo::ctrl('y'), EditorAction::Redo)
            .bind(KeyCombo::ctrl_shift('z'), EditorAction::Redo)
            .bind(KeyCombo::ctrl('c'), EditorAction::Copy)
            .bind(KeyCombo::ctrl('v'), EditorAction::Paste)
            .bind(KeyCombo::plain(Key::Delete), EditorAction::DeleteSelected)
            .bind(KeyCombo::plain(Key::Backspace), EditorAction::DeleteSelected)
    }

    pub fn bind(mut self, combo: KeyCombo, action: EditorAction) -> Self {
        self.bindings.insert(combo, action);
        self
    }

    pub fn action_for(&self, combo: &KeyCombo) -> Option<EditorAction> {
        self.bindings.get(combo).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Identifies one live subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Result of routing a key: which subscriber handles it, and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub subscription: SubscriptionId,
    pub action: EditorAction,
}

#[derive(Debug, Default)]
struct RegistryInner {
    next_id: u64,
    /// Oldest first; dispatch walks from the back.
    keymaps: Vec<(SubscriptionId, Keymap)>,
}

/// Host-wide key listener. Cloning shares the same bindings.
#[derive(Debug, Clone, Default)]
pub struct ShortcutRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `keymap` until the returned subscription is dropped.
    #[must_use = "dropping the subscription unbinds the keymap immediately"]
    pub fn subscribe(&self, keymap: Keymap) -> ShortcutSubscription {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = SubscriptionId(inner.next_id);
        inner.keymaps.push((id, keymap));
        tracing::debug!(subscription = id.0, "shortcuts bound");
        ShortcutSubscription {
            registry: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Route a key to the most recent subscription that binds it.
    pub fn dispatch(&self, combo: &KeyCombo) -> Option<Dispatch> {
        let inner = self.inner.borrow();
        inner.keymaps.iter().rev().find_map(|(id, keymap)| {
            keymap.action_for(combo).map(|action| Dispatch {
                subscription: *id,
                action,
            })
        })
    }

    /// Number of live subscriptions.
    pub fn active(&self) -> usize {
        self.inner.borrow().keymaps.len()
    }
}

/// Guard keeping a keymap bound. Unbinds on drop.
#[derive(Debug)]
pub struct ShortcutSubscription {
    registry: Weak<RefCell<RegistryInner>>,
    id: SubscriptionId,
}

impl ShortcutSubscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }
}

impl Drop for ShortcutSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.registry.upgrade() {
            inner.borrow_mut().keymaps.retain(|(id, _)| *id != self.id);
            tracing::debug!(subscription = self.id.0, "shortcuts unbound");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_combos() {
        assert_eq!("Ctrl+Z".parse::<KeyCombo>().unwrap(), KeyCombo::ctrl('z'));
        assert_eq!("cmd+shift+z".parse::<KeyCombo>().unwrap(), KeyCombo::ctrl_shift('z'));
        assert_eq!(
            "Delete".parse::<KeyCombo>().unwrap(),
            KeyCombo::plain(Key::Delete)
        );
        assert!("Ctrl+".parse::<KeyCombo>().is_err());
        assert!("Ctrl+Home".parse::<KeyCombo>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for s in ["Ctrl+Z", "Ctrl+Shift+Z", "Delete", "Backspace"] {
            assert_eq!(s.parse::<KeyCombo>().unwrap().to_string(), s);
        }
    }

    #[test]
    fn test_default_keymap() {
        let keymap = Keymap::editor_default();
        assert_eq!(keymap.action_for(&KeyCombo::ctrl('y')), Some(EditorAction::Redo));
        assert_eq!(
            keymap.action_for(&KeyCombo::ctrl_shift('z')),
            Some(EditorAction::Redo)
        );
        assert_eq!(
            keymap.action_for(&KeyCombo::plain(Key::Backspace)),
            Some(EditorAction::DeleteSelected)
        );
        assert_eq!(keymap.action_for(&KeyCombo::ctrl('x')), None);
    }

    #[test]
    fn test_drop_unbinds() {
        let registry = ShortcutRegistry::new();
        let sub = registry.subscribe(Keymap::editor_default());
        assert_eq!(registry.active(), 1);
        drop(sub);
        assert_eq!(registry.active(), 0);
        assert!(registry.dispatch(&KeyCombo::ctrl('z')).is_none());
    }

    #[test]
    fn test_newest_subscription_wins() {
        let registry = ShortcutRegistry::new();
        let older = registry.subscribe(Keymap::editor_default());
        let newer = registry.subscribe(Keymap::default().bind(KeyCombo::ctrl('z'), EditorAction::Redo));

        let d = registry.dispatch(&KeyCombo::ctrl('z')).unwrap();
        assert_eq!(d.subscription, newer.id());
        assert_eq!(d.action, EditorAction::Redo);

        // Keys the newer map does not bind fall through.
        let d = registry.dispatch(&KeyCombo::ctrl('c')).unwrap();
        assert_eq!(d.subscription, older.id());

        drop(newer);
        let d = registry.dispatch(&KeyCombo::ctrl('z')).unwrap();
        assert_eq!(d.subscription, older.id());
        assert_eq!(d.action, EditorAction::Undo);
    }

    #[test]
    fn test_subscription_outliving_registry() {
        let registry = ShortcutRegistry::new();
        let sub = registry.subscribe(Keymap::editor_default());
        drop(registry);
        drop(sub);
    }
}
