//! Bounded linear undo/redo history.
//!
//! Entries are full snapshots of the element list. `cursor` points at the
//! entry matching the current state. Pushing while the cursor is below the
//! top discards everything above it; pushing past capacity evicts the
//! oldest entry.

use std::collections::VecDeque;

use crate::layout::LayoutElement;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub elements: Vec<LayoutElement>,
    pub action_label: String,
}

#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    cursor: usize,
    capacity: usize,
}

impl History {
    /// History whose bottom entry is `initial`. `capacity` is clamped to 1.
    pub fn new(initial: Vec<LayoutElement>, label: impl Into<String>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut entries = VecDeque::with_capacity(capacity.min(64));
        entries.push_back(HistoryEntry {
            elements: initial,
            action_label: label.into(),
        });
        Self {
            entries,
            cursor: 0,
            capacity,
        }
    }

    /// Record a new state, discarding any redo entries.
    pub fn push(&mut self, elements: Vec<LayoutElement>, label: impl Into<String>) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push_back(HistoryEntry {
            elements,
            action_label: label.into(),
        });
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Step back. Returns the entry that was undone and the snapshot to
    /// restore, or `None` at the bottom.
    pub fn undo(&mut self) -> Option<(&str, &[LayoutElement])> {
        if self.cursor == 0 {
            return None;
        }
        let undone = self.cursor;
        self.cursor -= 1;
        Some((
            self.entries[undone].action_label.as_str(),
            self.entries[self.cursor].elements.as_slice(),
        ))
    }

    /// Step forward. Returns the redone entry, or `None` at the top.
    pub fn redo(&mut self) -> Option<&HistoryEntry> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entry matching the current state.
    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.cursor]
    }

    /// Labels from oldest to newest.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.action_label.as_str())
    }
}
