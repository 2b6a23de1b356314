//! Bounded linear undo/redo log.

use std::collections::VecDeque;

use crate::constants::MAX_HISTORY_ENTRIES;
use crate::page::ComponentRecord;

use super::entry::HistoryEntry;

/// Snapshot log with a cursor pointing at the current state.
///
/// An editing session seeds the log with the state it started from, so in
/// practice it holds between one and `capacity` entries.
#[derive(Clone, Debug)]
pub struct HistoryStack {
    entries: VecDeque<HistoryEntry>,
    /// Index of the entry matching the live collection
    cursor: usize,
    capacity: usize,
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl HistoryStack {
    /// Starts a log whose only entry is `initial`
    pub fn new(initial: Vec<ComponentRecord>) -> Self {
        Self::with_capacity(initial, MAX_HISTORY_ENTRIES)
    }

    pub fn with_capacity(initial: Vec<ComponentRecord>, capacity: usize) -> Self {
        let mut stack = Self::empty(capacity);
        stack.entries.push_back(HistoryEntry::new(initial, "Initial state"));
        stack
    }

    /// A log with no entries at all; the first push becomes the oldest state
    pub fn empty(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.max(1)),
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    /// Drops every entry and starts over from `initial`
    pub fn reset(&mut self, initial: Vec<ComponentRecord>) {
        *self = Self::with_capacity(initial, self.capacity);
    }

    /// Records a new state after the cursor.
    ///
    /// Entries past the cursor (the redo branch) are discarded, then the
    /// oldest entries are evicted until the log fits its capacity.
    pub fn push(&mut self, components: Vec<ComponentRecord>, label: impl Into<String>) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push_back(HistoryEntry::new(components, label));

        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Steps back one entry and returns its snapshot
    pub fn undo(&mut self) -> Option<&[ComponentRecord]> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor].components)
    }

    /// Steps forward one entry and returns its snapshot
    pub fn redo(&mut self) -> Option<&[ComponentRecord]> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor].components)
    }

    /// Moves the cursor to `index` and returns that snapshot
    pub fn jump_to(&mut self, index: usize) -> Option<&[ComponentRecord]> {
        if index >= self.entries.len() {
            return None;
        }
        self.cursor = index;
        Some(&self.entries[index].components)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.cursor)
    }

    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Number of entries that can be undone
    pub fn undo_count(&self) -> usize {
        self.cursor
    }

    /// Number of entries that can be redone
    pub fn redo_count(&self) -> usize {
        self.entries.len().saturating_sub(self.cursor + 1)
    }
}
