use std::collections::VecDeque;

use tracing::debug;

use super::location::HistoryEntry;

const HISTORY_CAPACITY: usize = 64;

/// Back/forward navigation stacks around the current entry.
#[derive(Debug, Clone, Default)]
pub struct HistoryState {
    back_stack: VecDeque<HistoryEntry>,
    current: HistoryEntry,
    forward_stack: VecDeque<HistoryEntry>,
}

impl HistoryState {
    pub fn current(&self) -> &HistoryEntry {
        &self.current
    }

    pub fn location(&self) -> String {
        self.current.location()
    }

    pub fn can_go_back(&self) -> bool {
        !self.back_stack.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward_stack.is_empty()
    }

    pub fn back_len(&self) -> usize {
        self.back_stack.len()
    }

    pub fn forward_len(&self) -> usize {
        self.forward_stack.len()
    }

    /// Records a new entry. Pushing the entry that is already current is a no-op.
    pub fn push(&mut self, entry: HistoryEntry) {
        if entry == self.current {
            return;
        }
        debug!(location = %entry.location(), "history push");
        let previous = std::mem::replace(&mut self.current, entry);
        push_bounded(&mut self.back_stack, previous);
        self.forward_stack.clear();
    }

    pub fn replace(&mut self, entry: HistoryEntry) {
        debug!(location = %entry.location(), "history replace");
        self.current = entry;
    }

    pub fn back(&mut self) -> Option<&HistoryEntry> {
        let target = self.back_stack.pop_back()?;
        let previous = std::mem::replace(&mut self.current, target);
        push_bounded(&mut self.forward_stack, previous);
        Some(&self.current)
    }

    pub fn forward(&mut self) -> Option<&HistoryEntry> {
        let target = self.forward_stack.pop_back()?;
        let previous = std::mem::replace(&mut self.current, target);
        push_bounded(&mut self.back_stack, previous);
        Some(&self.current)
    }
}

fn push_bounded(stack: &mut VecDeque<HistoryEntry>, entry: HistoryEntry) {
    if stack.len() >= HISTORY_CAPACITY {
        stack.pop_front();
    }
    stack.push_back(entry);
}
