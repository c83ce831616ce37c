//! Bounded undo/redo history of full snapshots.

use std::collections::VecDeque;

/// Default number of undo states to keep.
pub const DEFAULT_HISTORY_DEPTH: usize = 100;

/// Linear undo/redo stacks of full-state snapshots.
///
/// `past` is capped at `depth`; pushing past the cap evicts the oldest
/// snapshot. Any new push clears `future`.
#[derive(Debug, Clone)]
pub struct History<T> {
    past: VecDeque<T>,
    future: VecDeque<T>,
    depth: usize,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}

impl<T> History<T> {
    pub fn new(depth: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: VecDeque::new(),
            depth: depth.max(1),
        }
    }

    /// Record the pre-mutation state.
    pub fn push(&mut self, snapshot: T) {
        self.past.push_back(snapshot);
        self.future.clear();
        while self.past.len() > self.depth {
            self.past.pop_front();
        }
    }

    /// Swap `current` with the most recent past snapshot.
    /// Returns false and leaves everything untouched when there is none.
    pub fn undo(&mut self, current: &mut T) -> bool {
        let Some(previous) = self.past.pop_back() else {
            return false;
        };
        let now = std::mem::replace(current, previous);
        self.future.push_front(now);
        log::debug!("Undo: {} past, {} future", self.past.len(), self.future.len());
        true
    }

    /// Mirror of [`Self::undo`].
    pub fn redo(&mut self, current: &mut T) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        let now = std::mem::replace(current, next);
        self.past.push_back(now);
        while self.past.len() > self.depth {
            self.past.pop_front();
        }
        log::debug!("Redo: {} past, {} future", self.past.len(), self.future.len());
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}
