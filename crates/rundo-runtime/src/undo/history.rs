#![forbid(unsafe_code)]

//! Bounded, most-recent-first history queue.
//!
//! [`HistoryQueue`] is the storage behind both the undo and the redo side of
//! an [`EditTracker`](super::EditTracker). Entries go in and come out at the
//! front; once the queue is full, each push drops the oldest entry off the
//! back:
//!
//! ```text
//! capacity = 3
//!
//! push_front(d4)
//! ┌──────────────────────────────┐
//! │ front → [d3, d2, d1] ← back  │   before
//! │ front → [d4, d3, d2] ← back  │   after, d1 evicted
//! └──────────────────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. `len() <= capacity()` after every operation
//! 2. Surviving entries keep their push order (newest at the front)
//! 3. Changing capacity discards every entry
//!
//! None of the operations can fail.

use std::collections::VecDeque;
use std::fmt;

/// Fixed-capacity double-ended queue, newest entry first.
#[derive(Clone)]
pub struct HistoryQueue<T> {
    /// Entries, index 0 is the most recent.
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> fmt::Debug for HistoryQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryQueue")
            .field("len", &self.entries.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl<T> HistoryQueue<T> {
    /// Create an empty queue holding at most `capacity` entries.
    ///
    /// A capacity of zero is allowed and retains nothing.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    /// Build a queue from entries listed most recent first.
    ///
    /// Entries beyond `capacity` (the oldest ones) are dropped.
    #[must_use]
    pub fn from_recent_first(capacity: usize, entries: impl IntoIterator<Item = T>) -> Self {
        Self {
            entries: entries.into_iter().take(capacity).collect(),
            capacity,
        }
    }

    // ========================================================================
    // Core Operations
    // ========================================================================

    /// Push an entry at the front.
    ///
    /// Returns the entry evicted from the back when the queue was already
    /// full, if any.
    pub fn push_front(&mut self, entry: T) -> Option<T> {
        self.entries.push_front(entry);
        if self.entries.len() > self.capacity {
            return self.entries.pop_back();
        }
        None
    }

    /// Remove and return the most recent entry.
    pub fn pop_front(&mut self) -> Option<T> {
        self.entries.pop_front()
    }

    /// Borrow the most recent entry.
    #[must_use]
    pub fn peek_front(&self) -> Option<&T> {
        self.entries.front()
    }

    /// Remove every entry. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replace the capacity, discarding all current entries.
    pub fn set_capacity(&mut self, capacity: usize) {
        *self = Self::new(capacity);
    }

    // ========================================================================
    // Info
    // ========================================================================

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Iterate from the most recent entry to the oldest.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &T> + DoubleEndedIterator {
        self.entries.iter()
    }
}

impl<T: Clone> HistoryQueue<T> {
    /// Copy the entries out, most recent first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.entries.iter().cloned().collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
