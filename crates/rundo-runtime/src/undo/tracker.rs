#![forbid(unsafe_code)]

//! Debounced edit tracking with undo/redo replay.
//!
//! [`EditTracker`] turns the host's "text is about to change" / "text
//! changed" notifications into history entries. Rapid edits are coalesced:
//! every change pushes the debounce deadline forward, and only a quiet
//! period of at least `debounce_ms` commits one [`TextDelta`] covering
//! everything typed since the window opened.
//!
//! # State Machine
//!
//! ```text
//!                before / start timer
//!      ┌──────┐ ─────────────────────► ┌───────────────┐
//!      │ Idle │                        │ PendingCommit │ ◄─┐ after /
//!      └──────┘ ◄───────────────────── └───────────────┘ ──┘ restart timer
//!         ▲        timer fired / commit
//!         │
//!         │ after (echo consumed)
//!  ┌────────────────────┐
//!  │ SuppressNextCommit │ ◄── undo/redo replayed an edit the host will echo
//!  └────────────────────┘
//! ```
//!
//! The host pumps the timer with [`EditTracker::tick`] (or `tick_at`) from
//! the same event loop that delivers the notifications.
//!
//! # Failure Modes
//!
//! | Condition | Outcome | State afterwards |
//! |-----------|---------|------------------|
//! | Nothing to undo/redo | `QueueEmpty` | unchanged |
//! | Entry no longer fits the text | `ApplyFailed` | entry dropped, baseline resynced |
//! | Zero capacity or debounce | `Err(ConfigError)` | previous config kept |

use std::fmt;

use rundo_text::{Splice, SpliceError, TextDelta, diff};
use web_time::{Duration, Instant};

use super::history::HistoryQueue;
use super::surface::{TextSurface, UndoRedoObserver};
use crate::config::{ConfigError, TrackerConfig};
use crate::state_persistence::HistorySnapshot;
use crate::timer::CoalescingTimer;

/// Whether a coalescing window is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingState {
    /// No window open; the next change starts one.
    #[default]
    Idle,
    /// A window is open and the debounce timer is running.
    PendingCommit,
    /// The next change notification is the host echoing an edit the
    /// tracker made itself and must not open a window.
    SuppressNextCommit,
}

/// Result of an [`EditTracker::undo`] or [`EditTracker::redo`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoRedoOutcome {
    /// The entry was replayed onto the surface and moved to the other queue.
    Applied,
    /// There was no entry to replay.
    QueueEmpty,
    /// The entry no longer fits the surface text and was dropped.
    ApplyFailed(SpliceError),
}

impl UndoRedoOutcome {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Result of closing a coalescing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// No window was due (or none was open).
    NotDue,
    /// The window closed but the text ended where it started.
    Discarded,
    /// A new entry was pushed onto the undo queue.
    Committed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Undo,
    Redo,
}

impl Direction {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Undo => "undo",
            Self::Redo => "redo",
        }
    }
}

/// Observes a [`TextSurface`] and keeps its undo/redo history.
pub struct EditTracker<S: TextSurface> {
    surface: S,
    observer: Option<Box<dyn UndoRedoObserver>>,
    config: TrackerConfig,
    timer: CoalescingTimer,
    /// Entries available for undo, most recent first.
    undo_queue: HistoryQueue<TextDelta>,
    /// Entries available for redo, most recent first.
    redo_queue: HistoryQueue<TextDelta>,
    /// Text at the start of the open window, or after the last replay.
    old_text: Option<String>,
    state: TrackingState,
}

impl<S: TextSurface> fmt::Debug for EditTracker<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditTracker")
            .field("state", &self.state)
            .field("undo_depth", &self.undo_queue.len())
            .field("redo_depth", &self.redo_queue.len())
            .field("timer_pending", &self.timer.is_pending())
            .field("has_observer", &self.observer.is_some())
            .field("config", &self.config)
            .finish()
    }
}

impl<S: TextSurface> EditTracker<S> {
    /// Create a tracker over `surface`.
    pub fn new(surface: S, config: TrackerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            surface,
            observer: None,
            undo_queue: HistoryQueue::new(config.history_capacity),
            redo_queue: HistoryQueue::new(config.history_capacity),
            config,
            timer: CoalescingTimer::new(),
            old_text: None,
            state: TrackingState::Idle,
        })
    }

    /// Attach the observer told about performed undo/redo operations.
    #[must_use]
    pub fn with_observer(mut self, observer: impl UndoRedoObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    // ========================================================================
    // Change Notifications
    // ========================================================================

    /// The host is about to change the text.
    pub fn on_before_text_changes(&mut self) {
        self.on_before_text_changes_at(Instant::now());
    }

    /// [`on_before_text_changes`](Self::on_before_text_changes) with an explicit clock.
    pub fn on_before_text_changes_at(&mut self, now: Instant) {
        if self.old_text.is_none() {
            self.old_text = Some(self.surface.text().into_owned());
        }
        if self.state == TrackingState::Idle {
            self.timer.start_at(now, self.config.debounce());
            self.state = TrackingState::PendingCommit;
        }
    }

    /// The host has changed the text.
    pub fn on_after_text_changes(&mut self) {
        self.on_after_text_changes_at(Instant::now());
    }

    /// [`on_after_text_changes`](Self::on_after_text_changes) with an explicit clock.
    pub fn on_after_text_changes_at(&mut self, now: Instant) {
        match self.state {
            TrackingState::SuppressNextCommit => self.state = TrackingState::Idle,
            TrackingState::PendingCommit => {
                self.timer.restart_at(now, self.config.debounce());
            }
            TrackingState::Idle => {}
        }
    }

    /// Commit the open window if its debounce deadline has passed.
    pub fn tick(&mut self) -> CommitOutcome {
        self.tick_at(Instant::now())
    }

    /// [`tick`](Self::tick) with an explicit clock.
    pub fn tick_at(&mut self, now: Instant) -> CommitOutcome {
        match self.timer.poll_at(now) {
            Some(_) => self.commit(),
            None => CommitOutcome::NotDue,
        }
    }

    /// Commit the open window now, without waiting for the deadline.
    pub fn flush(&mut self) -> CommitOutcome {
        match self.timer.expire() {
            Some(_) => self.commit(),
            None => CommitOutcome::NotDue,
        }
    }

    fn commit(&mut self) -> CommitOutcome {
        self.state = TrackingState::Idle;
        let Some(old) = self.old_text.take() else {
            return CommitOutcome::Discarded;
        };
        let current = self.surface.text();
        if old == *current {
            tracing::trace!("edit window closed without net change");
            return CommitOutcome::Discarded;
        }

        let delta = diff(&old, &current);
        if self.config.clear_redo_on_commit && !self.redo_queue.is_empty() {
            tracing::debug!(dropped = self.redo_queue.len(), "new edit cleared redo history");
            self.redo_queue.clear();
        }
        tracing::debug!(
            kind = delta.kind().as_str(),
            start = delta.start(),
            removed = delta.removed_text().len(),
            inserted = delta.inserted_text().len(),
            "history entry committed"
        );
        if self.undo_queue.push_front(delta).is_some() {
            tracing::debug!(capacity = self.undo_queue.capacity(), "oldest undo entry evicted");
        }
        CommitOutcome::Committed
    }

    // ========================================================================
    // Undo / Redo
    // ========================================================================

    /// Revert the most recent entry.
    ///
    /// A window still open is committed first, so the text typed in it is
    /// what gets undone.
    pub fn undo(&mut self) -> UndoRedoOutcome {
        self.replay(Direction::Undo)
    }

    /// Re-apply the most recently undone entry.
    pub fn redo(&mut self) -> UndoRedoOutcome {
        self.replay(Direction::Redo)
    }

    fn replay(&mut self, direction: Direction) -> UndoRedoOutcome {
        self.flush();

        let source = match direction {
            Direction::Undo => &mut self.undo_queue,
            Direction::Redo => &mut self.redo_queue,
        };
        let Some(delta) = source.pop_front() else {
            tracing::debug!(op = direction.as_str(), "nothing to replay");
            return UndoRedoOutcome::QueueEmpty;
        };

        let splice = match direction {
            Direction::Undo => delta.inverse(),
            Direction::Redo => delta.forward(),
        };
        let result = self.apply(splice, delta.start());
        self.old_text = Some(self.surface.text().into_owned());

        if let Err(err) = result {
            tracing::warn!(
                op = direction.as_str(),
                kind = delta.kind().as_str(),
                start = delta.start(),
                error = %err,
                "history entry could not be applied; dropped"
            );
            return UndoRedoOutcome::ApplyFailed(err);
        }

        if self.config.host_echoes_edits && !delta.is_unchanged() {
            self.state = TrackingState::SuppressNextCommit;
        }
        tracing::debug!(
            op = direction.as_str(),
            kind = delta.kind().as_str(),
            start = delta.start(),
            "history entry replayed"
        );

        let target = match direction {
            Direction::Undo => &mut self.redo_queue,
            Direction::Redo => &mut self.undo_queue,
        };
        target.push_front(delta);

        if let Some(observer) = self.observer.as_mut() {
            match direction {
                Direction::Undo => observer.on_undo_performed(),
                Direction::Redo => observer.on_redo_performed(),
            }
        }
        UndoRedoOutcome::Applied
    }

    fn apply(&mut self, splice: Option<Splice<'_>>, caret: usize) -> Result<(), SpliceError> {
        if let Some(Splice { range, replacement }) = splice {
            self.surface.apply_edit(range, replacement)?;
        }
        self.surface.set_caret(caret);
        Ok(())
    }

    /// Empty both history queues. The open window, if any, is kept.
    pub fn clear_all_queues(&mut self) {
        self.undo_queue.clear();
        self.redo_queue.clear();
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Change the queue capacity. Both queues are rebuilt empty.
    pub fn set_history_capacity(&mut self, capacity: usize) -> Result<(), ConfigError> {
        let candidate = self.config.clone().with_history_capacity(capacity);
        if let Err(err) = candidate.validate() {
            tracing::warn!(error = %err, "history capacity rejected");
            return Err(err);
        }
        self.config = candidate;
        self.undo_queue.set_capacity(capacity);
        self.redo_queue.set_capacity(capacity);
        tracing::debug!(capacity, "history capacity changed; history discarded");
        Ok(())
    }

    /// Change the debounce window. A running timer keeps its deadline.
    pub fn set_debounce_millis(&mut self, millis: u64) -> Result<(), ConfigError> {
        let candidate = self.config.clone().with_debounce_ms(millis);
        if let Err(err) = candidate.validate() {
            tracing::warn!(error = %err, "debounce window rejected");
            return Err(err);
        }
        self.config = candidate;
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    // ========================================================================
    // Save / Restore
    // ========================================================================

    /// Copy both queues out for host-managed persistence.
    #[must_use]
    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            undo: self.undo_queue.to_vec(),
            redo: self.redo_queue.to_vec(),
        }
    }

    /// Replace both queues with a saved snapshot.
    ///
    /// Any open window is abandoned. Lists longer than the current capacity
    /// keep their most recent entries.
    pub fn restore(&mut self, snapshot: HistorySnapshot) {
        let capacity = self.config.history_capacity;
        let (undo_len, redo_len) = (snapshot.undo.len(), snapshot.redo.len());
        self.timer.cancel();
        self.old_text = None;
        self.undo_queue = HistoryQueue::from_recent_first(capacity, snapshot.undo);
        self.redo_queue = HistoryQueue::from_recent_first(capacity, snapshot.redo);
        self.state = if self.config.host_echoes_edits {
            TrackingState::SuppressNextCommit
        } else {
            TrackingState::Idle
        };
        tracing::debug!(
            undo = self.undo_queue.len(),
            redo = self.redo_queue.len(),
            truncated = (undo_len + redo_len) - (self.undo_queue.len() + self.redo_queue.len()),
            "history restored"
        );
    }

    // ========================================================================
    // Info
    // ========================================================================

    #[must_use]
    pub fn state(&self) -> TrackingState {
        self.state
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_queue.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_queue.is_empty()
    }

    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo_queue.len()
    }

    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redo_queue.len()
    }

    /// The entry the next [`undo`](Self::undo) would revert.
    #[must_use]
    pub fn next_undo(&self) -> Option<&TextDelta> {
        self.undo_queue.peek_front()
    }

    /// The entry the next [`redo`](Self::redo) would re-apply.
    #[must_use]
    pub fn next_redo(&self) -> Option<&TextDelta> {
        self.redo_queue.peek_front()
    }

    /// Whether a coalescing window is waiting on its deadline.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.timer.is_pending()
    }

    /// Time until the open window commits, for scheduling the next tick.
    #[must_use]
    pub fn time_until_commit(&self, now: Instant) -> Option<Duration> {
        self.timer.time_remaining(now)
    }

    /// Baseline text the open window will be diffed against.
    #[must_use]
    pub fn old_text(&self) -> Option<&str> {
        self.old_text.as_deref()
    }

    /// Current surface text.
    #[must_use]
    pub fn current_text(&self) -> String {
        self.surface.text().into_owned()
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access for host edits; wrap them in the change notifications.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }
}
