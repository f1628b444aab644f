#![forbid(unsafe_code)]

//! rundo runtime
//!
//! This crate provides the stateful half of rundo: it watches a host text
//! surface, coalesces bursts of edits, and keeps bounded undo/redo history.
//!
//! # Key Components
//!
//! - [`EditTracker`] - change-notification state machine and undo/redo replay
//! - [`HistoryQueue`] - bounded, most-recent-first entry storage
//! - [`CoalescingTimer`] - restartable debounce deadline
//! - [`TextSurface`] - the capability a host implements to be tracked
//! - [`TrackerConfig`] - debounce window, capacity and behaviour switches
//! - [`HistorySnapshot`] - both queues, for host-managed save/restore
//!
//! # How it fits in the system
//! Diffing and the delta type live in `rundo-text`; this crate decides when
//! to diff and what to do with the result. Everything runs on the caller's
//! event loop: nothing here spawns threads or sleeps.

pub mod config;
pub mod state_persistence;
pub mod timer;
pub mod undo;

pub use config::{ConfigError, DEFAULT_DEBOUNCE_MS, DEFAULT_HISTORY_CAPACITY, TrackerConfig};
#[cfg(feature = "state-persistence")]
pub use state_persistence::SnapshotError;
pub use state_persistence::HistorySnapshot;
pub use timer::{CoalescingTimer, TimerToken};
pub use undo::{
    CommitOutcome, EditTracker, HistoryQueue, StringSurface, TextSurface, TrackingState,
    UndoRedoObserver, UndoRedoOutcome,
};

pub use rundo_text::{DeltaKind, SpliceError, TextDelta};
