#![forbid(unsafe_code)]

//! Debounced undo/redo for free-form text.
//!
//! This module ties a host text surface to a pair of bounded history
//! queues:
//!
//! - **Coalescing**: change notifications inside the debounce window form one entry
//! - **Diffing**: each entry is the single changed region between window start and end
//! - **Bounded history**: the oldest entries fall off once a queue is full
//! - **Replay**: undo applies the inverse region, redo the forward one
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          EditTracker                            │
//! │  before/after ──► CoalescingTimer ──► diff(old, current)        │
//! │                                            │                    │
//! │  ┌──────────────────┐   undo()   ┌──────────────────┐           │
//! │  │   Undo Queue     │ ─────────► │   Redo Queue     │           │
//! │  │  [d3, d2, d1]    │ ◄───────── │  [d4]            │           │
//! │  └──────────────────┘   redo()   └──────────────────┘           │
//! │                 │                                               │
//! │                 ▼                                               │
//! │        TextSurface (host): text / apply_edit / set_caret        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```
//! use rundo_runtime::undo::{EditTracker, StringSurface, UndoRedoOutcome};
//! use rundo_runtime::TrackerConfig;
//!
//! let mut tracker = EditTracker::new(StringSurface::new("cat"), TrackerConfig::default())?;
//!
//! tracker.on_before_text_changes();
//! tracker.surface_mut().insert(3, "s")?;
//! tracker.on_after_text_changes();
//!
//! // Undo commits the open window first, then reverts it.
//! assert_eq!(tracker.undo(), UndoRedoOutcome::Applied);
//! assert_eq!(tracker.surface().as_str(), "cat");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod history;
pub mod surface;
pub mod tracker;

pub use history::HistoryQueue;
pub use surface::{StringSurface, TextSurface, UndoRedoObserver};
pub use tracker::{CommitOutcome, EditTracker, TrackingState, UndoRedoOutcome};
