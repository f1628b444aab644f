#![forbid(unsafe_code)]

//! Undo/redo history snapshots for host-managed save/restore.
//!
//! The tracker does not store anything itself. A host that survives a
//! lifecycle boundary (suspend/resume, view recreation) takes a
//! [`HistorySnapshot`] with [`EditTracker::snapshot`], keeps it wherever it
//! keeps its own state, and hands it back to [`EditTracker::restore`].
//!
//! # Shape
//!
//! Two lists of deltas, most recent first:
//!
//! ```json
//! {
//!   "undo": [{"kind": "addition", "start": 6, "old_end": 6, "new_end": 12,
//!             "removed_text": "", "inserted_text": "brave "}],
//!   "redo": []
//! }
//! ```
//!
//! With the `state-persistence` feature the snapshot (de)serializes through
//! serde; deltas whose fields disagree with each other are rejected on load.
//!
//! [`EditTracker::snapshot`]: crate::undo::EditTracker::snapshot
//! [`EditTracker::restore`]: crate::undo::EditTracker::restore

use rundo_text::TextDelta;

/// Saved contents of both history queues.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct HistorySnapshot {
    /// Undo entries, most recent first.
    pub undo: Vec<TextDelta>,
    /// Redo entries, most recent first.
    pub redo: Vec<TextDelta>,
}

impl HistorySnapshot {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.undo.is_empty() && self.redo.is_empty()
    }

    /// Encode as JSON.
    #[cfg(feature = "state-persistence")]
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::Serialization(e.to_string()))
    }

    /// Decode from JSON.
    #[cfg(feature = "state-persistence")]
    pub fn from_json(s: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(s).map_err(|e| SnapshotError::Serialization(e.to_string()))
    }
}

/// Errors from encoding or decoding a [`HistorySnapshot`].
#[cfg(feature = "state-persistence")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// JSON encode/decode failed, or a stored delta was inconsistent.
    Serialization(String),
}

#[cfg(feature = "state-persistence")]
impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialization(msg) => write!(f, "serialization error: {msg}"),
        }
    }
}

#[cfg(feature = "state-persistence")]
impl std::error::Error for SnapshotError {}
