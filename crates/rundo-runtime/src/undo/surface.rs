#![forbid(unsafe_code)]

//! Host capabilities consumed and produced by the edit tracker.
//!
//! The tracker never owns a widget type. It is handed something that
//! implements [`TextSurface`] (read text, replace a range, move the caret)
//! and, optionally, an [`UndoRedoObserver`] to tell when history was
//! replayed. [`StringSurface`] is a plain in-memory surface for headless
//! hosts and tests.

use std::borrow::Cow;
use std::ops::Range;

use rundo_text::{Splice, SpliceError};

/// The editable text the tracker observes and replays history against.
pub trait TextSurface {
    /// The full current text.
    fn text(&self) -> Cow<'_, str>;

    /// Replace `range` with `replacement`.
    ///
    /// An empty range is a pure insertion, an empty replacement a pure
    /// deletion. Must leave the text untouched when it returns an error.
    fn apply_edit(&mut self, range: Range<usize>, replacement: &str) -> Result<(), SpliceError>;

    /// Move the caret (collapsing any selection) to `position`.
    fn set_caret(&mut self, position: usize);
}

/// Callbacks fired after history was replayed onto the surface.
pub trait UndoRedoObserver {
    fn on_undo_performed(&mut self) {}

    fn on_redo_performed(&mut self) {}
}

/// In-memory [`TextSurface`]: a string and a caret.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringSurface {
    text: String,
    caret: usize,
}

impl StringSurface {
    /// Create a surface holding `text`, caret at the end.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let caret = text.len();
        Self { text, caret }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Insert `text` at `at` and leave the caret after it.
    pub fn insert(&mut self, at: usize, text: &str) -> Result<(), SpliceError> {
        self.replace(at..at, text)
    }

    /// Delete `range`, caret at its start.
    pub fn delete(&mut self, range: Range<usize>) -> Result<(), SpliceError> {
        self.replace(range, "")
    }

    /// Replace `range` with `text`, caret after the new text.
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> Result<(), SpliceError> {
        let start = range.start;
        self.apply_edit(range, text)?;
        self.caret = start + text.len();
        Ok(())
    }

    /// Replace the whole text, out of band of any tracker.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.caret = self.caret.min(self.text.len());
    }
}

impl TextSurface for StringSurface {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }

    fn apply_edit(&mut self, range: Range<usize>, replacement: &str) -> Result<(), SpliceError> {
        Splice { range, replacement }.apply_to(&mut self.text)
    }

    fn set_caret(&mut self, position: usize) {
        self.caret = position.min(self.text.len());
    }
}

impl From<&str> for StringSurface {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
