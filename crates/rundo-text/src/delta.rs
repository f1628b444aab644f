#![forbid(unsafe_code)]

//! Text deltas: one contiguous changed region between two texts.
//!
//! A [`TextDelta`] records where two texts diverge and what was removed and
//! inserted there. It is produced by [`diff`](crate::diff) and is immutable
//! afterwards. Replaying it against text is done through [`Splice`]:
//!
//! ```text
//!   old:  "hello world"          forward:  old[6..6]  <- "brave "
//!   new:  "hello brave world"    inverse:  new[6..12] <- ""
//!                 ^^^^^^
//!          start=6, old_end=6, new_end=12
//! ```
//!
//! # Invariants
//!
//! 1. `start <= old_end` and `start <= new_end`
//! 2. `removed_text.len() == old_end - start`
//! 3. `inserted_text.len() == new_end - start`
//! 4. `kind` agrees with which of the two texts are empty
//!
//! All offsets are UTF-8 byte offsets and always fall on char boundaries.

use std::fmt;
use std::ops::Range;

/// Classification of a [`TextDelta`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DeltaKind {
    /// Text was inserted, nothing removed.
    Addition,
    /// Text was removed, nothing inserted.
    Deletion,
    /// Text was removed and different text inserted in its place.
    Replacement,
    /// Old and new text are identical.
    Unchanged,
}

impl DeltaKind {
    /// Derive the kind from the removed and inserted text.
    #[must_use]
    pub fn classify(removed: &str, inserted: &str) -> Self {
        match (removed.is_empty(), inserted.is_empty()) {
            (true, true) => Self::Unchanged,
            (true, false) => Self::Addition,
            (false, true) => Self::Deletion,
            (false, false) => Self::Replacement,
        }
    }

    /// Short lowercase name, used in log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Addition => "addition",
            Self::Deletion => "deletion",
            Self::Replacement => "replacement",
            Self::Unchanged => "unchanged",
        }
    }
}

impl fmt::Display for DeltaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logical edit, expressed as a single changed region.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawDelta", into = "RawDelta"))]
pub struct TextDelta {
    kind: DeltaKind,
    start: usize,
    old_end: usize,
    new_end: usize,
    removed_text: String,
    inserted_text: String,
}

impl TextDelta {
    /// Build a delta from the two sides of a changed region.
    ///
    /// `removed` is the old text at `start..`, `inserted` the new text at
    /// `start..`. Only the diff engine and deserialization construct deltas.
    pub(crate) fn from_region(start: usize, removed: &str, inserted: &str) -> Self {
        Self {
            kind: DeltaKind::classify(removed, inserted),
            start,
            old_end: start + removed.len(),
            new_end: start + inserted.len(),
            removed_text: removed.to_owned(),
            inserted_text: inserted.to_owned(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> DeltaKind {
        self.kind
    }

    /// First offset where old and new text diverge.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// End of the affected region in the old text.
    #[must_use]
    pub fn old_end(&self) -> usize {
        self.old_end
    }

    /// End of the affected region in the new text.
    #[must_use]
    pub fn new_end(&self) -> usize {
        self.new_end
    }

    /// Text present before the edit, `old[start..old_end]`.
    #[must_use]
    pub fn removed_text(&self) -> &str {
        &self.removed_text
    }

    /// Text present after the edit, `new[start..new_end]`.
    #[must_use]
    pub fn inserted_text(&self) -> &str {
        &self.inserted_text
    }

    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.kind == DeltaKind::Unchanged
    }

    /// The edit that turns the old text into the new text.
    ///
    /// Returns `None` for [`DeltaKind::Unchanged`].
    #[must_use]
    pub fn forward(&self) -> Option<Splice<'_>> {
        match self.kind {
            DeltaKind::Unchanged => None,
            // Addition inserts at start (empty range); Deletion and
            // Replacement overwrite start..old_end.
            DeltaKind::Addition | DeltaKind::Deletion | DeltaKind::Replacement => Some(Splice {
                range: self.start..self.old_end,
                replacement: &self.inserted_text,
            }),
        }
    }

    /// The edit that turns the new text back into the old text.
    ///
    /// Returns `None` for [`DeltaKind::Unchanged`].
    #[must_use]
    pub fn inverse(&self) -> Option<Splice<'_>> {
        match self.kind {
            DeltaKind::Unchanged => None,
            DeltaKind::Addition | DeltaKind::Deletion | DeltaKind::Replacement => Some(Splice {
                range: self.start..self.new_end,
                replacement: &self.removed_text,
            }),
        }
    }

    /// Apply the forward edit to `old`, producing the new text.
    pub fn apply_forward(&self, old: &str) -> Result<String, SpliceError> {
        let mut text = old.to_owned();
        if let Some(splice) = self.forward() {
            splice.apply_to(&mut text)?;
        }
        Ok(text)
    }

    /// Apply the inverse edit to `new`, producing the old text.
    pub fn apply_inverse(&self, new: &str) -> Result<String, SpliceError> {
        let mut text = new.to_owned();
        if let Some(splice) = self.inverse() {
            splice.apply_to(&mut text)?;
        }
        Ok(text)
    }

    /// Approximate heap + inline size, for diagnostics.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        std::mem::size_of::<Self>() + self.removed_text.len() + self.inserted_text.len()
    }
}

// ============================================================================
// Splice
// ============================================================================

/// A replacement of `range` with `replacement` in some text.
///
/// An empty range is a pure insertion; an empty replacement is a pure
/// deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice<'a> {
    pub range: Range<usize>,
    pub replacement: &'a str,
}

impl Splice<'_> {
    /// Check the range against `text` without modifying it.
    pub fn check(&self, text: &str) -> Result<(), SpliceError> {
        let Range { start, end } = self.range;
        if start > end || end > text.len() {
            return Err(SpliceError::OutOfBounds {
                start,
                end,
                len: text.len(),
            });
        }
        for index in [start, end] {
            if !text.is_char_boundary(index) {
                return Err(SpliceError::NotCharBoundary { index });
            }
        }
        Ok(())
    }

    /// Replace the range in `text`. On error `text` is left untouched.
    pub fn apply_to(&self, text: &mut String) -> Result<(), SpliceError> {
        self.check(text)?;
        text.replace_range(self.range.clone(), self.replacement);
        Ok(())
    }
}

/// Errors from applying a [`Splice`] to text it no longer fits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpliceError {
    /// The range is inverted or extends past the end of the text.
    OutOfBounds { start: usize, end: usize, len: usize },
    /// A range endpoint splits a multi-byte character.
    NotCharBoundary { index: usize },
}

impl fmt::Display for SpliceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { start, end, len } => {
                write!(f, "range {start}..{end} out of bounds (length {len})")
            }
            Self::NotCharBoundary { index } => {
                write!(f, "offset {index} is not on a char boundary")
            }
        }
    }
}

impl std::error::Error for SpliceError {}

// ============================================================================
// Serialized form
// ============================================================================

/// Errors from rebuilding a [`TextDelta`] out of stored fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeltaError {
    /// An end offset precedes the start offset.
    InvertedRegion { start: usize, end: usize },
    /// Stored end offset disagrees with the stored text length.
    LengthMismatch { expected: usize, actual: usize },
    /// Stored kind disagrees with the stored texts.
    KindMismatch { stored: DeltaKind, derived: DeltaKind },
}

impl fmt::Display for DeltaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvertedRegion { start, end } => {
                write!(f, "region end {end} precedes start {start}")
            }
            Self::LengthMismatch { expected, actual } => {
                write!(f, "region spans {expected} bytes but text has {actual}")
            }
            Self::KindMismatch { stored, derived } => {
                write!(f, "stored kind '{stored}' does not match texts ('{derived}')")
            }
        }
    }
}

impl std::error::Error for DeltaError {}

/// Field-for-field stored form of a [`TextDelta`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawDelta {
    pub kind: DeltaKind,
    pub start: usize,
    pub old_end: usize,
    pub new_end: usize,
    pub removed_text: String,
    pub inserted_text: String,
}

impl TryFrom<RawDelta> for TextDelta {
    type Error = DeltaError;

    fn try_from(raw: RawDelta) -> Result<Self, Self::Error> {
        for (end, text) in [
            (raw.old_end, &raw.removed_text),
            (raw.new_end, &raw.inserted_text),
        ] {
            if end < raw.start {
                return Err(DeltaError::InvertedRegion {
                    start: raw.start,
                    end,
                });
            }
            if end - raw.start != text.len() {
                return Err(DeltaError::LengthMismatch {
                    expected: end - raw.start,
                    actual: text.len(),
                });
            }
        }
        let derived = DeltaKind::classify(&raw.removed_text, &raw.inserted_text);
        if derived != raw.kind {
            return Err(DeltaError::KindMismatch {
                stored: raw.kind,
                derived,
            });
        }
        Ok(Self {
            kind: raw.kind,
            start: raw.start,
            old_end: raw.old_end,
            new_end: raw.new_end,
            removed_text: raw.removed_text,
            inserted_text: raw.inserted_text,
        })
    }
}

impl From<TextDelta> for RawDelta {
    fn from(delta: TextDelta) -> Self {
        Self {
            kind: delta.kind,
            start: delta.start,
            old_end: delta.old_end,
            new_end: delta.new_end,
            removed_text: delta.removed_text,
            inserted_text: delta.inserted_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(kind: DeltaKind, start: usize, removed: &str, inserted: &str) -> RawDelta {
        RawDelta {
            kind,
            start,
            old_end: start + removed.len(),
            new_end: start + inserted.len(),
            removed_text: removed.into(),
            inserted_text: inserted.into(),
        }
    }

    #[test]
    fn classify_covers_all_kinds() {
        assert_eq!(DeltaKind::classify("", ""), DeltaKind::Unchanged);
        assert_eq!(DeltaKind::classify("", "x"), DeltaKind::Addition);
        assert_eq!(DeltaKind::classify("x", ""), DeltaKind::Deletion);
        assert_eq!(DeltaKind::classify("x", "y"), DeltaKind::Replacement);
    }

    #[test]
    fn from_region_sets_ends() {
        let delta = TextDelta::from_region(3, "s", "");
        assert_eq!(delta.kind(), DeltaKind::Deletion);
        assert_eq!((delta.start(), delta.old_end(), delta.new_end()), (3, 4, 3));
    }

    #[test]
    fn unchanged_has_no_splices() {
        let delta = TextDelta::from_region(2, "", "");
        assert!(delta.forward().is_none());
        assert!(delta.inverse().is_none());
        assert_eq!(delta.apply_forward("ab").unwrap(), "ab");
    }

    #[test]
    fn replacement_splices() {
        let delta = TextDelta::from_region(1, "b", "x");
        let fwd = delta.forward().unwrap();
        assert_eq!(fwd.range, 1..2);
        assert_eq!(fwd.replacement, "x");
        let inv = delta.inverse().unwrap();
        assert_eq!(inv.range, 1..2);
        assert_eq!(inv.replacement, "b");
    }

    #[test]
    fn splice_out_of_bounds_leaves_text() {
        let mut text = String::from("abc");
        let splice = Splice {
            range: 2..5,
            replacement: "",
        };
        assert_eq!(
            splice.apply_to(&mut text),
            Err(SpliceError::OutOfBounds {
                start: 2,
                end: 5,
                len: 3
            })
        );
        assert_eq!(text, "abc");
    }

    #[test]
    fn splice_rejects_split_char() {
        let mut text = String::from("é");
        let splice = Splice {
            range: 1..1,
            replacement: "x",
        };
        assert_eq!(
            splice.apply_to(&mut text),
            Err(SpliceError::NotCharBoundary { index: 1 })
        );
    }

    #[test]
    fn raw_roundtrip_accepts_consistent_fields() {
        let delta = TextDelta::try_from(raw(DeltaKind::Addition, 6, "", "brave ")).unwrap();
        assert_eq!(delta.new_end(), 12);
        let back = RawDelta::from(delta.clone());
        assert_eq!(TextDelta::try_from(back).unwrap(), delta);
    }

    #[test]
    fn raw_rejects_kind_mismatch() {
        let err = TextDelta::try_from(raw(DeltaKind::Deletion, 0, "", "a")).unwrap_err();
        assert_eq!(
            err,
            DeltaError::KindMismatch {
                stored: DeltaKind::Deletion,
                derived: DeltaKind::Addition
            }
        );
    }

    #[test]
    fn raw_rejects_length_mismatch() {
        let mut fields = raw(DeltaKind::Deletion, 0, "ab", "");
        fields.old_end = 5;
        assert!(matches!(
            TextDelta::try_from(fields),
            Err(DeltaError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn raw_rejects_inverted_region() {
        let mut fields = raw(DeltaKind::Unchanged, 4, "", "");
        fields.new_end = 1;
        assert_eq!(
            TextDelta::try_from(fields),
            Err(DeltaError::InvertedRegion { start: 4, end: 1 })
        );
    }

    #[test]
    fn error_display() {
        let err = SpliceError::OutOfBounds {
            start: 1,
            end: 9,
            len: 4,
        };
        assert_eq!(err.to_string(), "range 1..9 out of bounds (length 4)");
    }
}
