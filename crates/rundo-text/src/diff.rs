#![forbid(unsafe_code)]

//! Common prefix/suffix reduction between two texts.
//!
//! [`diff`] finds the longest shared head and the longest shared tail of
//! the two texts and reports whatever lies between them as the single
//! changed region. The tail scan only looks at what is left after the head,
//! so the two never overlap:
//!
//! ```text
//!   old: "aaa"    prefix = 3, remainders "" / "a", suffix = 0
//!   new: "aaaa"   -> Addition of "a" at 3
//! ```
//!
//! This is not a minimal edit script. For an edit inside a repeated run the
//! region can sit at a different (equally valid) place than where the user
//! typed, but it always describes one contiguous change, and the forward
//! and inverse splices always reproduce the two inputs exactly.

use crate::delta::TextDelta;

/// Compute the changed region between `old` and `new`.
///
/// Total over all inputs; identical texts (including two empty ones) yield
/// [`DeltaKind::Unchanged`](crate::DeltaKind::Unchanged).
#[must_use]
pub fn diff(old: &str, new: &str) -> TextDelta {
    let prefix = common_prefix_len(old, new);
    let suffix = common_suffix_len(&old[prefix..], &new[prefix..]);

    let old_end = old.len() - suffix;
    let new_end = new.len() - suffix;
    let delta = TextDelta::from_region(prefix, &old[prefix..old_end], &new[prefix..new_end]);

    tracing::trace!(
        kind = delta.kind().as_str(),
        start = prefix,
        old_end,
        new_end,
        "text diff"
    );
    delta
}

/// Byte length of the longest common leading run of chars.
#[must_use]
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| x.len_utf8())
        .sum()
}

/// Byte length of the longest common trailing run of chars.
#[must_use]
pub fn common_suffix_len(a: &str, b: &str) -> usize {
    a.chars()
        .rev()
        .zip(b.chars().rev())
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| x.len_utf8())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DeltaKind;

    #[test]
    fn insertion_in_the_middle() {
        let delta = diff("hello world", "hello brave world");
        assert_eq!(delta.kind(), DeltaKind::Addition);
        assert_eq!(delta.start(), 6);
        assert_eq!(delta.old_end(), 6);
        assert_eq!(delta.new_end(), 12);
        assert_eq!(delta.inserted_text(), "brave ");
        assert_eq!(delta.removed_text(), "");
    }

    #[test]
    fn trailing_deletion() {
        let delta = diff("cats", "cat");
        assert_eq!(delta.kind(), DeltaKind::Deletion);
        assert_eq!((delta.start(), delta.old_end(), delta.new_end()), (3, 4, 3));
        assert_eq!(delta.removed_text(), "s");
    }

    #[test]
    fn single_char_replacement() {
        let delta = diff("abc", "axc");
        assert_eq!(delta.kind(), DeltaKind::Replacement);
        assert_eq!((delta.start(), delta.old_end(), delta.new_end()), (1, 2, 2));
        assert_eq!(delta.removed_text(), "b");
        assert_eq!(delta.inserted_text(), "x");
    }

    #[test]
    fn repeated_run_does_not_overlap() {
        let delta = diff("aaa", "aaaa");
        assert_eq!(delta.kind(), DeltaKind::Addition);
        assert_eq!((delta.start(), delta.old_end(), delta.new_end()), (3, 3, 4));
        assert_eq!(delta.inserted_text(), "a");

        let delta = diff("aaaa", "aa");
        assert_eq!(delta.kind(), DeltaKind::Deletion);
        assert_eq!((delta.start(), delta.old_end(), delta.new_end()), (2, 4, 2));
    }

    #[test]
    fn empty_inputs() {
        let delta = diff("", "");
        assert!(delta.is_unchanged());
        assert_eq!((delta.start(), delta.old_end(), delta.new_end()), (0, 0, 0));

        let delta = diff("", "abc");
        assert_eq!(delta.kind(), DeltaKind::Addition);
        assert_eq!(delta.new_end(), 3);

        let delta = diff("abc", "");
        assert_eq!(delta.kind(), DeltaKind::Deletion);
        assert_eq!(delta.old_end(), 3);
    }

    #[test]
    fn identical_text_is_unchanged_at_end() {
        let delta = diff("same", "same");
        assert!(delta.is_unchanged());
        assert_eq!(delta.start(), 4);
        assert_eq!(delta.old_end(), 4);
        assert_eq!(delta.new_end(), 4);
    }

    #[test]
    fn full_replacement() {
        let delta = diff("abc", "xyz");
        assert_eq!(delta.kind(), DeltaKind::Replacement);
        assert_eq!((delta.start(), delta.old_end(), delta.new_end()), (0, 3, 3));
    }

    #[test]
    fn multibyte_offsets_are_bytes_on_boundaries() {
        let delta = diff("naïve café", "naïve cafés");
        assert_eq!(delta.kind(), DeltaKind::Addition);
        assert_eq!(delta.start(), "naïve café".len());
        assert_eq!(delta.inserted_text(), "s");

        // 'é' and 'è' share their first UTF-8 byte; the region must still
        // cover whole chars.
        let delta = diff("é", "è");
        assert_eq!(delta.kind(), DeltaKind::Replacement);
        assert_eq!((delta.start(), delta.old_end(), delta.new_end()), (0, 2, 2));
    }

    #[test]
    fn round_trip_concrete() {
        let old = "hello world";
        let new = "hello brave world";
        let delta = diff(old, new);
        assert_eq!(delta.apply_forward(old).unwrap(), new);
        assert_eq!(delta.apply_inverse(new).unwrap(), old);
    }

    #[test]
    fn prefix_and_suffix_helpers() {
        assert_eq!(common_prefix_len("abcd", "abxd"), 2);
        assert_eq!(common_suffix_len("abcd", "abxd"), 1);
        assert_eq!(common_prefix_len("", "abc"), 0);
        assert_eq!(common_suffix_len("ü", "u"), 0);
    }
}
