#![forbid(unsafe_code)]

//! Text deltas for rundo.
//!
//! This crate holds the pure, stateless half of the undo system:
//!
//! - [`diff`] - reduce two texts to the one region that differs
//! - [`TextDelta`] - the resulting immutable edit record
//! - [`Splice`] - a range replacement used to replay a delta in either direction
//!
//! Nothing here keeps state or touches a host; the runtime crate decides
//! when to diff and where deltas are stored.

pub mod delta;
pub mod diff;

pub use delta::{DeltaError, DeltaKind, RawDelta, Splice, SpliceError, TextDelta};
pub use diff::{common_prefix_len, common_suffix_len, diff};
