//! Trace metadata and the sample/minset collections the reducers operate on.

use std::collections::HashMap;

use crate::codec::CoverageSet;

/// Metadata for one trace as fetched from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    /// Declared number of covered blocks. Supplied by the store and used
    /// as a sort key without decoding the blob.
    pub covered: u64,
    /// Packed coverage blob, decoded lazily via [`crate::codec::unpack`].
    pub raw: Vec<u8>,
}

/// Unordered per-invocation selection of traces, keyed by trace id.
pub type Sample = HashMap<String, Trace>;

/// A trace accepted into a minset, together with the blocks it was
/// credited with at acceptance time: its uncovered remainder for the
/// greedy reducer, its unique contribution for the iterative one.
#[derive(Debug, Clone)]
pub struct MinsetEntry {
    pub trace: Trace,
    pub unique: CoverageSet,
}

/// Result of a reduction run, keyed by trace id.
pub type Minset = HashMap<String, MinsetEntry>;

/// Strip the per-entry contribution sets so a reducer's output can be fed
/// back into [`crate::greedy_reduce`] as a fresh sample.
pub fn minset_to_sample(minset: Minset) -> Sample {
    minset.into_iter().map(|(id, e)| (id, e.trace)).collect()
}
