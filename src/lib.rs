//! Coverage-corpus minimization via set-cover approximation.
//!
//! Given a corpus of coverage traces, `minset` computes an approximately
//! minimal subset of traces preserving the corpus's total block coverage.
//! Two polynomial-time reducers are provided: a batch greedy pass
//! ([`greedy_reduce`]) that repeatedly keeps the candidate with the most
//! still-uncovered blocks, and a single-pass online reducer
//! ([`iterative_reduce`]) usable as traces arrive, which consolidates
//! entries a later trace makes redundant. The iterative minset can be fed
//! back through the greedy pass for refinement via [`minset_to_sample`].
//!
//! Coverage sets travel as compact varint-delta blobs ([`codec`]); traces
//! live in a [`store::CorpusStore`], read only while a sample is drawn.

pub mod codec;
pub mod error;
pub mod greedy;
pub mod iterative;
pub mod report;
pub mod sample;
pub mod store;
pub mod trace;

pub use codec::{pack, unpack, CoverageSet, DecodeError};
pub use error::MinsetError;
pub use greedy::greedy_reduce;
pub use iterative::{iterative_reduce, iterative_reduce_ordered};
pub use report::ReductionReport;
pub use sample::sample_fraction;
pub use store::{CorpusStore, StoredTrace, TraceDb};
pub use trace::{minset_to_sample, Minset, MinsetEntry, Sample, Trace};
