//! Batch greedy set-cover reduction.

use crate::codec::{self, CoverageSet};
use crate::trace::{Minset, MinsetEntry, Sample, Trace};
use crate::MinsetError;

/// Reduce a sample to an approximately minimal covering subset.
///
/// Candidates are ordered by their declared covered count; the largest is
/// taken unconditionally, then each round keeps the candidate with the
/// most still-uncovered blocks until nothing contributes. Every blob is
/// decoded exactly once; rounds work on the cached uncovered remainders.
/// Ties between equally sized remainders resolve arbitrarily.
///
/// Returns the minset together with the union of blocks it covers, which
/// equals the union over the whole input sample.
pub fn greedy_reduce(sample: Sample) -> Result<(Minset, CoverageSet), MinsetError> {
    let mut minset = Minset::new();
    let mut coverage = CoverageSet::new();

    // Ascending by declared count so the largest pops from the end.
    let mut candidates: Vec<(String, Trace)> = sample.into_iter().collect();
    candidates.sort_by_key(|(_, t)| t.covered);

    let (best_id, best_trace) = match candidates.pop() {
        Some(best) => best,
        None => return Ok((minset, coverage)),
    };
    let best_set = codec::unpack(&best_trace.raw)?;
    coverage.extend(best_set.iter().copied());
    minset.insert(
        best_id,
        MinsetEntry {
            trace: best_trace,
            unique: best_set,
        },
    );

    // Expand each remaining candidate once, keeping only the blocks the
    // starter set left uncovered.
    let mut pool: Vec<(String, Trace, CoverageSet)> = Vec::with_capacity(candidates.len());
    for (id, trace) in candidates {
        let set = codec::unpack(&trace.raw)?;
        let rest: CoverageSet = set.difference(&coverage).copied().collect();
        pool.push((id, trace, rest));
    }

    while !pool.is_empty() {
        pool.retain(|(_, _, rest)| !rest.is_empty());
        pool.sort_by_key(|(_, _, rest)| rest.len());
        let (id, trace, rest) = match pool.pop() {
            Some(best) => best,
            None => break,
        };
        coverage.extend(rest.iter().copied());
        for (_, _, other) in pool.iter_mut() {
            other.retain(|b| !rest.contains(b));
        }
        minset.insert(id, MinsetEntry { trace, unique: rest });
    }

    Ok((minset, coverage))
}
