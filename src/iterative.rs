//! Single-pass online reduction with consolidation.
//!
//! Unlike the greedy pass, nothing here sorts globally, so the same logic
//! works as traces arrive incrementally. A candidate enters the minset by
//! adding new blocks, or by replacing two or more existing entries whose
//! combined unique contribution it covers on its own.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::codec::{self, CoverageSet};
use crate::trace::{Minset, MinsetEntry, Sample, Trace};
use crate::MinsetError;

/// Reduce a sample in one pass over a random candidate order.
///
/// The shuffle order comes from the injected rng, so runs are reproducible
/// under a seeded [`rand::rngs::StdRng`].
pub fn iterative_reduce<R>(
    sample: Sample,
    rng: &mut R,
) -> Result<(Minset, CoverageSet), MinsetError>
where
    R: Rng + ?Sized,
{
    let mut candidates: Vec<(String, Trace)> = sample.into_iter().collect();
    candidates.shuffle(rng);
    iterative_reduce_ordered(candidates)
}

/// Reduce candidates in exactly the order given.
///
/// This is the incremental form: feeding traces one batch at a time and
/// carrying the minset forward yields the same result as one long pass.
pub fn iterative_reduce_ordered(
    candidates: Vec<(String, Trace)>,
) -> Result<(Minset, CoverageSet), MinsetError> {
    let mut minset = Minset::new();
    let mut coverage = CoverageSet::new();

    for (id, trace) in candidates {
        let set = codec::unpack(&trace.raw)?;
        let unique: CoverageSet = set.difference(&coverage).copied().collect();

        if !unique.is_empty() {
            coverage.extend(unique.iter().copied());
            // Entries whose recorded contribution this candidate covers in
            // full are redundant now, breakeven at worst. Scan first, then
            // remove, so the map is never mutated mid-iteration.
            for evicted in subsumed_by(&minset, &set) {
                minset.remove(&evicted);
            }
            minset.insert(id, MinsetEntry { trace, unique });
        } else {
            // No new blocks: only worth keeping if it replaces two or more
            // entries outright, merging their contributions into one.
            let subsumed = subsumed_by(&minset, &set);
            if subsumed.len() > 1 {
                let mut merged = CoverageSet::new();
                for evicted in subsumed {
                    if let Some(entry) = minset.remove(&evicted) {
                        merged.extend(entry.unique);
                    }
                }
                minset.insert(id, MinsetEntry { trace, unique: merged });
            }
        }
    }

    Ok((minset, coverage))
}

/// Ids of entries whose unique contribution is a subset of `set`.
fn subsumed_by(minset: &Minset, set: &CoverageSet) -> Vec<String> {
    minset
        .iter()
        .filter(|(_, entry)| entry.unique.is_subset(set))
        .map(|(id, _)| id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::pack;

    fn trace(ids: &[u32]) -> Trace {
        let set: CoverageSet = ids.iter().copied().collect();
        Trace {
            covered: set.len() as u64,
            raw: pack(&set),
        }
    }

    fn ordered(traces: &[(&str, &[u32])]) -> Vec<(String, Trace)> {
        traces
            .iter()
            .map(|(id, ids)| (id.to_string(), trace(ids)))
            .collect()
    }

    #[test]
    fn late_dominator_consolidates_everything() {
        let candidates = ordered(&[
            ("t1", &[1, 2, 3]),
            ("t2", &[3, 4]),
            ("t3", &[4, 5, 6]),
            ("t4", &[1, 2, 3, 4, 5, 6]),
        ]);
        let (minset, coverage) = iterative_reduce_ordered(candidates).unwrap();
        assert_eq!(minset.len(), 1);
        let entry = &minset["t4"];
        assert_eq!(entry.unique, (1..=6).collect::<CoverageSet>());
        assert_eq!(coverage, (1..=6).collect::<CoverageSet>());
    }

    #[test]
    fn consolidation_merges_unique_contributions() {
        // a and b are both subsets of c; c itself adds nothing new.
        let candidates = ordered(&[
            ("a", &[1, 2]),
            ("b", &[3]),
            ("c", &[1, 2, 3]),
        ]);
        let (minset, coverage) = iterative_reduce_ordered(candidates).unwrap();
        assert_eq!(minset.len(), 1);
        let entry = &minset["c"];
        assert_eq!(entry.unique, [1, 2, 3].into_iter().collect::<CoverageSet>());
        assert_eq!(coverage.len(), 3);
    }

    #[test]
    fn single_subsumption_without_new_blocks_is_dropped() {
        // d covers a's contribution but nothing new and only one entry, so
        // a one-for-one swap would gain nothing.
        let candidates = ordered(&[("a", &[1, 2]), ("b", &[3]), ("d", &[1, 2])]);
        let (minset, coverage) = iterative_reduce_ordered(candidates).unwrap();
        assert_eq!(minset.len(), 2);
        assert!(minset.contains_key("a"));
        assert!(minset.contains_key("b"));
        assert_eq!(coverage.len(), 3);
    }

    #[test]
    fn disjoint_traces_both_kept() {
        let candidates = ordered(&[("t1", &[1, 2]), ("t2", &[3, 4])]);
        let (minset, coverage) = iterative_reduce_ordered(candidates).unwrap();
        assert_eq!(minset.len(), 2);
        assert_eq!(coverage.len(), 4);
    }

    #[test]
    fn new_blocks_also_evict_covered_entries() {
        // e brings block 4 and covers a's whole contribution, so a goes.
        let candidates = ordered(&[("a", &[1, 2]), ("e", &[1, 2, 4])]);
        let (minset, coverage) = iterative_reduce_ordered(candidates).unwrap();
        assert_eq!(minset.len(), 1);
        let entry = &minset["e"];
        assert_eq!(entry.unique, [4].into_iter().collect::<CoverageSet>());
        assert_eq!(coverage, [1, 2, 4].into_iter().collect::<CoverageSet>());
    }

    #[test]
    fn coverage_grows_monotonically_over_prefixes() {
        let traces: &[(&str, &[u32])] = &[
            ("t1", &[1, 2]),
            ("t2", &[2, 3]),
            ("t3", &[1]),
            ("t4", &[4, 5]),
            ("t5", &[1, 2, 3, 4, 5]),
        ];
        let mut last = CoverageSet::new();
        for k in 1..=traces.len() {
            let (_, coverage) = iterative_reduce_ordered(ordered(&traces[..k])).unwrap();
            assert!(last.is_subset(&coverage));
            last = coverage;
        }
    }

    #[test]
    fn corrupt_blob_fails_whole_reduction() {
        let mut candidates = ordered(&[("ok", &[1])]);
        candidates.push((
            "bad".into(),
            Trace {
                covered: 5,
                raw: vec![0xFF],
            },
        ));
        assert!(matches!(
            iterative_reduce_ordered(candidates),
            Err(MinsetError::Decode(_))
        ));
    }
}
