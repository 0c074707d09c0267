//! Uniform without-replacement sampling from a corpus store.

use rand::seq::index;
use rand::Rng;

use crate::store::CorpusStore;
use crate::trace::{Sample, Trace};
use crate::MinsetError;

/// Draw `floor(total * fraction)` distinct traces uniformly at random.
///
/// `fraction` must lie in `(0, 1]`; a fraction of exactly 1 returns the
/// entire corpus. A selected id missing either its covered count or its
/// coverage blob aborts the whole call with
/// [`MinsetError::StoreConsistency`].
pub fn sample_fraction<S, R>(
    store: &S,
    fraction: f64,
    rng: &mut R,
) -> Result<Sample, MinsetError>
where
    S: CorpusStore + ?Sized,
    R: Rng + ?Sized,
{
    if !(fraction > 0.0 && fraction <= 1.0) {
        return Err(MinsetError::InvalidArgument(format!(
            "sampling fraction must be in (0, 1], got {fraction}"
        )));
    }

    let total = store.total_count();
    let ids = store.list_ids();
    if ids.len() != total {
        return Err(MinsetError::StoreConsistency(format!(
            "store reports {total} traces but lists {} ids",
            ids.len()
        )));
    }

    let count = (total as f64 * fraction).floor() as usize;
    let mut sample = Sample::with_capacity(count);
    for idx in index::sample(rng, total, count) {
        let id = &ids[idx];
        let covered = store.get_covered_count(id).map_err(|e| store_gap(id, e))?;
        let raw = store.get_raw_coverage(id).map_err(|e| store_gap(id, e))?;
        sample.insert(id.clone(), Trace { covered, raw });
    }
    Ok(sample)
}

fn store_gap(id: &str, err: MinsetError) -> MinsetError {
    match err {
        MinsetError::NotFound(msg) => {
            MinsetError::StoreConsistency(format!("trace {id} is incomplete: {msg}"))
        }
        other => other,
    }
}
