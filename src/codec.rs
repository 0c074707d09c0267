//! Sparse coverage-set codec.
//!
//! A [`CoverageSet`] packs to a varint delta stream: the smallest block id
//! is written absolute, then each successive id as its strictly positive
//! gap from the previous one, all as LEB128 varints.  Cost is proportional
//! to the number of covered blocks, never to the size of the id universe
//! (the full `u32` range).  Decoding is bounds checked and rejects
//! truncated or corrupt blobs instead of panicking.

use std::collections::BTreeSet;
use thiserror::Error;

/// Set of covered block ids for a single trace.
pub type CoverageSet = BTreeSet<u32>;

/// Errors that can occur while decoding a packed coverage blob.
///
/// The byte offset in each variant is the position where the offending
/// varint starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("blob truncated inside varint starting at byte {0}")]
    Truncated(usize),
    #[error("varint wider than 32 bits at byte {0}")]
    VarintOverflow(usize),
    #[error("block id overflows u32 at byte {0}")]
    IdOverflow(usize),
    #[error("zero gap between ids at byte {0}")]
    ZeroGap(usize),
}

/// Pack a coverage set into its compact binary form.
pub fn pack(set: &CoverageSet) -> Vec<u8> {
    let mut out = Vec::with_capacity(set.len());
    let mut prev: Option<u32> = None;
    for &id in set {
        let delta = match prev {
            None => id,
            Some(p) => id - p,
        };
        write_varint(&mut out, delta);
        prev = Some(id);
    }
    out
}

/// Unpack a coverage blob produced by [`pack`].
pub fn unpack(data: &[u8]) -> Result<CoverageSet, DecodeError> {
    let mut set = CoverageSet::new();
    let mut prev: Option<u32> = None;
    let mut pos = 0usize;
    while pos < data.len() {
        let start = pos;
        let (delta, used) = read_varint(&data[pos..], start)?;
        pos += used;
        let id = match prev {
            None => delta,
            Some(p) => {
                if delta == 0 {
                    return Err(DecodeError::ZeroGap(start));
                }
                p.checked_add(delta)
                    .ok_or(DecodeError::IdOverflow(start))?
            }
        };
        set.insert(id);
        prev = Some(id);
    }
    Ok(set)
}

fn write_varint(out: &mut Vec<u8>, mut v: u32) {
    loop {
        let byte = (v & 0x7F) as u8;
        v >>= 7;
        if v == 0 {
            out.push(byte);
            break;
        }
        out.push(byte | 0x80);
    }
}

fn read_varint(data: &[u8], at: usize) -> Result<(u32, usize), DecodeError> {
    let mut value: u32 = 0;
    let mut shift = 0u32;
    for (i, &byte) in data.iter().enumerate() {
        // A u32 varint carries at most 5 bytes; the fifth holds 4 bits.
        if shift > 28 || (shift == 28 && (byte & 0x7F) > 0x0F) {
            return Err(DecodeError::VarintOverflow(at + i));
        }
        value |= ((byte & 0x7F) as u32) << shift;
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
        shift += 7;
    }
    Err(DecodeError::Truncated(at))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[u32]) -> CoverageSet {
        ids.iter().copied().collect()
    }

    #[test]
    fn roundtrip_simple() {
        let s = set(&[1, 5, 10, 20, 50]);
        assert_eq!(unpack(&pack(&s)).unwrap(), s);
    }

    #[test]
    fn roundtrip_empty() {
        let s = CoverageSet::new();
        let blob = pack(&s);
        assert!(blob.is_empty());
        assert_eq!(unpack(&blob).unwrap(), s);
    }

    #[test]
    fn roundtrip_extremes() {
        let s = set(&[0, 1, u32::MAX - 1, u32::MAX]);
        assert_eq!(unpack(&pack(&s)).unwrap(), s);
    }

    #[test]
    fn wide_gaps_stay_small() {
        // Two ids cost at most ten bytes no matter how far apart.
        let s = set(&[3, 4_000_000_000]);
        assert!(pack(&s).len() <= 10);
    }

    #[test]
    fn truncated_blob_rejected() {
        let blob = pack(&set(&[300, 900_000]));
        let cut = &blob[..blob.len() - 1];
        assert!(matches!(unpack(cut), Err(DecodeError::Truncated(_))));
    }

    #[test]
    fn overlong_varint_rejected() {
        // Six continuation bytes can never be a valid u32.
        let blob = [0x80, 0x80, 0x80, 0x80, 0x80, 0x01];
        assert!(matches!(unpack(&blob), Err(DecodeError::VarintOverflow(_))));
    }

    #[test]
    fn id_overflow_rejected() {
        let mut blob = pack(&set(&[u32::MAX]));
        // Append a gap of 1 past the maximum id.
        blob.push(0x01);
        assert!(matches!(unpack(&blob), Err(DecodeError::IdOverflow(_))));
    }

    #[test]
    fn zero_gap_rejected() {
        // id 7 followed by a zero delta.
        let blob = [0x07, 0x00];
        assert!(matches!(unpack(&blob), Err(DecodeError::ZeroGap(1))));
    }
}
