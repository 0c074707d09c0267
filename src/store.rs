//! Corpus store interface and the bincode-backed trace database.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use crate::MinsetError;

/// One stored trace: the declared covered-block count plus the packed blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredTrace {
    pub covered: u64,
    pub raw: Vec<u8>,
}

/// Read interface the reduction core expects from a corpus store.
///
/// The core only ever reads; all access happens while a sample is being
/// materialized, never inside a reducer.
pub trait CorpusStore {
    /// Total number of stored traces.
    fn total_count(&self) -> usize;

    /// All trace identifiers, in no particular order.
    fn list_ids(&self) -> Vec<String>;

    /// Declared covered-block count for a trace.
    fn get_covered_count(&self, id: &str) -> Result<u64, MinsetError>;

    /// Packed coverage blob for a trace.
    fn get_raw_coverage(&self, id: &str) -> Result<Vec<u8>, MinsetError>;
}

/// In-memory trace database with bincode file persistence.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TraceDb {
    traces: HashMap<String, StoredTrace>,
}

impl TraceDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: String, covered: u64, raw: Vec<u8>) {
        self.traces.insert(id, StoredTrace { covered, raw });
    }

    /// Load a database from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MinsetError> {
        let data = fs::read(path)?;
        let db = bincode::deserialize(&data).map_err(|e| {
            MinsetError::Io(io::Error::new(io::ErrorKind::InvalidData, e))
        })?;
        Ok(db)
    }

    /// Serialize this database to disk with bincode.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), MinsetError> {
        let data = bincode::serialize(self).map_err(|e| {
            MinsetError::Io(io::Error::new(io::ErrorKind::InvalidData, e))
        })?;
        fs::write(path, data)?;
        Ok(())
    }
}

impl CorpusStore for TraceDb {
    fn total_count(&self) -> usize {
        self.traces.len()
    }

    fn list_ids(&self) -> Vec<String> {
        self.traces.keys().cloned().collect()
    }

    fn get_covered_count(&self, id: &str) -> Result<u64, MinsetError> {
        self.traces
            .get(id)
            .map(|t| t.covered)
            .ok_or_else(|| MinsetError::NotFound(format!("no covered count for trace {id}")))
    }

    fn get_raw_coverage(&self, id: &str) -> Result<Vec<u8>, MinsetError> {
        self.traces
            .get(id)
            .map(|t| t.raw.clone())
            .ok_or_else(|| MinsetError::NotFound(format!("no coverage blob for trace {id}")))
    }
}
