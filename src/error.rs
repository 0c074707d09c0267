use thiserror::Error;

use crate::codec::DecodeError;

#[derive(Error, Debug)]
pub enum MinsetError {
    /// Caller-supplied argument out of range (e.g. sampling fraction).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Store has no entry under the requested id.
    #[error("not found: {0}")]
    NotFound(String),

    /// A selected trace is missing required fields in the store.
    /// Treated as corpus corruption, fatal for the calling operation.
    #[error("store consistency error: {0}")]
    StoreConsistency(String),

    /// Corrupt packed coverage blob. Fatal for the whole reduction; a
    /// partially decoded sample would report an incorrect coverage.
    #[error("coverage decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Propagated I/O error from the trace database file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
