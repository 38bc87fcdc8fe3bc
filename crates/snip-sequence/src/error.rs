use snip_core::StorageError;
use thiserror::Error;

/// Errors returned by counter stores and the sequence built on them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("counter io failed: {0}")]
    Io(String),
    #[error("counter file is corrupt: {0}")]
    Corrupt(String),
    #[error("counter overflowed")]
    Overflow,
    #[error("sequence state lock is poisoned")]
    StatePoisoned,
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<Error> for StorageError {
    fn from(value: Error) -> Self {
        StorageError::Counter(value.to_string())
    }
}
