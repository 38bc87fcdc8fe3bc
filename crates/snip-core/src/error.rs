use jiff::Timestamp;
use thiserror::Error;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Failure categories surfaced to the collaborator layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input: empty URL, bad candidate token, unusable TTL.
    Validation,
    /// The candidate token has already been issued.
    Conflict,
    /// The token has no record, or the record was deleted.
    NotFound,
    /// The record exists but is past its expiry.
    Expired,
    /// Allocator, generator or storage failure.
    Internal,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("short code already issued: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("id counter failed: {0}")]
    Counter(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShortenerError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
    #[error("invalid ttl: {0}")]
    InvalidTtl(String),
    #[error("alias already exists: {0}")]
    AliasConflict(String),
    #[error("short code not found: {0}")]
    NotFound(String),
    #[error("short code {token} expired at {expired_at}")]
    Expired { token: String, expired_at: Timestamp },
    #[error("no free short code after {attempts} attempts")]
    Exhausted { attempts: usize },
    #[error("storage error: {0}")]
    Storage(String),
}

impl ShortenerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidUrl(_) | Self::InvalidShortCode(_) | Self::InvalidTtl(_) => {
                ErrorKind::Validation
            }
            Self::AliasConflict(_) => ErrorKind::Conflict,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Expired { .. } => ErrorKind::Expired,
            Self::Exhausted { .. } | Self::Storage(_) => ErrorKind::Internal,
        }
    }
}

impl From<StorageError> for ShortenerError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::Conflict(code) => Self::AliasConflict(code),
            other => Self::Storage(other.to_string()),
        }
    }
}
