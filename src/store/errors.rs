//! # Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence layer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No record with this id
    #[error("Machine not found: {0}")]
    NotFound(String),

    /// Record with this id already exists
    #[error("Machine already exists: {0}")]
    Duplicate(String),

    /// Record cannot be stored under an addressable id
    #[error("Invalid machine record: {0}")]
    InvalidRecord(String),

    /// Filter or sort names an attribute the record does not have
    #[error("Unknown machine field: {0}")]
    UnknownField(String),

    /// Backing file could not be read or written
    #[error("Store I/O error: {0}")]
    Io(String),

    /// Backing file does not hold a valid record set
    #[error("Store data is corrupt: {0}")]
    Corrupt(String),

    #[error("Store lock poisoned")]
    LockPoisoned,
}
