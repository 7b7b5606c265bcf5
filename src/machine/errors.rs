//! # Machine Errors

use thiserror::Error;

/// Result type for machine record operations
pub type MachineResult<T> = Result<T, MachineError>;

/// Errors raised while interpreting machine records
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    /// Id is not of the form `owner/name`
    #[error("Invalid machine id '{0}', expected owner/name")]
    InvalidId(String),

    /// Record owner or name cannot form an addressable id
    #[error("Invalid machine identity '{0}': {1}")]
    InvalidIdentity(String, &'static str),
}
