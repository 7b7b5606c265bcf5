//! # Inventory Errors
//!
//! Request-level error taxonomy. Every variant carries a stable code so
//! clients can branch without parsing messages.

use thiserror::Error;

use crate::cloud::CloudError;
use crate::machine::MachineError;
use crate::store::StoreError;

/// Result type for inventory operations
pub type InventoryResult<T> = Result<T, InventoryError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    // ==================
    // Validation
    // ==================
    /// Malformed query parameter
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParam { name: String, reason: String },

    /// Malformed or incomplete machine payload
    #[error("Invalid machine payload: {0}")]
    InvalidBody(String),

    // ==================
    // Lookup
    // ==================
    #[error("Machine not found: {0}")]
    NotFound(String),

    // ==================
    // Collaborators
    // ==================
    /// Cloud reconciliation failed; the read was aborted
    #[error("Cloud sync failed: {0}")]
    Sync(#[from] CloudError),

    #[error("{0}")]
    Store(StoreError),

    /// Request handling failed outside the inventory core
    #[error("Internal error: {0}")]
    Internal(String),
}

impl InventoryError {
    pub fn invalid_param(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParam {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            InventoryError::InvalidParam { .. } => "MACHINE_INVALID_PARAM",
            InventoryError::InvalidBody(_) => "MACHINE_INVALID_BODY",
            InventoryError::NotFound(_) => "MACHINE_NOT_FOUND",
            InventoryError::Sync(_) => "MACHINE_SYNC_FAILED",
            InventoryError::Store(_) => "MACHINE_STORE_FAILED",
            InventoryError::Internal(_) => "MACHINE_INTERNAL",
        }
    }

    /// Whether the caller sent something malformed
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            InventoryError::InvalidParam { .. } | InventoryError::InvalidBody(_)
        )
    }
}

impl From<StoreError> for InventoryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => InventoryError::NotFound(id),
            StoreError::UnknownField(field) => {
                InventoryError::invalid_param("field", format!("unknown machine field '{}'", field))
            }
            StoreError::InvalidRecord(reason) => InventoryError::InvalidBody(reason),
            other => InventoryError::Store(other),
        }
    }
}

impl From<MachineError> for InventoryError {
    fn from(err: MachineError) -> Self {
        match err {
            MachineError::InvalidId(_) => InventoryError::invalid_param("id", err.to_string()),
            MachineError::InvalidIdentity(..) => InventoryError::InvalidBody(err.to_string()),
        }
    }
}
