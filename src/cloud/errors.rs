//! # Cloud Sync Errors

use thiserror::Error;

use crate::store::StoreError;

/// Result type for cloud reconciliation
pub type CloudResult<T> = Result<T, CloudError>;

/// Cloud reconciliation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CloudError {
    /// Provider could not report its machines
    #[error("Provider '{provider}' failed: {message}")]
    Provider { provider: String, message: String },

    /// Reconciled records could not be written
    #[error("{0}")]
    Store(#[from] StoreError),
}

impl CloudError {
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }
}
