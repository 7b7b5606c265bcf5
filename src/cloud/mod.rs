//! # Cloud Sync Module
//!
//! Reconciles stored machines with the state reported by cloud
//! providers.

pub mod errors;
pub mod provider;
pub mod reconcile;

pub use errors::{CloudError, CloudResult};
pub use provider::{FileProvider, MachineProvider, StaticProvider};
pub use reconcile::ProviderSync;

/// Reconcile one owner's scope against its cloud providers.
///
/// Idempotent and side-effecting. Returns the number of records added or
/// refreshed. Timeouts are the implementation's concern.
pub trait CloudSync: Send + Sync {
    fn sync_cloud(&self, owner: &str) -> CloudResult<usize>;
}

/// Cloud sync with no providers attached
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCloudSync;

impl CloudSync for NoopCloudSync {
    fn sync_cloud(&self, _owner: &str) -> CloudResult<usize> {
        Ok(0)
    }
}
