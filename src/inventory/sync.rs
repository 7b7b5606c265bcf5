//! # Sync Coordinator
//!
//! Decides when an owner's scope is reconciled with the cloud. The gate
//! is scope-wide: one real machine forces a refresh of the whole scope,
//! and a scope of only default machines is never synced.

use std::sync::Arc;

use crate::cloud::CloudSync;
use crate::machine::any_real;
use crate::observability::{Event, MetricsRegistry};
use crate::store::MachineStore;

use super::errors::InventoryResult;

pub struct SyncCoordinator {
    store: Arc<dyn MachineStore>,
    cloud: Arc<dyn CloudSync>,
    metrics: Arc<MetricsRegistry>,
}

impl SyncCoordinator {
    pub fn new(
        store: Arc<dyn MachineStore>,
        cloud: Arc<dyn CloudSync>,
        metrics: Arc<MetricsRegistry>,
    ) -> Self {
        Self {
            store,
            cloud,
            metrics,
        }
    }

    /// Sync `owner`'s scope if it holds at least one real machine.
    ///
    /// Returns whether a sync ran.
    pub fn sync_if_needed(&self, owner: &str) -> InventoryResult<bool> {
        let machines = self.store.list_machines(owner)?;

        if !any_real(&machines) {
            self.metrics.increment_sync_skips();
            tracing::debug!(event = %Event::SyncSkipped, owner, machines = machines.len());
            return Ok(false);
        }

        self.sync(owner)?;
        Ok(true)
    }

    /// Sync `owner`'s scope unconditionally, exactly once.
    ///
    /// Provider errors are returned unchanged and never retried.
    pub fn sync(&self, owner: &str) -> InventoryResult<usize> {
        self.metrics.increment_sync_runs();
        tracing::info!(event = %Event::SyncStart, owner);

        match self.cloud.sync_cloud(owner) {
            Ok(count) => {
                self.metrics.add_records_synced(count as u64);
                tracing::info!(event = %Event::SyncComplete, owner, count);
                Ok(count)
            }
            Err(e) => {
                self.metrics.increment_sync_failures();
                tracing::warn!(event = %Event::SyncFailed, owner, error = %e);
                Err(e.into())
            }
        }
    }
}
