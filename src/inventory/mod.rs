//! # Inventory Module
//!
//! The reconciliation and disclosure core: sync gating, the masked read
//! path and the raw write path, wired over one store and one cloud sync.

pub mod errors;
pub mod mutation;
pub mod pagination;
pub mod query;
pub mod sync;

pub use errors::{InventoryError, InventoryResult};
pub use mutation::MutationGateway;
pub use pagination::Paginator;
pub use query::{ListRequest, MachineList, QueryEngine};
pub use sync::SyncCoordinator;

use std::sync::Arc;

use crate::cloud::CloudSync;
use crate::machine::Machine;
use crate::observability::MetricsRegistry;
use crate::store::MachineStore;

/// Read and write entry points sharing one store
pub struct Inventory {
    queries: QueryEngine,
    mutations: MutationGateway,
    metrics: Arc<MetricsRegistry>,
}

impl Inventory {
    pub fn new(store: Arc<dyn MachineStore>, cloud: Arc<dyn CloudSync>) -> Self {
        Self::with_metrics(store, cloud, Arc::new(MetricsRegistry::new()))
    }

    pub fn with_metrics(
        store: Arc<dyn MachineStore>,
        cloud: Arc<dyn CloudSync>,
        metrics: Arc<MetricsRegistry>,
    ) -> Self {
        let sync = Arc::new(SyncCoordinator::new(store.clone(), cloud, metrics.clone()));
        Self {
            queries: QueryEngine::new(store.clone(), sync, metrics.clone()),
            mutations: MutationGateway::new(store, metrics.clone()),
            metrics,
        }
    }

    pub fn get_machines(&self, request: &ListRequest) -> InventoryResult<MachineList> {
        self.queries.get_machines(request)
    }

    pub fn get_machine(&self, id: &str) -> InventoryResult<Machine> {
        self.queries.get_machine(id)
    }

    pub fn add_machine(&self, machine: &Machine) -> InventoryResult<usize> {
        self.mutations.add_machine(machine)
    }

    pub fn update_machine(&self, id: &str, machine: &Machine) -> InventoryResult<usize> {
        self.mutations.update_machine(id, machine)
    }

    pub fn delete_machine(&self, machine: &Machine) -> InventoryResult<usize> {
        self.mutations.delete_machine(machine)
    }

    pub fn metrics(&self) -> &Arc<MetricsRegistry> {
        &self.metrics
    }
}
