//! # Mutation Gateway
//!
//! Write path. Payloads are forwarded to the store at full fidelity: no
//! classification, no sync, no masking.

use std::sync::Arc;

use crate::machine::{Machine, MachineId};
use crate::observability::{Event, MetricsRegistry};
use crate::store::MachineStore;

use super::errors::InventoryResult;

pub struct MutationGateway {
    store: Arc<dyn MachineStore>,
    metrics: Arc<MetricsRegistry>,
}

impl MutationGateway {
    pub fn new(store: Arc<dyn MachineStore>, metrics: Arc<MetricsRegistry>) -> Self {
        Self { store, metrics }
    }

    /// Persist a new machine; returns the affected record count
    pub fn add_machine(&self, machine: &Machine) -> InventoryResult<usize> {
        machine.validate_identity()?;
        let id = machine.machine_id();
        self.record(Event::MachineAdded, &id, self.store.add_machine(machine).map_err(Into::into))
    }

    /// Replace the machine at `id`; identity in the payload is ignored
    pub fn update_machine(&self, id: &str, machine: &Machine) -> InventoryResult<usize> {
        let id = MachineId::parse(id)?;
        let result = self.store.update_machine(&id, machine).map_err(Into::into);
        self.record(Event::MachineUpdated, &id, result)
    }

    /// Remove the machine identified by the payload's owner and name
    pub fn delete_machine(&self, machine: &Machine) -> InventoryResult<usize> {
        machine.validate_identity()?;
        let id = machine.machine_id();
        self.record(Event::MachineDeleted, &id, self.store.delete_machine(machine).map_err(Into::into))
    }

    fn record(
        &self,
        event: Event,
        id: &MachineId,
        result: InventoryResult<usize>,
    ) -> InventoryResult<usize> {
        match &result {
            Ok(0) => {
                tracing::info!(event = %event, id = %id, affected = 0, "no record affected");
            }
            Ok(affected) => {
                self.metrics.increment_mutations_applied();
                tracing::info!(event = %event, id = %id, affected);
            }
            Err(e) => {
                self.metrics.increment_mutations_failed();
                tracing::warn!(event = %Event::MutationFailed, operation = %event, id = %id, error = %e);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::InventoryError;
    use crate::store::{MemMachineStore, StoreError};

    fn gateway() -> (MutationGateway, Arc<MemMachineStore>, Arc<MetricsRegistry>) {
        let store = Arc::new(MemMachineStore::new());
        let metrics = Arc::new(MetricsRegistry::new());
        (MutationGateway::new(store.clone(), metrics.clone()), store, metrics)
    }

    #[test]
    fn test_add_update_delete() {
        let (gateway, store, metrics) = gateway();
        let mut machine = Machine::new("alice", "web-1");
        machine.remote_password = "hunter2".to_string();

        assert_eq!(gateway.add_machine(&machine).unwrap(), 1);
        // Writes keep secrets intact
        let id = MachineId::new("alice", "web-1");
        assert_eq!(store.get_machine(&id).unwrap().remote_password, "hunter2");

        machine.tag = "prod".to_string();
        assert_eq!(gateway.update_machine("alice/web-1", &machine).unwrap(), 1);
        assert_eq!(store.get_machine(&id).unwrap().tag, "prod");

        assert_eq!(gateway.delete_machine(&machine).unwrap(), 1);
        assert_eq!(gateway.delete_machine(&machine).unwrap(), 0);
        assert_eq!(metrics.snapshot().mutations_applied, 3);
    }

    #[test]
    fn test_add_duplicate_is_store_error() {
        let (gateway, _, metrics) = gateway();
        let machine = Machine::new("alice", "web-1");
        gateway.add_machine(&machine).unwrap();

        assert_eq!(
            gateway.add_machine(&machine),
            Err(InventoryError::Store(StoreError::Duplicate("alice/web-1".to_string())))
        );
        assert_eq!(metrics.snapshot().mutations_failed, 1);
    }

    #[test]
    fn test_identity_required() {
        let (gateway, _, _) = gateway();
        assert!(gateway.add_machine(&Machine::new("", "web-1")).unwrap_err().is_validation());
        assert!(gateway.delete_machine(&Machine::new("alice", "")).unwrap_err().is_validation());
        assert!(gateway.add_machine(&Machine::new("alice", "a/b")).unwrap_err().is_validation());
    }

    #[test]
    fn test_update_bad_id() {
        let (gateway, _, _) = gateway();
        let err = gateway.update_machine("alice", &Machine::new("alice", "x")).unwrap_err();
        assert!(matches!(err, InventoryError::InvalidParam { ref name, .. } if name == "id"));
    }

    #[test]
    fn test_update_missing_is_unaffected() {
        let (gateway, _, _) = gateway();
        assert_eq!(
            gateway.update_machine("alice/ghost", &Machine::new("alice", "ghost")).unwrap(),
            0
        );
    }
}
