//! Inventory Scenario Tests
//!
//! End-to-end behavior of the read and write paths over an in-memory
//! store:
//! - Sync is gated on the presence of a real machine in scope
//! - Default machines are served without a sync
//! - Every record leaving the read path is masked
//! - Pagination counts and slices

use std::sync::{Arc, Mutex};

use machine_inventory::cloud::{
    CloudError, CloudResult, CloudSync, MachineProvider, ProviderSync, StaticProvider,
};
use machine_inventory::inventory::{Inventory, InventoryError, ListRequest, MachineList};
use machine_inventory::machine::{mask, Machine, MASK};
use machine_inventory::store::{MachineStore, MemMachineStore};

// =============================================================================
// Helper Functions
// =============================================================================

/// Cloud sync double counting calls per owner
#[derive(Debug, Default)]
struct CountingSync {
    calls: Mutex<Vec<String>>,
    failure: Option<CloudError>,
}

impl CountingSync {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl CloudSync for CountingSync {
    fn sync_cloud(&self, owner: &str) -> CloudResult<usize> {
        self.calls.lock().unwrap().push(owner.to_string());
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(0),
        }
    }
}

fn default_machine(owner: &str, name: &str) -> Machine {
    Machine {
        owner: owner.to_string(),
        name: name.to_string(),
        display_name: "New Machine - x".to_string(),
        provider: "provider_1".to_string(),
        state: "Active".to_string(),
        ..Default::default()
    }
}

fn real_machine(owner: &str, name: &str) -> Machine {
    Machine {
        owner: owner.to_string(),
        name: name.to_string(),
        display_name: name.to_string(),
        provider: "aws".to_string(),
        state: "Running".to_string(),
        public_ip: "1.2.3.4".to_string(),
        remote_username: "root".to_string(),
        remote_password: "hunter2".to_string(),
        ..Default::default()
    }
}

fn setup(machines: Vec<Machine>) -> (Inventory, Arc<MemMachineStore>, Arc<CountingSync>) {
    let store = Arc::new(MemMachineStore::with_machines(machines).unwrap());
    let cloud = Arc::new(CountingSync::default());
    let inventory = Inventory::new(store.clone(), cloud.clone());
    (inventory, store, cloud)
}

fn alice_scope() -> Vec<Machine> {
    vec![
        default_machine("alice", "machine_1"),
        real_machine("alice", "web-1"),
    ]
}

// =============================================================================
// Sync Gating
// =============================================================================

/// A scope with one real machine is synced exactly once and fully returned.
#[test]
fn test_list_with_real_machine_syncs_once() {
    let (inventory, _store, cloud) = setup(alice_scope());

    let list = inventory.get_machines(&ListRequest::owner("alice")).unwrap();

    assert_eq!(cloud.calls(), vec!["alice".to_string()]);
    let MachineList::All(machines) = list else {
        panic!("expected unpaged list");
    };
    assert_eq!(machines.len(), 2);
    for machine in &machines {
        assert_eq!(machine, &mask(machine));
    }
}

/// A scope of only default machines is never synced.
#[test]
fn test_list_all_default_does_not_sync() {
    let (inventory, _store, cloud) = setup(vec![
        default_machine("alice", "machine_1"),
        default_machine("alice", "machine_2"),
    ]);

    inventory.get_machines(&ListRequest::owner("alice")).unwrap();
    assert!(cloud.calls().is_empty());
}

/// Getting a default machine never syncs.
#[test]
fn test_get_default_machine_has_zero_syncs() {
    let (inventory, _store, cloud) = setup(alice_scope());

    let machine = inventory.get_machine("alice/machine_1").unwrap();

    assert_eq!(machine, default_machine("alice", "machine_1"));
    assert!(cloud.calls().is_empty());
}

/// Getting a real machine syncs its owner's scope exactly once.
#[test]
fn test_get_real_machine_syncs_once() {
    let (inventory, _store, cloud) = setup(alice_scope());

    let machine = inventory.get_machine("alice/web-1").unwrap();

    assert_eq!(machine.remote_password, MASK);
    assert_eq!(cloud.calls(), vec!["alice".to_string()]);
}

/// A sync failure aborts the single-machine read with the sync error.
#[test]
fn test_get_real_machine_sync_failure_is_fatal() {
    let store = Arc::new(MemMachineStore::with_machines(alice_scope()).unwrap());
    let failure = CloudError::provider("aws", "credentials expired");
    let cloud = Arc::new(CountingSync {
        calls: Mutex::new(Vec::new()),
        failure: Some(failure.clone()),
    });
    let inventory = Inventory::new(store, cloud);

    assert_eq!(
        inventory.get_machine("alice/web-1"),
        Err(InventoryError::Sync(failure))
    );
}

/// Records written by the sync are visible in the same response.
#[test]
fn test_list_reads_after_sync() {
    struct AddingSync {
        store: Arc<MemMachineStore>,
    }

    impl CloudSync for AddingSync {
        fn sync_cloud(&self, owner: &str) -> CloudResult<usize> {
            Ok(self.store.add_machine(&real_machine(owner, "discovered"))?)
        }
    }

    let store = Arc::new(MemMachineStore::with_machines(alice_scope()).unwrap());
    let inventory = Inventory::new(store.clone(), Arc::new(AddingSync { store: store.clone() }));

    let list = inventory.get_machines(&ListRequest::owner("alice")).unwrap();
    assert_eq!(list.machines().len(), 3);
    assert!(list.machines().iter().any(|m| m.name == "discovered"));
}

// =============================================================================
// Disclosure
// =============================================================================

/// The read path never leaks a stored secret; the store keeps it.
#[test]
fn test_reads_mask_but_store_keeps_secret() {
    let (inventory, store, _cloud) = setup(alice_scope());

    let machine = inventory.get_machine("alice/web-1").unwrap();
    assert_eq!(machine.remote_password, MASK);

    let stored = store.get_machine(&machine.machine_id()).unwrap();
    assert_eq!(stored.remote_password, "hunter2");
}

/// Writing back a masked record keeps the original secret.
#[test]
fn test_masked_round_trip_preserves_secret() {
    let (inventory, store, _cloud) = setup(alice_scope());

    let mut machine = inventory.get_machine("alice/web-1").unwrap();
    machine.tag = "prod".to_string();
    assert_eq!(inventory.update_machine("alice/web-1", &machine).unwrap(), 1);

    let stored = store.get_machine(&machine.machine_id()).unwrap();
    assert_eq!(stored.tag, "prod");
    assert_eq!(stored.remote_password, "hunter2");
}

// =============================================================================
// Pagination
// =============================================================================

/// Total equals the match count and the slice is min(k, N - offset).
#[test]
fn test_page_sizes_and_totals() {
    let machines = (0..23).map(|i| real_machine("alice", &format!("m{:02}", i))).collect();
    let (inventory, _store, _cloud) = setup(machines);

    for (page, expected_len) in [(1, 10), (2, 10), (3, 3), (4, 3)] {
        let request = ListRequest::owner("alice").with_page(page.to_string(), "10");
        let MachineList::Page { machines, total } = inventory.get_machines(&request).unwrap() else {
            panic!("expected paged list");
        };
        assert_eq!(total, 23);
        assert_eq!(machines.len(), expected_len, "page {}", page);
    }
}

/// Filtered pages count only matching records.
#[test]
fn test_filtered_page() {
    let mut machines: Vec<Machine> = (0..6).map(|i| real_machine("alice", &format!("m{}", i))).collect();
    for machine in machines.iter_mut().take(4) {
        machine.region = "eu-west-1".to_string();
    }
    let (inventory, _store, _cloud) = setup(machines);

    let request = ListRequest::owner("alice")
        .with_page("1", "3")
        .with_filter("region", "eu-west-1")
        .with_sort("name", "ascend");
    let MachineList::Page { machines, total } = inventory.get_machines(&request).unwrap() else {
        panic!("expected paged list");
    };

    assert_eq!(total, 4);
    let names: Vec<_> = machines.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["m0", "m1", "m2"]);
}

/// Ports order by value, not by their text.
#[test]
fn test_sort_by_remote_port_is_numeric() {
    let machines = [22, 3389, 80, 9]
        .iter()
        .enumerate()
        .map(|(i, port)| Machine {
            remote_port: *port,
            ..real_machine("alice", &format!("m{}", i))
        })
        .collect();
    let (inventory, _store, _cloud) = setup(machines);

    let request = ListRequest::owner("alice")
        .with_page("1", "10")
        .with_sort("remotePort", "ascend");
    let list = inventory.get_machines(&request).unwrap();

    let ports: Vec<i32> = list.machines().iter().map(|m| m.remote_port).collect();
    assert_eq!(ports, vec![9, 22, 80, 3389]);
}

/// A non-numeric page size is a validation error, not page one.
#[test]
fn test_non_numeric_page_size_fails() {
    let (inventory, _store, cloud) = setup(alice_scope());

    let request = ListRequest::owner("alice").with_page("1", "abc");
    let err = inventory.get_machines(&request).unwrap_err();

    assert!(err.is_validation());
    assert_eq!(err.code(), "MACHINE_INVALID_PARAM");
    assert!(cloud.calls().is_empty());
}

// =============================================================================
// Reconciliation
// =============================================================================

/// Every machine a sync stores can be read back by its id.
#[test]
fn test_synced_machines_are_addressable() {
    let store = Arc::new(MemMachineStore::with_machines(alice_scope()).unwrap());
    let reported = vec![
        Machine::new("", "vpc/i-1"),
        Machine::new("", ""),
        Machine::new("", "i-2"),
    ];
    let provider: Arc<dyn MachineProvider> = Arc::new(StaticProvider::new("aws", "alice", reported));
    let cloud = Arc::new(ProviderSync::new(store.clone(), vec![provider]));
    let inventory = Inventory::new(store, cloud);

    let list = inventory.get_machines(&ListRequest::owner("alice")).unwrap();
    assert_eq!(list.machines().len(), 3);

    for machine in list.machines() {
        let id = machine.machine_id().to_string();
        assert!(inventory.get_machine(&id).is_ok(), "cannot read back {}", id);
    }
}

/// Adding a machine whose name holds the separator is a body error.
#[test]
fn test_add_unaddressable_name_rejected() {
    let (inventory, store, _cloud) = setup(vec![]);

    let err = inventory.add_machine(&real_machine("alice", "vpc/i-1")).unwrap_err();
    assert_eq!(err.code(), "MACHINE_INVALID_BODY");
    assert!(store.list_machines("").unwrap().is_empty());
}

// =============================================================================
// Write Path
// =============================================================================

/// Delete followed by get yields not-found.
#[test]
fn test_delete_then_get_not_found() {
    let (inventory, _store, _cloud) = setup(alice_scope());

    let machine = real_machine("alice", "web-1");
    assert_eq!(inventory.delete_machine(&machine).unwrap(), 1);

    assert_eq!(
        inventory.get_machine("alice/web-1"),
        Err(InventoryError::NotFound("alice/web-1".to_string()))
    );
}

/// Writes never trigger a sync.
#[test]
fn test_writes_do_not_sync() {
    let (inventory, _store, cloud) = setup(vec![]);

    let machine = real_machine("alice", "web-1");
    inventory.add_machine(&machine).unwrap();
    inventory.update_machine("alice/web-1", &machine).unwrap();
    inventory.delete_machine(&machine).unwrap();

    assert!(cloud.calls().is_empty());
}
