//! # In-Memory Store

use std::sync::RwLock;

use crate::machine::{Machine, MachineId};

use super::errors::{StoreError, StoreResult};
use super::query::{FieldFilter, PageQuery};
use super::table::MachineTable;
use super::MachineStore;

/// Volatile store backed by a locked table
#[derive(Debug, Default)]
pub struct MemMachineStore {
    table: RwLock<MachineTable>,
}

impl MemMachineStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with existing records
    pub fn with_machines(machines: Vec<Machine>) -> StoreResult<Self> {
        Ok(Self {
            table: RwLock::new(MachineTable::from_records(machines)?),
        })
    }

    fn read<T>(&self, f: impl FnOnce(&MachineTable) -> T) -> StoreResult<T> {
        let table = self.table.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(f(&table))
    }

    fn write<T>(&self, f: impl FnOnce(&mut MachineTable) -> StoreResult<T>) -> StoreResult<T> {
        let mut table = self.table.write().map_err(|_| StoreError::LockPoisoned)?;
        f(&mut table)
    }
}

impl MachineStore for MemMachineStore {
    fn list_machines(&self, owner: &str) -> StoreResult<Vec<Machine>> {
        self.read(|t| t.list(owner))
    }

    fn list_machines_page(&self, owner: &str, query: &PageQuery) -> StoreResult<Vec<Machine>> {
        self.read(|t| t.page(owner, query))
    }

    fn count_machines(&self, owner: &str, filter: Option<&FieldFilter>) -> StoreResult<usize> {
        self.read(|t| t.count(owner, filter))
    }

    fn get_machine(&self, id: &MachineId) -> StoreResult<Machine> {
        self.read(|t| t.get(id))?
    }

    fn add_machine(&self, machine: &Machine) -> StoreResult<usize> {
        self.write(|t| t.add(machine))
    }

    fn update_machine(&self, id: &MachineId, machine: &Machine) -> StoreResult<usize> {
        self.write(|t| Ok(t.update(id, machine)))
    }

    fn delete_machine(&self, machine: &Machine) -> StoreResult<usize> {
        self.write(|t| Ok(t.delete(machine)))
    }
}
