//! # Machine Table
//!
//! Ordered record set keyed by `owner/name`. Both store backends keep
//! one of these; the file backend round-trips it through disk on every
//! mutation.

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};

use crate::machine::mask::is_masked;
use crate::machine::{Machine, MachineId};

use super::errors::{StoreError, StoreResult};
use super::query::{owner_matches, FieldFilter, PageQuery};

/// Current time in the record timestamp format
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[derive(Debug, Clone, Default)]
pub struct MachineTable {
    records: BTreeMap<MachineId, Machine>,
}

impl MachineTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a persisted record list
    pub fn from_records(machines: Vec<Machine>) -> StoreResult<Self> {
        let mut records = BTreeMap::new();
        for machine in machines {
            machine
                .validate_identity()
                .map_err(|e| StoreError::Corrupt(e.to_string()))?;
            let id = machine.machine_id();
            if records.insert(id.clone(), machine).is_some() {
                return Err(StoreError::Corrupt(format!("duplicate record {}", id)));
            }
        }
        Ok(Self { records })
    }

    /// All records in id order
    pub fn records(&self) -> Vec<Machine> {
        self.records.values().cloned().collect()
    }

    pub fn list(&self, owner: &str) -> Vec<Machine> {
        self.records
            .values()
            .filter(|m| owner_matches(owner, m))
            .cloned()
            .collect()
    }

    pub fn page(&self, owner: &str, query: &PageQuery) -> Vec<Machine> {
        query.apply(self.list(owner))
    }

    pub fn count(&self, owner: &str, filter: Option<&FieldFilter>) -> usize {
        self.records
            .values()
            .filter(|m| owner_matches(owner, m))
            .filter(|m| filter.map_or(true, |f| f.matches(m)))
            .count()
    }

    pub fn get(&self, id: &MachineId) -> StoreResult<Machine> {
        self.records
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Insert a new record; an existing or unaddressable id is an error
    pub fn add(&mut self, machine: &Machine) -> StoreResult<usize> {
        machine
            .validate_identity()
            .map_err(|e| StoreError::InvalidRecord(e.to_string()))?;
        let id = machine.machine_id();
        if self.records.contains_key(&id) {
            return Err(StoreError::Duplicate(id.to_string()));
        }

        let mut machine = machine.clone();
        if machine.created_time.is_empty() {
            machine.created_time = timestamp();
        }
        self.records.insert(id, machine);
        Ok(1)
    }

    /// Replace the non-identity attributes of the record at `id`.
    ///
    /// Returns 0 when no record exists at `id`.
    pub fn update(&mut self, id: &MachineId, machine: &Machine) -> usize {
        let Some(existing) = self.records.get_mut(id) else {
            return 0;
        };

        let mut updated = machine.clone();
        updated.owner = id.owner.clone();
        updated.name = id.name.clone();
        if is_masked(&updated.remote_password) {
            updated.remote_password = existing.remote_password.clone();
        }
        if updated.created_time.is_empty() {
            updated.created_time = existing.created_time.clone();
        }
        updated.updated_time = timestamp();

        *existing = updated;
        1
    }

    /// Remove the record with `machine`'s id; returns 0 when absent
    pub fn delete(&mut self, machine: &Machine) -> usize {
        match self.records.remove(&machine.machine_id()) {
            Some(_) => 1,
            None => 0,
        }
    }
}
