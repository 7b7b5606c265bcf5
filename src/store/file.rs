//! # JSON File Store
//!
//! Durable store keeping the whole record set in one JSON document.
//! Mutations rewrite the document through a temp file and rename, so a
//! crash mid-write leaves the previous version intact.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::machine::{Machine, MachineId};

use super::errors::{StoreError, StoreResult};
use super::query::{FieldFilter, PageQuery};
use super::table::MachineTable;
use super::MachineStore;

#[derive(Debug)]
pub struct FileMachineStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles on the document
    lock: Mutex<()>,
}

impl FileMachineStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StoreResult<MachineTable> {
        if !self.path.exists() {
            return Ok(MachineTable::new());
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| StoreError::Io(format!("Failed to read {}: {}", self.path.display(), e)))?;

        if content.trim().is_empty() {
            return Ok(MachineTable::new());
        }

        let machines: Vec<Machine> = serde_json::from_str(&content)
            .map_err(|e| StoreError::Corrupt(format!("{}: {}", self.path.display(), e)))?;

        MachineTable::from_records(machines)
    }

    fn save(&self, table: &MachineTable) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(&table.records())
            .map_err(|e| StoreError::Io(format!("Failed to serialize machines: {}", e)))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    StoreError::Io(format!("Failed to create {}: {}", parent.display(), e))
                })?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)
            .map_err(|e| StoreError::Io(format!("Failed to write {}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| StoreError::Io(format!("Failed to replace {}: {}", self.path.display(), e)))
    }

    fn read<T>(&self, f: impl FnOnce(&MachineTable) -> StoreResult<T>) -> StoreResult<T> {
        let _guard = self.lock.lock().map_err(|_| StoreError::LockPoisoned)?;
        f(&self.load()?)
    }

    /// Apply a mutation and persist only if it affected a record
    fn write(&self, f: impl FnOnce(&mut MachineTable) -> StoreResult<usize>) -> StoreResult<usize> {
        let _guard = self.lock.lock().map_err(|_| StoreError::LockPoisoned)?;
        let mut table = self.load()?;
        let affected = f(&mut table)?;
        if affected > 0 {
            self.save(&table)?;
        }
        Ok(affected)
    }
}

impl MachineStore for FileMachineStore {
    fn list_machines(&self, owner: &str) -> StoreResult<Vec<Machine>> {
        self.read(|t| Ok(t.list(owner)))
    }

    fn list_machines_page(&self, owner: &str, query: &PageQuery) -> StoreResult<Vec<Machine>> {
        self.read(|t| Ok(t.page(owner, query)))
    }

    fn count_machines(&self, owner: &str, filter: Option<&FieldFilter>) -> StoreResult<usize> {
        self.read(|t| Ok(t.count(owner, filter)))
    }

    fn get_machine(&self, id: &MachineId) -> StoreResult<Machine> {
        self.read(|t| t.get(id))
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
