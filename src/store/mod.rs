//! # Machine Store
//!
//! Persistence capabilities the inventory core relies on. The store is
//! the only shared mutable state in the service; each call is atomic with
//! respect to the records it touches, but consecutive calls are not
//! isolated from concurrent writers.

pub mod errors;
pub mod file;
pub mod memory;
pub mod query;
pub mod table;

pub use errors::{StoreError, StoreResult};
pub use file::FileMachineStore;
pub use memory::MemMachineStore;
pub use query::{FieldFilter, PageQuery, SortSpec};

use crate::machine::{Machine, MachineId};

/// Persistence capabilities for machine records.
///
/// Write operations return the number of affected records.
pub trait MachineStore: Send + Sync {
    /// All machines for `owner`; the empty owner lists every machine
    fn list_machines(&self, owner: &str) -> StoreResult<Vec<Machine>>;

    /// A filtered, sorted window of `owner`'s machines
    fn list_machines_page(&self, owner: &str, query: &PageQuery) -> StoreResult<Vec<Machine>>;

    /// Number of `owner`'s machines passing `filter`
    fn count_machines(&self, owner: &str, filter: Option<&FieldFilter>) -> StoreResult<usize>;

    /// Fetch one machine; fails with `StoreError::NotFound` if absent
    fn get_machine(&self, id: &MachineId) -> StoreResult<Machine>;

    fn add_machine(&self, machine: &Machine) -> StoreResult<usize>;

    /// Replace the record at `id`, keeping its identity
    fn update_machine(&self, id: &MachineId, machine: &Machine) -> StoreResult<usize>;

    fn delete_machine(&self, machine: &Machine) -> StoreResult<usize>;
}
