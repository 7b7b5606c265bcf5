//! # Machine Providers
//!
//! A provider reports the machines it currently runs for one owner.
//! Provider SDK clients plug in behind [`MachineProvider`].

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::machine::Machine;

use super::errors::{CloudError, CloudResult};

/// Source of live machine state for one owner
pub trait MachineProvider: Send + Sync + fmt::Debug {
    /// Provider name, recorded on every machine it reports
    fn name(&self) -> &str;

    /// Owner whose scope this provider reconciles
    fn owner(&self) -> &str;

    /// Machines currently reported by the provider
    fn list_machines(&self) -> CloudResult<Vec<Machine>>;
}

/// Provider with a fixed machine list
#[derive(Debug, Clone)]
pub struct StaticProvider {
    name: String,
    owner: String,
    machines: Vec<Machine>,
}

impl StaticProvider {
    pub fn new(name: impl Into<String>, owner: impl Into<String>, machines: Vec<Machine>) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            machines,
        }
    }
}

impl MachineProvider for StaticProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn owner(&self) -> &str {
        &self.owner
    }

    fn list_machines(&self) -> CloudResult<Vec<Machine>> {
        Ok(self.machines.clone())
    }
}

/// Provider reading a JSON snapshot of instances exported from the cloud
/// console. The file is re-read on every sync.
#[derive(Debug, Clone)]
pub struct FileProvider {
    name: String,
    owner: String,
    path: PathBuf,
}

impl FileProvider {
    pub fn new(name: impl Into<String>, owner: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl MachineProvider for FileProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn owner(&self) -> &str {
        &self.owner
    }

    fn list_machines(&self) -> CloudResult<Vec<Machine>> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            CloudError::provider(&self.name, format!("cannot read {}: {}", self.path.display(), e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            CloudError::provider(&self.name, format!("invalid snapshot {}: {}", self.path.display(), e))
        })
    }
}
