//! Configuration file
//!
//! JSON document with a section per subsystem. Every field has a default,
//! so `{}` is a valid in-memory configuration.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cloud::{CloudSync, FileProvider, MachineProvider, NoopCloudSync, ProviderSync};
use crate::http_server::HttpServerConfig;
use crate::inventory::Inventory;
use crate::observability::LogConfig;
use crate::store::{FileMachineStore, MachineStore, MemMachineStore};

use super::errors::{CliError, CliResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub store: StoreConfig,

    /// Cloud providers reconciled into the store
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,

    #[serde(default)]
    pub log: LogConfig,
}

/// Where machine records live
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StoreConfig {
    /// Volatile, lost on restart
    #[default]
    #[serde(rename = "memory")]
    Memory,

    /// JSON document on disk
    #[serde(rename = "file")]
    File { path: PathBuf },
}

/// A provider bound to one owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProviderConfig {
    /// Instance snapshot exported to a JSON file
    #[serde(rename = "file")]
    File {
        name: String,
        owner: String,
        path: PathBuf,
    },
}

impl ProviderConfig {
    pub fn name(&self) -> &str {
        match self {
            ProviderConfig::File { name, .. } => name,
        }
    }

    fn build(&self) -> Arc<dyn MachineProvider> {
        match self {
            ProviderConfig::File { name, owner, path } => {
                Arc::new(FileProvider::new(name, owner, path))
            }
        }
    }
}

impl Config {
    /// Load and validate configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CliResult<()> {
        self.server.validate().map_err(CliError::config_error)?;

        if let StoreConfig::File { path } = &self.store {
            if path.as_os_str().is_empty() {
                return Err(CliError::config_error("store.path must not be empty"));
            }
        }

        let mut names = HashSet::new();
        for provider in &self.providers {
            let ProviderConfig::File { name, owner, path } = provider;
            if name.is_empty() || owner.is_empty() {
                return Err(CliError::config_error("provider name and owner are required"));
            }
            if path.as_os_str().is_empty() {
                return Err(CliError::config_error(format!("provider '{}' has no path", name)));
            }
            if !names.insert(name.as_str()) {
                return Err(CliError::config_error(format!("duplicate provider '{}'", name)));
            }
        }

        Ok(())
    }

    pub fn open_store(&self) -> Arc<dyn MachineStore> {
        match &self.store {
            StoreConfig::Memory => Arc::new(MemMachineStore::new()),
            StoreConfig::File { path } => {
                let store = FileMachineStore::new(path);
                tracing::info!(path = %store.path().display(), "using file machine store");
                Arc::new(store)
            }
        }
    }

    pub fn cloud_sync(&self, store: Arc<dyn MachineStore>) -> Arc<dyn CloudSync> {
        if self.providers.is_empty() {
            return Arc::new(NoopCloudSync);
        }
        let providers = self.providers.iter().map(ProviderConfig::build).collect();
        Arc::new(ProviderSync::new(store, providers))
    }

    /// Wire store, cloud sync and inventory core from this config
    pub fn build_inventory(&self) -> Inventory {
        let store = self.open_store();
        let cloud = self.cloud_sync(store.clone());
        Inventory::new(store, cloud)
    }
}
