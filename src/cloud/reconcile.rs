//! # Provider Reconciliation
//!
//! Pulls live machines from every provider bound to an owner and upserts
//! them into the store. Operator-entered attributes survive a refresh;
//! provider-owned attributes are overwritten.

use std::sync::Arc;

use crate::machine::Machine;
use crate::store::{MachineStore, StoreError};

use super::errors::CloudResult;
use super::provider::MachineProvider;
use super::CloudSync;

/// Cloud sync driven by a set of configured providers
pub struct ProviderSync {
    store: Arc<dyn MachineStore>,
    providers: Vec<Arc<dyn MachineProvider>>,
}

impl ProviderSync {
    pub fn new(store: Arc<dyn MachineStore>, providers: Vec<Arc<dyn MachineProvider>>) -> Self {
        Self { store, providers }
    }

    fn providers_for<'a>(&'a self, owner: &'a str) -> impl Iterator<Item = &'a Arc<dyn MachineProvider>> {
        self.providers
            .iter()
            .filter(move |p| owner.is_empty() || p.owner() == owner)
    }

    fn reconcile(&self, provider: &dyn MachineProvider) -> CloudResult<usize> {
        let mut affected = 0;

        for mut live in provider.list_machines()? {
            live.owner = provider.owner().to_string();
            if live.provider.is_empty() {
                live.provider = provider.name().to_string();
            }

            if let Err(e) = live.validate_identity() {
                tracing::warn!(provider = provider.name(), error = %e, "skipping unaddressable machine");
                continue;
            }

            let id = live.machine_id();
            affected += match self.store.get_machine(&id) {
                Ok(existing) => self.store.update_machine(&id, &refresh(&existing, &live))?,
                Err(StoreError::NotFound(_)) => self.store.add_machine(&live)?,
                Err(e) => return Err(e.into()),
            };
        }

        Ok(affected)
    }
}

impl CloudSync for ProviderSync {
    fn sync_cloud(&self, owner: &str) -> CloudResult<usize> {
        let mut affected = 0;
        for provider in self.providers_for(owner) {
            let count = self.reconcile(provider.as_ref())?;
            tracing::debug!(provider = provider.name(), owner = provider.owner(), count, "provider reconciled");
            affected += count;
        }
        Ok(affected)
    }
}

/// Overlay provider-owned attributes of `live` onto `existing`
fn refresh(existing: &Machine, live: &Machine) -> Machine {
    Machine {
        expire_time: live.expire_time.clone(),
        provider: live.provider.clone(),
        id: live.id.clone(),
        region: live.region.clone(),
        zone: live.zone.clone(),
        category: live.category.clone(),
        machine_type: live.machine_type.clone(),
        size: live.size.clone(),
        state: live.state.clone(),
        image: live.image.clone(),
        os: live.os.clone(),
        public_ip: live.public_ip.clone(),
        private_ip: live.private_ip.clone(),
        cpu_size: live.cpu_size.clone(),
        mem_size: live.mem_size.clone(),
        ..existing.clone()
    }
}
