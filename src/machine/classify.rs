//! # Default Classifier
//!
//! A "default" machine is a placeholder record created from the UI
//! template and never backed by real infrastructure. Defaults are never
//! reconciled against a cloud provider.

use super::model::Machine;

/// Name prefix given to template machines
pub const DEFAULT_NAME_PREFIX: &str = "machine_";

/// Display name prefix given to template machines
pub const DEFAULT_DISPLAY_NAME_PREFIX: &str = "New Machine - ";

/// Provider assigned to template machines
pub const DEFAULT_PROVIDER: &str = "provider_1";

/// Lifecycle state assigned to template machines
pub const DEFAULT_STATE: &str = "Active";

/// Whether `machine` is an untouched placeholder record.
///
/// All conditions must hold: no IPs, template name and display name
/// prefixes, template provider, `Active` state, no tag, no expiry.
pub fn is_default(machine: &Machine) -> bool {
    machine.public_ip.is_empty()
        && machine.private_ip.is_empty()
        && machine.name.starts_with(DEFAULT_NAME_PREFIX)
        && machine.display_name.starts_with(DEFAULT_DISPLAY_NAME_PREFIX)
        && machine.provider == DEFAULT_PROVIDER
        && machine.state == DEFAULT_STATE
        && machine.tag.is_empty()
        && machine.expire_time.is_empty()
}

/// True when at least one machine in the slice is real
pub fn any_real(machines: &[Machine]) -> bool {
    machines.iter().any(|m| !is_default(m))
}
