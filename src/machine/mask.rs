//! # Disclosure Filter
//!
//! Redacts secret attributes before a record leaves the read path.
//! Masking returns a new record and never touches the input, so callers
//! may keep classifying or syncing the unmasked original.

use super::model::Machine;

/// Literal that replaces a redacted value
pub const MASK: &str = "***";

/// Attributes redacted on every outbound record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretField {
    RemotePassword,
}

impl SecretField {
    /// Every redacted attribute
    pub const ALL: [SecretField; 1] = [SecretField::RemotePassword];

    /// Wire name of the attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            SecretField::RemotePassword => "remotePassword",
        }
    }

    fn slot<'a>(&self, machine: &'a mut Machine) -> &'a mut String {
        match self {
            SecretField::RemotePassword => &mut machine.remote_password,
        }
    }
}

/// Return a copy of `machine` with every secret attribute masked.
///
/// Empty secrets stay empty. Idempotent.
pub fn mask(machine: &Machine) -> Machine {
    let mut masked = machine.clone();
    for field in SecretField::ALL {
        let slot = field.slot(&mut masked);
        if !slot.is_empty() {
            *slot = MASK.to_string();
        }
    }
    masked
}

/// Mask a sequence of records, preserving order
pub fn mask_all(machines: &[Machine]) -> Vec<Machine> {
    machines.iter().map(mask).collect()
}

/// Whether `value` is the mask literal echoed back by a client
pub fn is_masked(value: &str) -> bool {
    value == MASK
}
