//! Observable inventory events
//!
//! Every log line emitted by the inventory core carries one of these as
//! its `event` field, so operators can grep and alert on stable names.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Configuration loaded and validated
    ConfigLoaded,
    /// HTTP server bound and serving
    ServerStart,

    // Cloud sync
    /// Scope has a real machine, sync starting
    SyncStart,
    /// Scope is empty or all default, sync skipped
    SyncSkipped,
    /// Sync finished
    SyncComplete,
    /// Sync failed, enclosing request aborted
    SyncFailed,

    // Reads
    /// Records masked and returned to a caller
    MachinesServed,

    // Writes
    MachineAdded,
    MachineUpdated,
    MachineDeleted,
    /// A write was rejected by the store
    MutationFailed,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ServerStart => "SERVER_START",
            Event::SyncStart => "SYNC_START",
            Event::SyncSkipped => "SYNC_SKIPPED",
            Event::SyncComplete => "SYNC_COMPLETE",
            Event::SyncFailed => "SYNC_FAILED",
            Event::MachinesServed => "MACHINES_SERVED",
            Event::MachineAdded => "MACHINE_ADDED",
            Event::MachineUpdated => "MACHINE_UPDATED",
            Event::MachineDeleted => "MACHINE_DELETED",
            Event::MutationFailed => "MUTATION_FAILED",
        }
    }

    /// Whether this event reports a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Event::SyncFailed | Event::MutationFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::SyncStart.as_str(), "SYNC_START");
        assert_eq!(Event::MachineDeleted.to_string(), "MACHINE_DELETED");
    }

    #[test]
    fn test_failure_events() {
        assert!(Event::SyncFailed.is_failure());
        assert!(Event::MutationFailed.is_failure());
        assert!(!Event::SyncComplete.is_failure());
    }
}
