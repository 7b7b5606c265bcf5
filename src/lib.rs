//! machine-inventory - compute host inventory with cloud reconciliation
//! and field-level disclosure control

pub mod cli;
pub mod cloud;
pub mod http_server;
pub mod inventory;
pub mod machine;
pub mod observability;
pub mod store;
