//! CLI module for the inventory service
//!
//! - init: write a default configuration
//! - check: validate a configuration
//! - start: boot the HTTP server

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{check, init, run, run_command, start};
pub use config::{Config, ProviderConfig, StoreConfig};
pub use errors::{CliError, CliResult};
