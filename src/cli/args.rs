//! CLI argument definitions using clap
//!
//! Commands:
//! - machine-inventory init --config <path>
//! - machine-inventory check --config <path>
//! - machine-inventory start --config <path> [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Machine inventory service
#[derive(Parser, Debug)]
#[command(name = "machine-inventory")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default configuration file
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./inventory.json")]
        config: PathBuf,
    },

    /// Load and validate a configuration file, then exit
    Check {
        /// Path to configuration file
        #[arg(long, default_value = "./inventory.json")]
        config: PathBuf,
    },

    /// Start the inventory HTTP server
    Start {
        /// Path to configuration file
        #[arg(long, default_value = "./inventory.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
