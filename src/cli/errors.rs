//! CLI-specific error types
//!
//! All CLI errors are fatal: the process prints the error and exits
//! non-zero.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file missing, malformed or invalid
    #[error("INV_CLI_CONFIG_ERROR: {0}")]
    Config(String),

    /// Terminal or file I/O failed
    #[error("INV_CLI_IO_ERROR: {0}")]
    Io(#[from] io::Error),

    /// `init` refused to overwrite an existing config
    #[error("INV_CLI_ALREADY_INITIALIZED: {0} already exists")]
    AlreadyInitialized(String),

    /// Server could not be started
    #[error("INV_CLI_BOOT_FAILED: {0}")]
    BootFailed(String),
}

impl CliError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::BootFailed(msg.into())
    }

    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(_) => "INV_CLI_CONFIG_ERROR",
            CliError::Io(_) => "INV_CLI_IO_ERROR",
            CliError::AlreadyInitialized(_) => "INV_CLI_ALREADY_INITIALIZED",
            CliError::BootFailed(_) => "INV_CLI_BOOT_FAILED",
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
