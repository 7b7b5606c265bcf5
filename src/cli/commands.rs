//! CLI command implementations

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::http_server::HttpServer;
use crate::observability::{init_logging, Event};

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args().command)
}

pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Init { config } => init(&config),
        Command::Check { config } => check(&config).map(|_| ()),
        Command::Start { config, port } => start(&config, port),
    }
}

/// Write the default configuration; never overwrites
pub fn init(config_path: &Path) -> CliResult<()> {
    if config_path.exists() {
        return Err(CliError::AlreadyInitialized(config_path.display().to_string()));
    }

    let content = serde_json::to_string_pretty(&Config::default())
        .map_err(|e| CliError::config_error(format!("Failed to serialize config: {}", e)))?;

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(config_path, content)?;
    Ok(())
}

/// Load and validate the configuration
pub fn check(config_path: &Path) -> CliResult<Config> {
    Config::load(config_path)
}

/// Boot the HTTP server and serve until the process is stopped
pub fn start(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = Config::load(config_path)?;
    if let Some(port) = port {
        config.server.port = port;
    }

    init_logging(&config.log).map_err(|e| CliError::boot_failed(e.to_string()))?;
    tracing::info!(
        event = %Event::ConfigLoaded,
        config = %config_path.display(),
        providers = config.providers.len()
    );

    let inventory = Arc::new(config.build_inventory());
    let server = HttpServer::with_config(config.server.clone(), inventory);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::boot_failed(format!("Failed to start runtime: {}", e)))?;

    runtime
        .block_on(server.start())
        .map_err(|e| CliError::boot_failed(e.to_string()))
}
