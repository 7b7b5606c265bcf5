//! HTTP Server Configuration
//!
//! Listen address and browser origins for the inventory API. Loaded as
//! the `server` section of the service config; every field defaults.

use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};

/// Port the inventory API listens on when none is configured
pub const DEFAULT_PORT: u16 = 19000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Interface to listen on (default: all interfaces)
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port (default: 19000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed to call the API from a browser.
    /// An empty list allows any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl HttpServerConfig {
    /// Resolve host and port into a listen address
    pub fn listen_addr(&self) -> Result<SocketAddr, String> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| format!("server.host '{}' is not an IP address", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Configured origins as header values; `None` allows any origin
    pub fn allowed_origins(&self) -> Result<Option<Vec<HeaderValue>>, String> {
        if self.cors_origins.is_empty() {
            return Ok(None);
        }
        self.cors_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .map_err(|_| format!("server.cors_origins entry '{}' is invalid", origin))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// Reject settings the server cannot start with
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("server.port must be > 0".to_string());
        }
        self.listen_addr()?;
        self.allowed_origins()?;
        Ok(())
    }
}
