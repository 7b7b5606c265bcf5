//! # Inventory HTTP Server Module
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/get-machines`, `/api/get-machine` - Masked reads
//! - `/api/add-machine`, `/api/update-machine`, `/api/delete-machine` - Writes
//! - `/observability/metrics` - Counters

pub mod config;
pub mod machine_routes;
pub mod observability_routes;
pub mod response;
pub mod server;

pub use config::HttpServerConfig;
pub use response::{ApiResponse, Envelope};
pub use server::HttpServer;
