//! Observability for the inventory service
//!
//! - Structured logging through `tracing`
//! - Named lifecycle events
//! - Monotonic counters exposed over HTTP
//!
//! Observability never affects request outcomes.

mod events;
mod logging;
mod metrics;

pub use events::Event;
pub use logging::{init_logging, LogConfig};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

use thiserror::Error;

/// Observability setup error; never fatal to request handling
#[derive(Debug, Clone, Error)]
#[error("INV_OBSERVABILITY_FAILED: {message}")]
pub struct ObservabilityError {
    message: String,
}

impl ObservabilityError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub type ObservabilityResult<T> = Result<T, ObservabilityError>;
