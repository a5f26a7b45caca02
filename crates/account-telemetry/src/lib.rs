//! # Account Telemetry
//!
//! Structured logging for account abstraction hosts.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use account_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     init_logging(&config).expect("Failed to init logging");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `AA_SERVICE_NAME` | `account-abstraction` | Service name in log records |
//! | `AA_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `AA_JSON_LOGS` | `true` in containers | JSON instead of pretty output |
//! | `AA_CONSOLE_OUTPUT` | `true` | Emit logs to stdout at all |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The log filter directive could not be parsed.
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber is already installed.
    #[error("Failed to install subscriber: {0}")]
    SubscriberInit(String),
}
