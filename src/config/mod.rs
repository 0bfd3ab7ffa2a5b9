//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, batch limits, history bounds)
//! - The default DKIM selector candidate list
//! - CLI option types and the library `Config`

mod cli;
mod constants;
mod types;

// Re-export all constants
pub use cli::{AllPolicy, BulkArgs, Cli, Command, GenerateCommand, HistoryAction};
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};
