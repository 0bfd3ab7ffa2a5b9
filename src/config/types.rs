//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;

use crate::config::constants::{
    BULK_INTER_DOMAIN_DELAY, DEFAULT_DKIM_SELECTORS, DEFAULT_HISTORY_PATH, DNS_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use mail_auth_check::Config;
///
/// let config = Config {
///     dkim_selectors: vec!["default".into(), "mandrill".into()],
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// DKIM selector candidates probed for every domain
    pub dkim_selectors: Vec<String>,

    /// Per-query DNS timeout in seconds
    pub dns_timeout_secs: u64,

    /// Cooldown between domains in a bulk job
    pub bulk_delay: Duration,

    /// Directory backing the check history
    pub history_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            dkim_selectors: DEFAULT_DKIM_SELECTORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            dns_timeout_secs: DNS_TIMEOUT_SECS,
            bulk_delay: BULK_INTER_DOMAIN_DELAY,
            history_path: PathBuf::from(DEFAULT_HISTORY_PATH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_log_format_debug() {
        assert_eq!(format!("{:?}", LogFormat::Plain), "Plain");
        assert_eq!(format!("{:?}", LogFormat::Json), "Json");
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.dns_timeout_secs, 5);
        assert_eq!(config.bulk_delay, Duration::from_millis(500));
        assert_eq!(config.history_path, PathBuf::from(".mail_auth_check"));
        assert!(config.dkim_selectors.contains(&"google".to_string()));
        assert!(config.dkim_selectors.contains(&"selector1".to_string()));
        assert_eq!(config.dkim_selectors.len(), DEFAULT_DKIM_SELECTORS.len());
    }
}
