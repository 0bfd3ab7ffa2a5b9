//! Logger initialization.
//!
//! Plain output is colored with a target prefix; JSON output is one object
//! per line for log shippers.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::{Level, LevelFilter};

/// Initializes the logger with the specified level and format.
///
/// `RUST_LOG` is read first and `level` then overrides the global and crate
/// level, so `RUST_LOG=hickory_resolver=debug` still works for dependency
/// modules while `--log-level` controls this crate.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=hickory_resolver=debug mail_auth_check check example.com
/// mail_auth_check --log-level debug --log-format json bulk domains.txt
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(true);

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    // Malformed or truncated UDP answers are retried internally and only add noise
    builder.filter_module("hickory_proto", LevelFilter::Error);
    builder.filter_module("hickory_resolver", LevelFilter::Warn);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("mail_auth_check", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{}",
                    json_line(
                        chrono::Utc::now().timestamp_millis(),
                        record.level(),
                        record.target(),
                        &record.args().to_string(),
                    )
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                writeln!(
                    buf,
                    "{} {} [{}] {}",
                    level_marker(level),
                    record.target().cyan(),
                    colored_level(level),
                    record.args()
                )
            });
        }
    }

    // try_init so a second call (tests, embedding) reports instead of panicking
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

fn json_line(ts_ms: i64, level: Level, target: &str, msg: &str) -> String {
    serde_json::json!({
        "ts": ts_ms,
        "level": level.as_str(),
        "target": target,
        "msg": msg,
    })
    .to_string()
}

fn colored_level(level: Level) -> ColoredString {
    let text = level.to_string();
    match level {
        Level::Error => text.red(),
        Level::Warn => text.yellow(),
        Level::Info => text.green(),
        Level::Debug => text.blue(),
        Level::Trace => text.purple(),
    }
}

fn level_marker(level: Level) -> &'static str {
    match level {
        Level::Error => "❌",
        Level::Warn => "⚠️",
        Level::Info => "✔️",
        Level::Debug => "🔍",
        Level::Trace => "🔬",
    }
}
