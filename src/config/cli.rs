//! Command-line interface definition.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

use super::constants::{DEFAULT_API_PORT, DEFAULT_HISTORY_PATH, DNS_TIMEOUT_SECS};
use super::types::{Config, LogFormat, LogLevel};
use crate::export::ExportFormat;
use crate::generate::{Alignment, DmarcPolicy};
use crate::parse::Qualifier;

/// Check a domain's DMARC, SPF and DKIM records.
#[derive(Debug, Parser)]
#[command(name = "mail_auth_check", version, about)]
pub struct Cli {
    /// Log level: error, warn, info, debug or trace
    #[arg(long, value_enum, default_value = "info", global = true)]
    pub log_level: LogLevel,

    /// Log format: plain or json
    #[arg(long, value_enum, default_value = "plain", global = true)]
    pub log_format: LogFormat,

    /// Per-query DNS timeout in seconds
    #[arg(long, default_value_t = DNS_TIMEOUT_SECS, global = true)]
    pub dns_timeout: u64,

    /// DKIM selectors to probe (comma-separated); defaults to common provider selectors
    #[arg(long, value_delimiter = ',', global = true)]
    pub selectors: Vec<String>,

    /// Directory holding the check history
    #[arg(long, env = "MAIL_AUTH_HISTORY", default_value = DEFAULT_HISTORY_PATH, global = true)]
    pub history_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check one domain and record it in the history
    Check {
        /// Domain or URL to check
        domain: String,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Do not add the result to the history
        #[arg(long)]
        no_history: bool,
    },
    /// Explain the tags of a DMARC record
    Analyze {
        /// The DMARC TXT record, e.g. "v=DMARC1; p=none"
        record: String,
    },
    /// Explain the terms of an SPF record
    Spf {
        /// The SPF TXT record, e.g. "v=spf1 include:_spf.google.com -all"
        record: String,
    },
    /// Check a list of domains one at a time
    Bulk(BulkArgs),
    /// Show or edit the check history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// Generate a DMARC or SPF record
    Generate {
        #[command(subcommand)]
        record: GenerateCommand,
    },
    /// Serve the HTTP API
    Serve {
        /// Port to listen on (127.0.0.1 only)
        #[arg(long, default_value_t = DEFAULT_API_PORT)]
        port: u16,
    },
}

#[derive(Debug, Args)]
pub struct BulkArgs {
    /// File with domains separated by newlines, commas or semicolons ("-" for stdin)
    pub file: Option<PathBuf>,

    /// Domains given inline instead of a file
    #[arg(long, conflicts_with = "file")]
    pub domains: Option<String>,

    /// Export format
    #[arg(long, value_enum, default_value = "csv")]
    pub format: ExportFormat,

    /// Write the export to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Cooldown between domains in milliseconds
    #[arg(long, default_value_t = 500)]
    pub delay_ms: u64,
}

#[derive(Debug, Subcommand)]
pub enum HistoryAction {
    /// List recent checks, newest first
    List,
    /// Remove one domain from the history
    Remove { domain: String },
    /// Delete the whole history
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum GenerateCommand {
    /// Build a DMARC record
    Dmarc {
        #[arg(long, value_enum, default_value = "none")]
        policy: DmarcPolicy,
        /// Aggregate report address
        #[arg(long)]
        rua: Option<String>,
        /// Forensic report address
        #[arg(long)]
        ruf: Option<String>,
        #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u8).range(0..=100))]
        pct: u8,
        /// Policy for subdomains
        #[arg(long, value_enum)]
        subdomain_policy: Option<DmarcPolicy>,
        #[arg(long, value_enum, default_value = "relaxed")]
        adkim: Alignment,
        #[arg(long, value_enum, default_value = "relaxed")]
        aspf: Alignment,
    },
    /// Build an SPF record
    Spf {
        #[arg(long)]
        ip4: Vec<String>,
        #[arg(long)]
        ip6: Vec<String>,
        #[arg(long)]
        include: Vec<String>,
        /// How to treat servers that are not listed
        #[arg(long, value_enum, default_value = "fail")]
        all: AllPolicy,
    },
}

/// Final `all` term offered by the SPF generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AllPolicy {
    /// -all
    Fail,
    /// ~all
    SoftFail,
    /// ?all
    Neutral,
}

impl From<AllPolicy> for Qualifier {
    fn from(policy: AllPolicy) -> Self {
        match policy {
            AllPolicy::Fail => Qualifier::Fail,
            AllPolicy::SoftFail => Qualifier::SoftFail,
            AllPolicy::Neutral => Qualifier::Neutral,
        }
    }
}

impl Cli {
    /// Library configuration from the global flags.
    pub fn config(&self) -> Config {
        let mut config = Config {
            log_level: self.log_level.clone(),
            log_format: self.log_format.clone(),
            dns_timeout_secs: self.dns_timeout,
            history_path: self.history_dir.clone(),
            ..Default::default()
        };
        let selectors: Vec<String> = self
            .selectors
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if !selectors.is_empty() {
            config.dkim_selectors = selectors;
        }
        if let Command::Bulk(args) = &self.command {
            config.bulk_delay = Duration::from_millis(args.delay_ms);
        }
        config
    }
}
