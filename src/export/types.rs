//! Export types and options.

use std::path::PathBuf;

/// Export format options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    /// CSV format (one row per domain, for spreadsheets)
    #[default]
    Csv,
    /// JSONL format (one full slot per line, including records and DKIM selectors)
    Jsonl,
}

/// Options for exporting a bulk job.
#[derive(Clone, Debug, Default)]
pub struct ExportOptions {
    /// Output file path (or stdout if None)
    pub output: Option<PathBuf>,
    /// Export format
    pub format: ExportFormat,
}
