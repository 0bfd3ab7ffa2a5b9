//! Export functionality for bulk check results.
//!
//! Bulk jobs can be written as CSV (the flat per-domain table) or JSONL
//! (one full slot per line) to a file or stdout.

mod csv;
mod jsonl;
mod types;
mod writer;

use anyhow::Result;

use crate::bulk::BulkJobState;

pub use self::csv::{csv_string, write_csv, CSV_HEADER};
pub use jsonl::write_jsonl;
pub use types::{ExportFormat, ExportOptions};

/// Writes `state` in the requested format to the requested target.
///
/// # Returns
///
/// The number of domains exported.
pub fn export_bulk(state: &BulkJobState, opts: &ExportOptions) -> Result<usize> {
    let out = writer::open_output(opts.output.as_deref())?;
    let count = match opts.format {
        ExportFormat::Csv => write_csv(state, out)?,
        ExportFormat::Jsonl => write_jsonl(state, out)?,
    };
    log::info!("Exported {} domains", count);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_export_bulk_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bulk.csv");
        let state = BulkJobState::new(vec!["a.com".into()]);

        let count = export_bulk(
            &state,
            &ExportOptions {
                output: Some(path.clone()),
                format: ExportFormat::Csv,
            },
        )
        .unwrap();

        assert_eq!(count, 1);
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("Domain,DMARC,SPF,DKIM,Security Score\n"));
        assert!(written.contains("a.com,-,-,-,-"));
    }

    #[test]
    fn test_export_bulk_jsonl_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bulk.jsonl");
        let state = BulkJobState::new(vec!["a.com".into(), "b.com".into()]);

        export_bulk(
            &state,
            &ExportOptions {
                output: Some(path.clone()),
                format: ExportFormat::Jsonl,
            },
        )
        .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 2);
    }
}
