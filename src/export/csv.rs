//! CSV export of bulk results.
//!
//! One row per domain in input order with the header
//! `Domain,DMARC,SPF,DKIM,Security Score`.

use anyhow::{Context, Result};
use csv::Writer;
use std::io::Write;

use crate::bulk::{BulkJobState, BulkSlot};
use crate::models::AuthStatus;

/// Header row of the bulk CSV.
pub const CSV_HEADER: [&str; 5] = ["Domain", "DMARC", "SPF", "DKIM", "Security Score"];

const PENDING_CELL: &str = "-";

/// Writes `state` as CSV to `writer`.
///
/// Statuses are rendered as `valid`, `invalid`, `not found` or `error`;
/// slots that have not finished show `-`.
///
/// # Returns
///
/// The number of data rows written.
pub fn write_csv<W: Write>(state: &BulkJobState, writer: W) -> Result<usize> {
    let mut writer = Writer::from_writer(writer);
    writer
        .write_record(CSV_HEADER)
        .context("Failed to write CSV header")?;

    for slot in &state.slots {
        writer
            .write_record(csv_row(slot))
            .with_context(|| format!("Failed to write CSV row for {}", slot.domain))?;
    }

    writer.flush().context("Failed to flush CSV output")?;
    Ok(state.slots.len())
}

/// Renders `state` as a CSV string.
pub fn csv_string(state: &BulkJobState) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(state, &mut buf)?;
    String::from_utf8(buf).context("CSV output was not valid UTF-8")
}

fn csv_row(slot: &BulkSlot) -> [String; 5] {
    let cell = |status: Option<AuthStatus>| match status {
        Some(status) => status.label().to_string(),
        None => PENDING_CELL.to_string(),
    };
    [
        slot.domain.clone(),
        cell(slot.dmarc),
        cell(slot.spf),
        cell(slot.dkim),
        slot.score
            .map(|s| s.to_string())
            .unwrap_or_else(|| PENDING_CELL.to_string()),
    ]
}
