//! JSONL export of bulk results.
//!
//! Each line is one serialized `BulkSlot`, including the full verification
//! result when the check completed. Suited to piping into `jq`.

use anyhow::{Context, Result};
use std::io::Write;

use crate::bulk::BulkJobState;

/// Writes one JSON object per slot to `writer`.
///
/// # Returns
///
/// The number of lines written.
pub fn write_jsonl<W: Write>(state: &BulkJobState, mut writer: W) -> Result<usize> {
    for slot in &state.slots {
        serde_json::to_writer(&mut writer, slot)
            .with_context(|| format!("Failed to serialize slot for {}", slot.domain))?;
        writeln!(writer).context("Failed to write JSONL line")?;
    }
    writer.flush().context("Failed to flush JSONL output")?;
    Ok(state.slots.len())
}
