//! Generic CSV Row Engine
//!
//! Every record family goes through the same reader loop: skip the single
//! header row, hand each pre-split row to a family extractor, and drop the
//! row whenever the extractor declines it. Dropped rows are silent: not
//! logged, not counted, not an error. Only stream-level IO failures abort a
//! parse call.
//!
//! Columns are addressed by fixed 0-based index (see `constants`). The
//! `StringRecord::get` contract carries the presence distinction: an absent
//! column is `None` (drops the row for required fields) while a
//! present-but-empty column is `Some("")` (kept for string fields).

use csv::{ReaderBuilder, StringRecord};
use std::io::Read;

use crate::error::{AppError, Result};

/// Parse one CSV stream into records of one family
///
/// The extractor returns `None` to drop a row. Output preserves source row
/// order; family parsers re-sort afterwards where their contract says so.
pub fn parse_rows<R, T, F>(source: R, extract: F) -> Result<Vec<T>>
where
    R: Read,
    F: Fn(&StringRecord) -> Option<T>,
{
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) if err.is_io_error() => return Err(AppError::from(err)),
            // Row-level malformation (bad UTF-8, stray quote) costs that
            // row only.
            Err(_) => continue,
        };
        if let Some(row) = extract(&record) {
            rows.push(row);
        }
    }
    Ok(rows)
}

/// Required numeric field: `None` when absent or non-numeric (drops the row)
pub fn required_f64(record: &StringRecord, index: usize) -> Option<f64> {
    record.get(index)?.parse().ok()
}

/// Optional numeric field: 0.0 when absent or non-numeric
pub fn optional_f64(record: &StringRecord, index: usize) -> f64 {
    record
        .get(index)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(0.0)
}
