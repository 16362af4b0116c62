//! CSV ingestion for rota and activity tables.
//!
//! Headers are matched by name; unknown columns are ignored and missing
//! columns read as empty text. Short rows are padded with empty fields;
//! a row that still cannot be read is skipped with a warning.

use std::io::Read;

use csv::ReaderBuilder;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::activity::ActivityRow;
use super::shift::ShiftRow;
use crate::error::Result;

fn read_rows<T, R>(reader: R) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv.headers()?.clone();
    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for record in csv.records() {
        let mut record = record?;
        record.truncate(headers.len());
        while record.len() < headers.len() {
            record.push_field("");
        }
        match record.deserialize(Some(&headers)) {
            Ok(row) => rows.push(row),
            Err(err) => {
                skipped += 1;
                warn!(error = %err, "Skipping unreadable CSV row");
            }
        }
    }
    debug!(rows = rows.len(), skipped, "Read CSV table");
    Ok(rows)
}

/// Reads a staff rota table (`date, staff, shift_start, shift_end[, role]`).
///
/// # Errors
/// `CalendarError::Csv` if the input is not readable CSV.
pub fn read_shift_rows<R: Read>(reader: R) -> Result<Vec<ShiftRow>> {
    read_rows(reader)
}

/// Reads an activity table (`name, preferred_days, preferred_time, frequency, ..`).
///
/// # Errors
/// `CalendarError::Csv` if the input is not readable CSV.
pub fn read_activity_rows<R: Read>(reader: R) -> Result<Vec<ActivityRow>> {
    read_rows(reader)
}
