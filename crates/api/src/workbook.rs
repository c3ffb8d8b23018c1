// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV exports of the zoning workbook.
//!
//! The workbook's zoning sheet is exported as CSV with the header in the
//! first row. Cells are handed to the action parser as text; nothing here
//! interprets them.

use crate::error::ApiError;
use csv::StringRecord;
use fos_zone::WorkbookSheet;
use tracing::debug;

/// Byte order mark some spreadsheet tools prepend to CSV exports.
const BOM: char = '\u{feff}';

/// Line breaks inside quoted cells of a record.
fn embedded_newlines(record: &StringRecord) -> u64 {
    record
        .iter()
        .map(|field| field.bytes().filter(|b| *b == b'\n').count() as u64)
        .sum()
}

/// Reads a CSV export of the zoning sheet.
///
/// Rows may have fewer or more cells than the header; missing cells read as
/// blank. Blank lines are kept as empty rows so row numbers match the sheet.
///
/// # Errors
///
/// Returns `ApiError::InvalidCsvFormat` if the header or any row cannot be
/// read.
pub fn read_workbook_csv(csv_content: &str) -> Result<WorkbookSheet, ApiError> {
    let content: &str = csv_content.strip_prefix(BOM).unwrap_or(csv_content);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: StringRecord = reader
        .headers()
        .map_err(|e| ApiError::InvalidCsvFormat {
            reason: format!("Failed to read CSV headers: {e}"),
        })?
        .clone();

    let mut sheet: WorkbookSheet = WorkbookSheet {
        headers: headers.iter().map(str::to_string).collect(),
        rows: Vec::new(),
    };

    // The line a record starts on when no blank line precedes it.
    let mut next_line: u64 = 2 + embedded_newlines(&headers);
    for (idx, result) in reader.records().enumerate() {
        let record: StringRecord = result.map_err(|e| ApiError::InvalidCsvFormat {
            reason: format!("Failed to read CSV row {}: {e}", idx + 2),
        })?;
        // Blank lines produce no record; keep row numbers aligned with the sheet.
        if let Some(line) = record.position().map(csv::Position::line) {
            while next_line < line {
                sheet.rows.push(Vec::new());
                next_line += 1;
            }
            next_line = line + 1 + embedded_newlines(&record);
        }
        sheet.rows.push(record.iter().map(str::to_string).collect());
    }

    debug!(rows = sheet.rows.len(), "read workbook CSV");
    Ok(sheet)
}
