// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Workbook rows to action records.
//!
//! The zoning workbook is written by people, so it leans on merged cells:
//! a blank `Zone_Object`, `Action`, or `Name` cell inherits the value of the
//! nearest row above that set it. Records remember which fields were
//! inherited so the dispatcher can tell an extra member line of a `create`
//! apart from a second, independent `create`.

use crate::action::{ActionKind, ActionRecord, ObjectKind};
use crate::error::CoreError;
use fos_zone_audit::{Category, Finding};
use fos_zone_domain::MatchMode;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::debug;

/// Required workbook columns, normalized.
const REQUIRED_COLUMNS: &[&str] = &[
    "zone_object",
    "action",
    "name",
    "match",
    "member",
    "principal_member",
];

/// Separator between members within a single cell.
const MEMBER_SEPARATOR: char = ';';

/// A worksheet as plain cell text: one header row and the data rows below it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkbookSheet {
    /// Header cells (spreadsheet row 1).
    pub headers: Vec<String>,
    /// Data rows, starting at spreadsheet row 2.
    pub rows: Vec<Vec<String>>,
}

/// A row that could not be turned into an action record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based workbook row.
    pub row: usize,
    /// What was wrong with it.
    pub error: CoreError,
}

impl ParseError {
    /// Converts this parse error to a reportable finding.
    #[must_use]
    pub fn to_finding(&self) -> Finding {
        Finding::error(Category::Parse, self.error.to_string()).with_rows(&[self.row])
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {}: {}", self.row, self.error)
    }
}

impl std::error::Error for ParseError {}

/// The result of parsing a worksheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedWorkbook {
    /// Action records in row order.
    pub records: Vec<ActionRecord>,
    /// Rows that were skipped because they could not be parsed.
    pub errors: Vec<ParseError>,
}

/// Values inherited by rows that leave a cell blank.
#[derive(Debug, Default)]
struct CarryState {
    object: Option<String>,
    action: Option<String>,
    name: Option<String>,
}

/// Normalizes a header cell for case and whitespace tolerant matching.
fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace([' ', '-'], "_")
}

/// Maps normalized column names to their positions.
fn validate_headers(headers: &[String]) -> Result<HashMap<String, usize>, CoreError> {
    let mut header_map: HashMap<String, usize> = HashMap::new();
    for (idx, header) in headers.iter().enumerate() {
        header_map.entry(normalize_header(header)).or_insert(idx);
    }

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !header_map.contains_key(**c))
        .map(|c| String::from(*c))
        .collect();

    if !missing.is_empty() {
        return Err(CoreError::MissingColumns(missing));
    }

    Ok(header_map)
}

/// Splits a member cell on `;`, dropping blanks.
#[must_use]
pub fn split_members(cell: Option<&str>) -> Vec<String> {
    cell.map(|c| {
        c.split(MEMBER_SEPARATOR)
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Resolves a cell against the carried value, updating the carried value
/// when the cell is set. Returns the value and whether it was inherited.
fn carry(cell: Option<String>, slot: &mut Option<String>) -> (Option<String>, bool) {
    match cell {
        Some(value) => {
            *slot = Some(value.clone());
            (Some(value), false)
        }
        None => (slot.clone(), true),
    }
}

/// Which of the carried columns were inherited on a row.
#[derive(Debug, Clone, Copy)]
struct Carried {
    object: bool,
    action: bool,
    name: bool,
}

/// Builds one record from the resolved `Zone_Object`, `Action`, and `Name`
/// values and the row's remaining cells.
fn build_record(
    row: usize,
    resolved: [Option<String>; 3],
    carried: Carried,
    get_field: &impl Fn(&str) -> Option<String>,
) -> Result<ActionRecord, CoreError> {
    let [object, action, name] = resolved;
    let object: ObjectKind = object
        .ok_or(CoreError::Unresolved {
            column: "Zone_Object",
        })?
        .parse()?;
    let action: ActionKind = action
        .ok_or(CoreError::Unresolved { column: "Action" })?
        .parse()?;
    let name: String = name.ok_or(CoreError::Unresolved { column: "Name" })?;
    let match_mode: MatchMode = MatchMode::from_str(&get_field("match").unwrap_or_default())?;

    Ok(ActionRecord {
        row,
        object,
        action,
        match_mode,
        name,
        members: split_members(get_field("member").as_deref()),
        principal_members: split_members(get_field("principal_member").as_deref()),
        object_carried: carried.object,
        action_carried: carried.action,
        name_carried: carried.name,
    })
}

/// Parses a worksheet into action records.
///
/// Row level problems are collected in [`ParsedWorkbook::errors`] and do not
/// stop the remaining rows from being parsed. Completely blank rows are
/// skipped.
///
/// # Errors
///
/// Returns `CoreError::MissingColumns` if the header row lacks any of
/// `Zone_Object`, `Action`, `Name`, `Match`, `Member`, `Principal Member`.
pub fn parse_workbook(sheet: &WorkbookSheet) -> Result<ParsedWorkbook, CoreError> {
    let header_map: HashMap<String, usize> = validate_headers(&sheet.headers)?;
    let mut parsed: ParsedWorkbook = ParsedWorkbook::default();
    let mut state: CarryState = CarryState::default();

    for (idx, cells) in sheet.rows.iter().enumerate() {
        let row: usize = idx + 2;

        let get_field = |name: &str| -> Option<String> {
            header_map
                .get(name)
                .and_then(|&i| cells.get(i))
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        if REQUIRED_COLUMNS.iter().all(|c| get_field(c).is_none()) {
            continue;
        }

        let (object, object_carried) = carry(get_field("zone_object"), &mut state.object);
        let (action, action_carried) = carry(get_field("action"), &mut state.action);
        let (name, name_carried) = carry(get_field("name"), &mut state.name);
        let carried: Carried = Carried {
            object: object_carried,
            action: action_carried,
            name: name_carried,
        };

        let record: Result<ActionRecord, CoreError> =
            build_record(row, [object, action, name], carried, &get_field);

        match record {
            Ok(record) => {
                debug!(
                    row,
                    object = %record.object,
                    action = %record.action,
                    name = %record.name,
                    continuation = record.is_continuation(),
                    "parsed workbook row"
                );
                parsed.records.push(record);
            }
            Err(error) => {
                debug!(row, %error, "skipping workbook row");
                parsed.errors.push(ParseError { row, error });
            }
        }
    }

    Ok(parsed)
}
