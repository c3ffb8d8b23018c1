// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{HEADER, HOST1_WWN, members, workbook};
use crate::{ApiError, read_workbook_csv, scan_workbook};
use fos_zone::{ActionKind, WorkbookSheet};

#[test]
fn test_reads_header_and_rows() {
    let sheet: WorkbookSheet = read_workbook_csv(&workbook(&[
        "alias,create,host1,,10:00:00:00:00:00:00:01,",
        ",,,,10:00:00:00:00:00:00:02,",
    ]))
    .unwrap();

    assert_eq!(sheet.headers.len(), 6);
    assert_eq!(sheet.headers[5], "Principal Member");
    assert_eq!(sheet.rows.len(), 2);
    assert_eq!(sheet.rows[1][4], "10:00:00:00:00:00:00:02");
}

#[test]
fn test_byte_order_mark_is_ignored() {
    let csv: String = format!("\u{feff}{HEADER}alias,delete,host1,,,\n");
    let sheet: WorkbookSheet = read_workbook_csv(&csv).unwrap();
    assert_eq!(sheet.headers[0], "Zone_Object");
}

#[test]
fn test_quoted_member_cells() {
    let sheet: WorkbookSheet = read_workbook_csv(&workbook(&[
        "zone,create,z1,,\"host1; stor1\",",
    ]))
    .unwrap();
    assert_eq!(sheet.rows[0][4], "host1; stor1");
}

#[test]
fn test_short_rows_are_accepted() {
    let report = scan_workbook(&workbook(&["alias,delete,host1"])).unwrap();
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].action, ActionKind::Delete);
    assert!(report.records[0].members.is_empty());
}

#[test]
fn test_blank_lines_keep_row_numbers() {
    let report = scan_workbook(&workbook(&[
        "alias,delete,a1,,,",
        "",
        "alias,delete,a2,,,",
    ]))
    .unwrap();
    assert_eq!(report.records.len(), 2);
    assert_eq!(report.records[1].row, 4);
}

#[test]
fn test_scan_reports_unparsable_rows() {
    let report = scan_workbook(&workbook(&[
        &format!("alias,create,host9,,{HOST1_WWN},"),
        "fabric,create,x,,,",
    ]))
    .unwrap();
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].members, members(&[HOST1_WWN]));
    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.findings[0].rows, vec![3]);
    assert!(report.to_string().contains("host9"));
}

#[test]
fn test_missing_columns_are_an_invalid_workbook() {
    let result = scan_workbook("Zone_Object,Action,Name\nalias,delete,a1\n");
    assert!(matches!(result, Err(ApiError::InvalidWorkbook { .. })));
}

#[test]
fn test_multi_line_cells_keep_row_numbers() {
    let report = scan_workbook(&workbook(&[
        "alias,create,a1,,\"10:00:00:00:00:00:00:01;\n10:00:00:00:00:00:00:02\",",
        "alias,delete,a2,,,",
        "",
        "alias,delete,a3,,,",
    ]))
    .unwrap();

    assert_eq!(report.records.len(), 3);
    assert_eq!(report.records[0].members.len(), 2);
    assert_eq!(report.records[1].name, "a2");
    assert_eq!(report.records[1].row, 3);
    assert_eq!(report.records[2].row, 5);
}
