// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Whole-run entry points.

use crate::cli_script::{CliScript, build_cli_script};
use crate::error::ApiError;
use crate::summary::RunSummary;
use crate::workbook::read_workbook_csv;
use fos_zone::{
    ActionRecord, CommitOutcome, ParseError, ParsedWorkbook, RunOptions, Transaction,
    WorkbookSheet, ZoneTransport, commit, parse_workbook, process,
};
use fos_zone_audit::Finding;
use fos_zone_persistence::FabricSnapshot;
use serde::Serialize;
use tracing::info;

/// The parsed form of a workbook, without applying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    /// Action records in row order.
    pub records: Vec<ActionRecord>,
    /// Rows that could not be parsed.
    pub findings: Vec<Finding>,
}

impl std::fmt::Display for ScanReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{:>5}  {:<10} {:<11} {:<8} {:<32} {}",
            "Row", "Object", "Action", "Match", "Name", "Members"
        )?;
        for r in &self.records {
            let mut members: String = r.members.join("; ");
            if !r.principal_members.is_empty() {
                members = format!("principal: {} | {members}", r.principal_members.join("; "));
            }
            let name: String = if r.is_continuation() {
                format!("{} (cont.)", r.name)
            } else {
                r.name.clone()
            };
            writeln!(
                f,
                "{:>5}  {:<10} {:<11} {:<8} {:<32} {members}",
                r.row, r.object, r.action, r.match_mode, name
            )?;
        }
        for finding in &self.findings {
            writeln!(f, "{finding}")?;
        }
        Ok(())
    }
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// The finished transaction.
    pub transaction: Transaction,
    /// The end of run report.
    pub summary: RunSummary,
    /// FOS CLI commands equivalent to the changes.
    pub cli_script: CliScript,
}

fn parse(csv_content: &str) -> Result<ParsedWorkbook, ApiError> {
    let sheet: WorkbookSheet = read_workbook_csv(csv_content)?;
    let parsed: ParsedWorkbook = parse_workbook(&sheet)?;
    info!(
        records = parsed.records.len(),
        parse_errors = parsed.errors.len(),
        "parsed workbook"
    );
    Ok(parsed)
}

/// Parses a workbook and reports its action records without applying them.
///
/// # Errors
///
/// Returns an error if the CSV cannot be read or lacks required columns.
pub fn scan_workbook(csv_content: &str) -> Result<ScanReport, ApiError> {
    let parsed: ParsedWorkbook = parse(csv_content)?;
    Ok(ScanReport {
        findings: parsed.errors.iter().map(ParseError::to_finding).collect(),
        records: parsed.records,
    })
}

/// Applies a workbook to a fabric snapshot and commits the result.
///
/// Row errors, zoning rule violations, validation failures, and device
/// errors are all reported in the summary; none of them is an `Err`.
///
/// # Arguments
///
/// * `csv_content` - CSV export of the zoning sheet
/// * `snapshot` - The fabric as captured before the run
/// * `options` - Fabric ID, activation, save, strict, and test choices
/// * `transport` - Where the commit is sent
///
/// # Errors
///
/// Returns an error if the CSV cannot be read, lacks required columns, or
/// the snapshot is for a different fabric ID.
pub fn run_workbook(
    csv_content: &str,
    snapshot: FabricSnapshot,
    options: &RunOptions,
    transport: &mut dyn ZoneTransport,
) -> Result<RunReport, ApiError> {
    if snapshot.fid != options.fid {
        return Err(ApiError::InvalidInput {
            field: String::from("fid"),
            message: format!(
                "the snapshot is for FID {}, not FID {}",
                snapshot.fid, options.fid
            ),
        });
    }

    let parsed: ParsedWorkbook = parse(csv_content)?;
    let mut txn: Transaction = Transaction::new(snapshot.zoning, snapshot.logins);
    txn.record_findings(parsed.errors.iter().map(ParseError::to_finding));

    process(&mut txn, &parsed.records, options);
    let outcome: CommitOutcome = commit(&mut txn, options, transport);

    let cli_script: CliScript = build_cli_script(
        txn.baseline(),
        txn.database(),
        options.activate.as_deref(),
    );
    let summary: RunSummary = RunSummary::new(&txn, options.fid, parsed.records.len(), outcome);
    info!(
        errors = summary.errors.len(),
        warnings = summary.warnings.len(),
        status = ?summary.exit_status,
        "run complete"
    );

    Ok(RunReport {
        transaction: txn,
        summary,
        cli_script,
    })
}
