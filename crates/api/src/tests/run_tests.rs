// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    CountingTransport, HOST2_WWN, SWITCH_WWN, create_test_snapshot, options, workbook,
};
use crate::{ApiError, ExitStatus, RunReport, run_workbook};
use fos_zone::{CommitOutcome, RunOptions, Transaction};
use fos_zone_audit::{Category, Finding};
use fos_zone_persistence::FabricSnapshot;

fn run(rows: &[&str], options: &RunOptions, transport: &mut CountingTransport) -> RunReport {
    run_workbook(&workbook(rows), create_test_snapshot(), options, transport).unwrap()
}

#[test]
fn test_activation_commits_and_builds_script() {
    let mut transport: CountingTransport = CountingTransport::default();
    let options: RunOptions = RunOptions {
        activate: Some(String::from("cfgA")),
        ..options()
    };

    let report: RunReport = run(
        &[
            &format!("alias,create,host2,,{HOST2_WWN},"),
            "zone,create,z_host2_stor1,,\"host2; stor1\",",
            "zone_cfg,add_mem,cfgA,,z_host2_stor1,",
        ],
        &options,
        &mut transport,
    );

    assert!(report.summary.errors.is_empty());
    assert_eq!(report.summary.records, 3);
    assert_eq!(
        report.summary.outcome,
        CommitOutcome::Committed {
            replaced: true,
            activated: Some(String::from("cfgA")),
        }
    );
    assert_eq!(report.summary.exit_status, ExitStatus::Success);
    assert_eq!(transport.requests, 2);
    assert_eq!(report.cli_script.commands().count(), 3);
    assert_eq!(report.cli_script.finish(), Some("cfgenable \"cfgA\" -f"));
    assert!(report.transaction.database().zone("z_host2_stor1").is_some());
}

#[test]
fn test_validation_errors_block_the_commit() {
    let mut transport: CountingTransport = CountingTransport::default();

    let report: RunReport = run(
        &["zone,create,z_bad,,missing_alias,"],
        &RunOptions {
            save: true,
            ..options()
        },
        &mut transport,
    );

    assert_eq!(report.summary.outcome, CommitOutcome::Blocked);
    assert_eq!(report.summary.exit_status, ExitStatus::InputError);
    assert_eq!(report.summary.exit_status.code(), 2);
    assert_eq!(transport.requests, 0);
    assert_eq!(report.summary.errors.len(), 1);
    assert_eq!(report.summary.errors[0].rows, vec![2]);
    assert!(
        report
            .summary
            .to_string()
            .contains("Alias missing_alias used in zone z_bad not found (row 2)")
    );
}

#[test]
fn test_device_rejection_is_a_device_error() {
    let mut transport: CountingTransport = CountingTransport {
        reject: true,
        ..CountingTransport::default()
    };

    let report: RunReport = run(
        &["alias,add_mem,stor1,,50:00:00:00:00:00:00:02,"],
        &RunOptions {
            save: true,
            ..options()
        },
        &mut transport,
    );

    assert!(report.summary.outcome.is_failed());
    assert_eq!(report.summary.exit_status, ExitStatus::DeviceError);
    assert_eq!(report.summary.exit_status.code(), 3);
    assert_eq!(
        report.summary.errors[0].message,
        "FOS error: zone database busy"
    );
}

#[test]
fn test_purge_reports_affected_ports_and_faults() {
    let mut transport: CountingTransport = CountingTransport::default();

    let report: RunReport = run(
        &["alias,purge,host1,,,"],
        &RunOptions {
            save: true,
            ..options()
        },
        &mut transport,
    );

    assert!(report.summary.errors.is_empty());
    assert_eq!(report.summary.exit_status, ExitStatus::Success);
    assert_eq!(report.summary.purge_faults.len(), 1);
    assert_eq!(report.summary.purge_faults[0].zone, "z_host1_stor1");
    assert_eq!(
        report.summary.purged_aliases["z_host1_stor1"],
        vec![String::from("host1")]
    );
    assert!(report.summary.effective_config_touched);
    assert_eq!(
        report.summary.affected_ports[SWITCH_WWN]["0/1"],
        vec![String::from("host1")]
    );

    let text: String = report.summary.to_string();
    assert!(text.contains("Purged aliases:\n  z_host1_stor1: host1"));
    assert!(text.contains("The effective zone configuration was modified"));
    assert!(text.contains("Affected ports:"));
    assert!(text.contains("0/1: host1"));
    assert!(text.contains("z_host1_stor1: stor1"));
}

#[test]
fn test_strict_mode_blocks_on_warnings() {
    let mut transport: CountingTransport = CountingTransport::default();

    let report: RunReport = run(
        &["alias,delete,not_there,,,"],
        &RunOptions {
            save: true,
            strict: true,
            ..options()
        },
        &mut transport,
    );

    assert_eq!(report.summary.warnings.len(), 1);
    assert_eq!(report.summary.outcome, CommitOutcome::Blocked);
    assert_eq!(report.summary.exit_status, ExitStatus::InputError);
    assert_eq!(transport.requests, 0);
}

#[test]
fn test_summary_json() {
    let mut transport: CountingTransport = CountingTransport::default();

    let report: RunReport = run(&["zone,create,z_bad,,missing_alias,"], &options(), &mut transport);
    let json: String = report.summary.to_json().unwrap();

    assert!(json.contains("\"exit_status\": \"input_error\""));
    assert!(json.contains("\"status\": \"blocked\""));
    assert!(json.contains("\"fid\": 128"));
}

#[test]
fn test_snapshot_for_another_fabric_is_rejected() {
    let mut transport: CountingTransport = CountingTransport::default();
    let result = run_workbook(
        &workbook(&["alias,delete,host1,,,"]),
        create_test_snapshot(),
        &RunOptions {
            fid: 10,
            ..RunOptions::default()
        },
        &mut transport,
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "fid"
    ));
    assert_eq!(transport.requests, 0);
}

#[test]
fn test_software_error_maps_to_exit_code_four() {
    let snapshot: FabricSnapshot = create_test_snapshot();
    let mut txn: Transaction = Transaction::new(snapshot.zoning, snapshot.logins);
    txn.record_findings([Finding::error(
        Category::Software,
        "Software error. Check the log for details",
    )
    .with_rows(&[2])]);

    let status: ExitStatus = ExitStatus::from_run(&txn, &CommitOutcome::Blocked);
    assert_eq!(status, ExitStatus::SoftwareError);
    assert_eq!(status.code(), 4);
}
