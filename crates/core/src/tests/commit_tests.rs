// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    RecordingTransport, create_test_transaction, record, save_options,
};
use crate::{
    ActionKind, CommitOutcome, CommitPlan, ObjectKind, RunOptions, Transaction, commit,
    plan_commit, process,
};
use fos_zone_audit::{Category, Finding};

fn activate(config: &str) -> RunOptions {
    RunOptions {
        fid: 128,
        activate: Some(config.to_string()),
        ..RunOptions::default()
    }
}

/// A transaction with one valid pending edit outside the effective zoning.
fn pending_transaction(options: &RunOptions) -> Transaction {
    let mut txn: Transaction = create_test_transaction();
    process(
        &mut txn,
        &[record(2, ObjectKind::Alias, ActionKind::Create, "host9", &["1,9"])],
        options,
    );
    txn
}

#[test]
fn test_errors_block_every_device_call() {
    let options: RunOptions = activate("cfgA");
    let mut txn: Transaction = create_test_transaction();
    process(
        &mut txn,
        &[
            record(2, ObjectKind::Alias, ActionKind::Delete, "host2", &[]),
            record(3, ObjectKind::Alias, ActionKind::Create, "host9", &["1,9"]),
            record(4, ObjectKind::Zone, ActionKind::Create, "z_host9", &["host9", "stor1"]),
        ],
        &options,
    );
    assert!(txn.error_count() > 0);

    let mut transport: RecordingTransport = RecordingTransport::default();
    let outcome: CommitOutcome = commit(&mut txn, &options, &mut transport);

    assert_eq!(outcome, CommitOutcome::Blocked);
    assert!(transport.calls.is_empty());
}

#[test]
fn test_strict_mode_blocks_on_warnings() {
    let options: RunOptions = RunOptions {
        strict: true,
        ..save_options()
    };
    let mut txn: Transaction = create_test_transaction();
    process(
        &mut txn,
        &[
            record(2, ObjectKind::Alias, ActionKind::Create, "host9", &["1,9"]),
            record(3, ObjectKind::Alias, ActionKind::Delete, "nope", &[]),
        ],
        &options,
    );
    assert_eq!(txn.error_count(), 0);
    assert!(matches!(
        plan_commit(&txn, &options),
        CommitPlan::Blocked {
            errors: 0,
            warnings: 1
        }
    ));

    let mut transport: RecordingTransport = RecordingTransport::default();
    assert_eq!(
        commit(&mut txn, &options, &mut transport),
        CommitOutcome::Blocked
    );
    assert!(transport.calls.is_empty());
}

#[test]
fn test_test_mode_never_contacts_the_switch() {
    let options: RunOptions = RunOptions {
        test: true,
        ..save_options()
    };
    let mut txn: Transaction = pending_transaction(&options);
    let mut transport: RecordingTransport = RecordingTransport::default();

    assert_eq!(
        commit(&mut txn, &options, &mut transport),
        CommitOutcome::DryRun
    );
    assert!(transport.calls.is_empty());
}

#[test]
fn test_nothing_requested_is_a_dry_run() {
    let options: RunOptions = RunOptions::default();
    let mut txn: Transaction = pending_transaction(&options);
    assert_eq!(plan_commit(&txn, &options), CommitPlan::DryRun);

    let mut transport: RecordingTransport = RecordingTransport::default();
    assert_eq!(
        commit(&mut txn, &options, &mut transport),
        CommitOutcome::DryRun
    );
    assert!(transport.calls.is_empty());
}

#[test]
fn test_save_replaces_the_zoning_database_once() {
    let options: RunOptions = save_options();
    let mut txn: Transaction = pending_transaction(&options);
    let mut transport: RecordingTransport = RecordingTransport::default();

    let outcome: CommitOutcome = commit(&mut txn, &options, &mut transport);

    assert_eq!(
        outcome,
        CommitOutcome::Committed {
            replaced: true,
            activated: None
        }
    );
    assert_eq!(transport.calls, vec!["login", "replace 128 zones=2", "logout"]);
}

#[test]
fn test_activate_with_changes_replaces_then_enables() {
    let options: RunOptions = activate("cfgA");
    let mut txn: Transaction = pending_transaction(&options);
    let mut transport: RecordingTransport = RecordingTransport::default();

    let outcome: CommitOutcome = commit(&mut txn, &options, &mut transport);

    assert_eq!(
        outcome,
        CommitOutcome::Committed {
            replaced: true,
            activated: Some(String::from("cfgA"))
        }
    );
    assert_eq!(
        transport.calls,
        vec!["login", "replace 128 zones=2", "enable 128 cfgA", "logout"]
    );
}

#[test]
fn test_activate_without_changes_only_enables() {
    let options: RunOptions = activate("cfgA");
    let mut txn: Transaction = create_test_transaction();
    process(&mut txn, &[], &options);
    assert_eq!(
        plan_commit(&txn, &options),
        CommitPlan::Enable {
            config: String::from("cfgA")
        }
    );

    let mut transport: RecordingTransport = RecordingTransport::default();
    commit(&mut txn, &options, &mut transport);
    assert_eq!(transport.calls, vec!["login", "enable 128 cfgA", "logout"]);
}

#[test]
fn test_failed_enable_aborts_and_reports() {
    let options: RunOptions = activate("cfgA");
    let mut txn: Transaction = create_test_transaction();
    process(&mut txn, &[], &options);
    let mut transport: RecordingTransport = RecordingTransport::failing_on("enable");

    let outcome: CommitOutcome = commit(&mut txn, &options, &mut transport);

    assert!(outcome.is_failed());
    assert_eq!(
        transport.calls,
        vec!["login", "enable 128 cfgA", "abort 128", "logout"]
    );
    assert_eq!(txn.error_count(), 1);
    assert_eq!(txn.findings()[0].category, Category::Device);
    assert_eq!(txn.findings()[0].message, "FOS error: enable rejected");
}

#[test]
fn test_failed_replace_never_enables() {
    let options: RunOptions = activate("cfgA");
    let mut txn: Transaction = pending_transaction(&options);
    let mut transport: RecordingTransport = RecordingTransport::failing_on("replace");

    let outcome: CommitOutcome = commit(&mut txn, &options, &mut transport);

    assert_eq!(
        outcome,
        CommitOutcome::Failed {
            message: String::from("FOS error: replace rejected")
        }
    );
    assert_eq!(
        transport.calls,
        vec!["login", "replace 128 zones=2", "abort 128", "logout"]
    );
    assert!(txn.database().alias("host9").is_some());
}

#[test]
fn test_failed_login_sends_nothing_else() {
    let options: RunOptions = save_options();
    let mut txn: Transaction = pending_transaction(&options);
    let mut transport: RecordingTransport = RecordingTransport::failing_on("login");

    assert!(commit(&mut txn, &options, &mut transport).is_failed());
    assert_eq!(transport.calls, vec!["login"]);
}

#[test]
fn test_software_error_blocks_the_commit() {
    let options: RunOptions = save_options();
    let mut txn: Transaction = pending_transaction(&options);
    txn.record_findings([Finding::error(
        Category::Software,
        "Software error. Check the log for details",
    )
    .with_rows(&[3])]);

    assert_eq!(
        plan_commit(&txn, &options),
        CommitPlan::Blocked {
            errors: 1,
            warnings: 0,
        }
    );

    let mut transport: RecordingTransport = RecordingTransport::default();
    assert_eq!(
        commit(&mut txn, &options, &mut transport),
        CommitOutcome::Blocked
    );
    assert!(transport.calls.is_empty());
}
