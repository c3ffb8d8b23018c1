// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod action;
mod commit;
mod dispatch;
mod error;
mod parser;
mod purge;
mod transaction;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use action::{ActionKind, ActionRecord, ObjectKind};
pub use commit::{CommitOutcome, CommitPlan, TransportError, ZoneTransport, commit, plan_commit};
pub use dispatch::{apply_record, apply_records};
pub use error::CoreError;
pub use parser::{ParseError, ParsedWorkbook, WorkbookSheet, parse_workbook, split_members};
pub use purge::complete_purges;
pub use transaction::{RunOptions, Transaction};
pub use validation::validate;

/// Runs every stage of a transaction short of the commit.
///
/// Applies the records in order, completes pending purges, and records the
/// validator's findings on the transaction.
///
/// # Arguments
///
/// * `txn` - The transaction to edit
/// * `records` - Parsed workbook rows, in row order
/// * `options` - Activation and save choices, which affect validation
pub fn process(txn: &mut Transaction, records: &[ActionRecord], options: &RunOptions) {
    apply_records(txn, records);
    complete_purges(txn);
    let findings = validate(txn, options);
    txn.record_findings(findings);
}
