// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use fos_zone::{CommitOutcome, Transaction};
use fos_zone_audit::{Category, Finding, PurgeFault};
use serde::Serialize;
use std::collections::BTreeMap;

/// How a run ended, as reported to the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitStatus {
    /// No errors.
    Success,
    /// The workbook or the resulting zoning had errors.
    InputError,
    /// The switch rejected the commit.
    DeviceError,
    /// An action handler faulted.
    SoftwareError,
}

impl ExitStatus {
    /// The process exit code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::InputError => 2,
            Self::DeviceError => 3,
            Self::SoftwareError => 4,
        }
    }

    /// Picks the status for a finished transaction.
    #[must_use]
    pub fn from_run(txn: &Transaction, outcome: &CommitOutcome) -> Self {
        if outcome.is_failed() {
            return Self::DeviceError;
        }
        if txn
            .findings()
            .iter()
            .any(|f| f.category == Category::Software)
        {
            return Self::SoftwareError;
        }
        if txn.error_count() > 0 || *outcome == CommitOutcome::Blocked {
            return Self::InputError;
        }
        Self::Success
    }
}

/// The end of run report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// When the report was produced (ISO 8601, UTC).
    pub generated_at: String,
    /// Fabric ID of the logical switch.
    pub fid: u8,
    /// Number of action records applied.
    pub records: usize,
    /// Error findings, in the order raised.
    pub errors: Vec<Finding>,
    /// Warning findings, in the order raised.
    pub warnings: Vec<Finding>,
    /// Aliases purged out of each zone.
    pub purged_aliases: BTreeMap<String, Vec<String>>,
    /// Zones whose purge could not complete.
    pub purge_faults: Vec<PurgeFault>,
    /// Ports losing zoning: switch WWN → port → purged aliases.
    pub affected_ports: BTreeMap<String, BTreeMap<String, Vec<String>>>,
    /// A row touched the effective zone configuration.
    pub effective_config_touched: bool,
    /// What happened with the switch.
    pub outcome: CommitOutcome,
    /// The status the process exits with.
    pub exit_status: ExitStatus,
}

impl RunSummary {
    /// Summarizes a finished transaction.
    #[must_use]
    pub fn new(txn: &Transaction, fid: u8, records: usize, outcome: CommitOutcome) -> Self {
        let (errors, warnings): (Vec<Finding>, Vec<Finding>) =
            txn.findings().iter().cloned().partition(Finding::is_error);
        let purged_aliases: BTreeMap<String, Vec<String>> = txn
            .ledger()
            .zones()
            .into_iter()
            .map(|zone| {
                let aliases: Vec<String> = txn.ledger().purged_from(&zone).to_vec();
                (zone, aliases)
            })
            .collect();
        Self {
            generated_at: time::OffsetDateTime::now_utc()
                .format(&time::format_description::well_known::Iso8601::DEFAULT)
                .unwrap_or_else(|_| String::from("unknown")),
            fid,
            records,
            errors,
            warnings,
            purged_aliases,
            purge_faults: txn.purge_faults().to_vec(),
            affected_ports: txn.ledger().ports().clone(),
            effective_config_touched: txn.tracking().is_effective_touched(),
            exit_status: ExitStatus::from_run(txn, &outcome),
            outcome,
        }
    }

    /// Renders the summary as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` if serialization fails.
    pub fn to_json(&self) -> Result<String, ApiError> {
        serde_json::to_string_pretty(self).map_err(|e| ApiError::Internal {
            message: format!("Failed to serialize run summary: {e}"),
        })
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Zoning transaction summary (FID {})", self.fid)?;
        writeln!(f, "Records:  {}", self.records)?;

        writeln!(f, "Errors:   {}", self.errors.len())?;
        for finding in &self.errors {
            writeln!(f, "  {finding}")?;
        }
        writeln!(f, "Warnings: {}", self.warnings.len())?;
        for finding in &self.warnings {
            writeln!(f, "  {finding}")?;
        }

        if !self.purged_aliases.is_empty() {
            writeln!(f, "Purged aliases:")?;
            for (zone, aliases) in &self.purged_aliases {
                writeln!(f, "  {zone}: {}", aliases.join(", "))?;
            }
        }

        if !self.purge_faults.is_empty() {
            writeln!(f, "Purge faults:")?;
            for fault in &self.purge_faults {
                writeln!(f, "  {}: {}", fault.zone, fault.remaining.join(", "))?;
            }
        }

        if !self.affected_ports.is_empty() {
            writeln!(f, "Affected ports:")?;
            for (switch, ports) in &self.affected_ports {
                writeln!(f, "  Switch {switch}")?;
                for (port, aliases) in ports {
                    writeln!(f, "    {port}: {}", aliases.join(", "))?;
                }
            }
        }

        if self.effective_config_touched {
            writeln!(f, "The effective zone configuration was modified")?;
        }
        writeln!(f, "Outcome:  {}", self.outcome)
    }
}
