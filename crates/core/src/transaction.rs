// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fos_zone_audit::{Finding, PurgeFault, PurgeLedger, TrackingSet};
use fos_zone_domain::{FabricZoningDatabase, LoginTable};

/// Caller choices that steer validation and the commit decision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Fabric ID of the logical switch being edited.
    pub fid: u8,
    /// Zone configuration to enable after the edits are applied.
    pub activate: Option<String>,
    /// Save the defined configuration even without activation.
    pub save: bool,
    /// Treat warnings as errors when deciding whether to commit.
    pub strict: bool,
    /// Never contact the switch.
    pub test: bool,
}

impl RunOptions {
    /// Returns whether the caller asked for the edits to reach the switch.
    #[must_use]
    pub const fn requests_commit(&self) -> bool {
        self.save || self.activate.is_some()
    }
}

/// One zoning transaction.
///
/// Owns the working copy of the zoning database together with the load time
/// baseline, the diagnostic side tables, and every finding raised so far.
/// Nothing here is shared between transactions.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub(crate) db: FabricZoningDatabase,
    pub(crate) baseline: FabricZoningDatabase,
    pub(crate) logins: LoginTable,
    pub(crate) tracking: TrackingSet,
    pub(crate) ledger: PurgeLedger,
    pub(crate) findings: Vec<Finding>,
    pub(crate) purge_faults: Vec<PurgeFault>,
}

impl Transaction {
    /// Starts a transaction against a freshly loaded zoning database.
    #[must_use]
    pub fn new(db: FabricZoningDatabase, logins: LoginTable) -> Self {
        Self {
            baseline: db.clone(),
            db,
            logins,
            tracking: TrackingSet::new(),
            ledger: PurgeLedger::new(),
            findings: Vec::new(),
            purge_faults: Vec::new(),
        }
    }

    /// The working copy, with every applied edit.
    #[must_use]
    pub const fn database(&self) -> &FabricZoningDatabase {
        &self.db
    }

    /// The zoning database as it was loaded.
    #[must_use]
    pub const fn baseline(&self) -> &FabricZoningDatabase {
        &self.baseline
    }

    /// The name server logins used for port impact.
    #[must_use]
    pub const fn logins(&self) -> &LoginTable {
        &self.logins
    }

    /// Rows recorded against each zone object.
    #[must_use]
    pub const fn tracking(&self) -> &TrackingSet {
        &self.tracking
    }

    /// Purge impact recorded so far.
    #[must_use]
    pub const fn ledger(&self) -> &PurgeLedger {
        &self.ledger
    }

    /// Every error and warning raised so far, in the order raised.
    #[must_use]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Zones whose purge could not complete.
    #[must_use]
    pub fn purge_faults(&self) -> &[PurgeFault] {
        &self.purge_faults
    }

    /// Appends findings raised outside the engine, such as parse errors.
    pub fn record_findings<I>(&mut self, findings: I)
    where
        I: IntoIterator<Item = Finding>,
    {
        self.findings.extend(findings);
    }

    /// Number of error findings.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.findings.iter().filter(|f| f.is_error()).count()
    }

    /// Number of warning findings.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.findings.iter().filter(|f| !f.is_error()).count()
    }

    /// Returns whether the working copy differs from the baseline.
    #[must_use]
    pub fn has_pending_changes(&self) -> bool {
        self.db != self.baseline
    }
}
