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
    clippy::all
)]

use fos_zone_domain::PortRef;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// How serious a finding is.
///
/// Errors block the commit. Warnings only block it in strict mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Blocks the commit.
    Error,
    /// Reported, does not block the commit.
    Warning,
}

/// Where in the pipeline a finding was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// A malformed workbook row.
    Parse,
    /// A zoning rule was broken by an action.
    Domain,
    /// The final database failed a consistency check.
    Validation,
    /// An unexpected fault inside an action handler.
    Software,
    /// The switch rejected a request.
    Device,
}

/// A single error or warning, with the workbook rows it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Error or warning.
    pub severity: Severity,
    /// The stage that raised the finding.
    pub category: Category,
    /// 1-based workbook rows. Empty when the finding is not tied to a row.
    pub rows: Vec<usize>,
    /// Human readable description.
    pub message: String,
}

impl Finding {
    /// Creates an error finding.
    #[must_use]
    pub fn error(category: Category, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            category,
            rows: Vec::new(),
            message: message.into(),
        }
    }

    /// Creates a warning finding.
    #[must_use]
    pub fn warning(category: Category, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            category,
            rows: Vec::new(),
            message: message.into(),
        }
    }

    /// Attaches workbook rows to this finding.
    #[must_use]
    pub fn with_rows(mut self, rows: &[usize]) -> Self {
        self.rows = rows.to_vec();
        self
    }

    /// Returns whether this finding is an error.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if !self.rows.is_empty() {
            let rows: Vec<String> = self.rows.iter().map(ToString::to_string).collect();
            write!(f, " (row {})", rows.join(", "))?;
        }
        Ok(())
    }
}

/// The namespaces rows are tracked under. Peer zones are tracked as zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackedObject {
    /// An alias.
    Alias,
    /// A standard or peer zone.
    Zone,
    /// A zone configuration.
    ZoneConfig,
}

/// Which workbook rows touched which zone objects.
///
/// Purely diagnostic: consulted to attach row numbers to findings, never
/// to decide what an action does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrackingSet {
    alias: BTreeMap<String, Vec<usize>>,
    zone: BTreeMap<String, Vec<usize>>,
    zone_cfg: BTreeMap<String, Vec<usize>>,
    effective_touched: bool,
}

impl TrackingSet {
    /// Creates an empty tracking set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    const fn table(&self, object: TrackedObject) -> &BTreeMap<String, Vec<usize>> {
        match object {
            TrackedObject::Alias => &self.alias,
            TrackedObject::Zone => &self.zone,
            TrackedObject::ZoneConfig => &self.zone_cfg,
        }
    }

    /// Records that `row` touched the named object.
    pub fn record(&mut self, object: TrackedObject, name: &str, row: usize) {
        let table: &mut BTreeMap<String, Vec<usize>> = match object {
            TrackedObject::Alias => &mut self.alias,
            TrackedObject::Zone => &mut self.zone,
            TrackedObject::ZoneConfig => &mut self.zone_cfg,
        };
        let rows: &mut Vec<usize> = table.entry(name.to_string()).or_default();
        if !rows.contains(&row) {
            rows.push(row);
        }
    }

    /// Returns the rows that touched the named object.
    #[must_use]
    pub fn rows(&self, object: TrackedObject, name: &str) -> &[usize] {
        self.table(object).get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns whether any row touched the named object.
    #[must_use]
    pub fn is_tracked(&self, object: TrackedObject, name: &str) -> bool {
        self.table(object).contains_key(name)
    }

    /// Marks the effective zone configuration as touched.
    pub const fn touch_effective(&mut self) {
        self.effective_touched = true;
    }

    /// Returns whether any row touched the effective zone configuration.
    #[must_use]
    pub const fn is_effective_touched(&self) -> bool {
        self.effective_touched
    }
}

/// Impact of purge actions: which aliases left which zones and ports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PurgeLedger {
    by_zone: BTreeMap<String, Vec<String>>,
    by_port: BTreeMap<String, BTreeMap<String, Vec<String>>>,
    ignored: BTreeSet<String>,
}

impl PurgeLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `alias` was purged out of `zone`.
    pub fn record_zone(&mut self, zone: &str, alias: &str) {
        let aliases: &mut Vec<String> = self.by_zone.entry(zone.to_string()).or_default();
        if !aliases.iter().any(|a| a == alias) {
            aliases.push(alias.to_string());
        }
    }

    /// Records that purging `alias` affects `port`.
    pub fn record_port(&mut self, port: &PortRef, alias: &str) {
        let aliases: &mut Vec<String> = self
            .by_port
            .entry(port.switch_wwn.clone())
            .or_default()
            .entry(port.port.clone())
            .or_default();
        if !aliases.iter().any(|a| a == alias) {
            aliases.push(alias.to_string());
        }
    }

    /// Excludes `member` from the "zone is now empty" check of purge completion.
    pub fn ignore(&mut self, member: &str) {
        self.ignored.insert(member.to_string());
    }

    /// Returns whether `member` was marked ignored.
    #[must_use]
    pub fn is_ignored(&self, member: &str) -> bool {
        self.ignored.contains(member)
    }

    /// Names of every zone an alias was purged from.
    #[must_use]
    pub fn zones(&self) -> Vec<String> {
        self.by_zone.keys().cloned().collect()
    }

    /// Aliases purged from `zone`.
    #[must_use]
    pub fn purged_from(&self, zone: &str) -> &[String] {
        self.by_zone.get(zone).map(Vec::as_slice).unwrap_or_default()
    }

    /// Affected ports: switch WWN → port → purged aliases.
    #[must_use]
    pub const fn ports(&self) -> &BTreeMap<String, BTreeMap<String, Vec<String>>> {
        &self.by_port
    }
}

/// A zone whose purge could not complete because members remain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurgeFault {
    /// The zone that was left in place.
    pub zone: String,
    /// The members that kept it alive.
    pub remaining: Vec<String>,
}
