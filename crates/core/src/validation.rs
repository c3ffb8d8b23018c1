// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Consistency checks over the final zoning database.
//!
//! Validation never mutates the transaction. Every rule runs and every
//! violation is reported; nothing stops at the first failure.

use crate::transaction::{RunOptions, Transaction};
use fos_zone_audit::{Category, Finding, TrackedObject};
use fos_zone_domain::{FabricZoningDatabase, MemberKind, classify_member, validate_zone_name};
use tracing::debug;

/// What the effective configuration enforces, in list order.
#[derive(Debug, PartialEq, Eq)]
struct EffectiveFootprint {
    zones: Vec<String>,
    zone_members: Vec<(Vec<String>, Vec<String>)>,
    alias_members: Vec<Vec<String>>,
}

/// Builds the footprint of `config` in `db`, or `None` when the
/// configuration does not exist.
fn effective_footprint(db: &FabricZoningDatabase, config: &str) -> Option<EffectiveFootprint> {
    let cfg = db.zone_config(config)?;
    let mut footprint: EffectiveFootprint = EffectiveFootprint {
        zones: cfg.members().to_vec(),
        zone_members: Vec::new(),
        alias_members: Vec::new(),
    };

    for zone_name in cfg.members() {
        let Some(zone) = db.zone(zone_name) else {
            footprint.zone_members.push((Vec::new(), Vec::new()));
            continue;
        };
        footprint
            .zone_members
            .push((zone.members().to_vec(), zone.principal_members().to_vec()));
        footprint.alias_members.extend(
            zone.all_members()
                .filter_map(|m| db.alias(m))
                .map(|a| a.members().to_vec()),
        );
    }

    Some(footprint)
}

fn tracked_rows(txn: &Transaction, object: TrackedObject, name: &str) -> Vec<usize> {
    txn.tracking.rows(object, name).to_vec()
}

fn validation_error(message: String, rows: &[usize]) -> Finding {
    Finding::error(Category::Validation, message).with_rows(rows)
}

/// Every zone listed by a configuration must exist.
fn check_config_references(txn: &Transaction, findings: &mut Vec<Finding>) {
    for config in txn.db.zone_configs() {
        for zone in config.members() {
            if txn.db.zone(zone).is_none() {
                findings.push(validation_error(
                    format!(
                        "Zone {zone} used in zone configuration {} not found",
                        config.name()
                    ),
                    &tracked_rows(txn, TrackedObject::ZoneConfig, config.name()),
                ));
            }
        }
    }
}

/// Every zone member must be a WWN, a `d,i`, or an existing alias.
fn check_zone_references(txn: &Transaction, findings: &mut Vec<Finding>) {
    for zone in txn.db.zones() {
        for member in zone.all_members() {
            let message: Option<String> = match classify_member(member) {
                Ok(MemberKind::Name) if txn.db.alias(member).is_none() => Some(format!(
                    "Alias {member} used in zone {} not found",
                    zone.name()
                )),
                Ok(_) => None,
                Err(e) => Some(format!("{e} in zone {}", zone.name())),
            };
            if let Some(message) = message {
                findings.push(validation_error(
                    message,
                    &tracked_rows(txn, TrackedObject::Zone, zone.name()),
                ));
            }
        }
    }
}

/// Changes to the effective configuration must be activated or saved, and
/// the effective configuration may only disappear when another one is
/// activated. The footprint is only compared when a row touched the
/// effective configuration.
fn check_effective_config(txn: &Transaction, options: &RunOptions, findings: &mut Vec<Finding>) {
    let Some(effective) = txn.baseline.effective_config() else {
        return;
    };
    let rows: Vec<usize> = tracked_rows(txn, TrackedObject::ZoneConfig, effective);

    if txn.db.zone_config(effective).is_none() {
        let replaced: bool = options
            .activate
            .as_deref()
            .is_some_and(|name| name != effective);
        if !replaced {
            findings.push(validation_error(
                format!(
                    "The effective zone configuration {effective} cannot be deleted unless another zone configuration is activated"
                ),
                &rows,
            ));
        }
        return;
    }

    if options.requests_commit() || !txn.tracking.is_effective_touched() {
        return;
    }

    let before: Option<EffectiveFootprint> = effective_footprint(&txn.baseline, effective);
    let after: Option<EffectiveFootprint> = effective_footprint(&txn.db, effective);
    if before != after {
        debug!(config = effective, "effective zoning footprint changed");
        findings.push(validation_error(
            format!(
                "Changes to zone configuration {effective} would create a mismatch between defined and effective zoning. Activate or save {effective}"
            ),
            &rows,
        ));
    }
}

/// Objects introduced by the transaction must carry valid names.
fn check_new_names(txn: &Transaction, findings: &mut Vec<Finding>) {
    let new_aliases = txn
        .db
        .alias_names()
        .into_iter()
        .filter(|n| txn.baseline.alias(n).is_none())
        .map(|n| (TrackedObject::Alias, n));
    let new_zones = txn
        .db
        .zone_names()
        .into_iter()
        .filter(|n| txn.baseline.zone(n).is_none())
        .map(|n| (TrackedObject::Zone, n));
    let new_configs = txn
        .db
        .zone_config_names()
        .into_iter()
        .filter(|n| txn.baseline.zone_config(n).is_none())
        .map(|n| (TrackedObject::ZoneConfig, n));

    for (object, name) in new_aliases.chain(new_zones).chain(new_configs) {
        if let Err(e) = validate_zone_name(&name) {
            findings.push(validation_error(
                e.to_string(),
                &tracked_rows(txn, object, &name),
            ));
        }
    }
}

/// Objects touched by the transaction may not be left empty.
fn check_empty_objects(txn: &Transaction, findings: &mut Vec<Finding>) {
    for alias in txn.db.aliases() {
        if alias.is_empty() && txn.tracking.is_tracked(TrackedObject::Alias, alias.name()) {
            findings.push(validation_error(
                format!("Alias {} has no members", alias.name()),
                &tracked_rows(txn, TrackedObject::Alias, alias.name()),
            ));
        }
    }
    for zone in txn.db.zones() {
        if zone.is_empty() && txn.tracking.is_tracked(TrackedObject::Zone, zone.name()) {
            findings.push(validation_error(
                format!("Zone {} has no members", zone.name()),
                &tracked_rows(txn, TrackedObject::Zone, zone.name()),
            ));
        }
    }
    for config in txn.db.zone_configs() {
        if config.is_empty() && txn.tracking.is_tracked(TrackedObject::ZoneConfig, config.name())
        {
            findings.push(validation_error(
                format!("Zone configuration {} has no zones", config.name()),
                &tracked_rows(txn, TrackedObject::ZoneConfig, config.name()),
            ));
        }
    }
}

/// A configuration to activate must exist.
fn check_activation_target(txn: &Transaction, options: &RunOptions, findings: &mut Vec<Finding>) {
    let Some(name) = options.activate.as_deref() else {
        return;
    };
    if txn.db.zone_config(name).is_none() {
        findings.push(validation_error(
            format!("Zone configuration {name} cannot be activated because it does not exist"),
            &tracked_rows(txn, TrackedObject::ZoneConfig, name),
        ));
    }
}

/// Checks the final zoning database and returns every violation found.
///
/// The rules, all of which always run:
///
/// 1. Zones listed by a zone configuration exist.
/// 2. Zone members are WWNs, `d,i` pairs, or existing aliases.
/// 3. The effective configuration is unchanged unless the run activates or
///    saves, and is only deleted when another configuration is activated.
/// 4. Newly introduced objects have valid names.
/// 5. Objects touched by the run are not left empty.
/// 6. A configuration to activate exists.
#[must_use]
pub fn validate(txn: &Transaction, options: &RunOptions) -> Vec<Finding> {
    let mut findings: Vec<Finding> = Vec::new();
    check_config_references(txn, &mut findings);
    check_zone_references(txn, &mut findings);
    check_effective_config(txn, options, &mut findings);
    check_new_names(txn, &mut findings);
    check_empty_objects(txn, &mut findings);
    check_activation_target(txn, options, &mut findings);
    debug!(errors = findings.len(), "validation complete");
    findings
}
