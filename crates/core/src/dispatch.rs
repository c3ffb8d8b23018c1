// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::action::{ActionKind, ActionRecord, ObjectKind};
use crate::transaction::Transaction;
use fos_zone_audit::{Category, Finding};
use fos_zone_domain::{
    DomainError, MemberEdit, MemberKind, NamePattern, ZoneType, classify_member,
    validate_zone_name,
};
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error, info};

/// Reported in place of a handler fault. The details go to the log.
const SOFTWARE_ERROR: &str = "Software error. Check the log for details";

/// What a single handler found wrong.
///
/// Handlers never fail outright for zoning rule violations; they describe
/// them here and carry on.
#[derive(Debug, Default)]
pub struct HandlerReport {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl HandlerReport {
    fn failed(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
            warnings: Vec::new(),
        }
    }

    fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    fn merge(&mut self, other: Self) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    const fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// A handler applied to one resolved object name.
type NamedHandler = fn(&mut Transaction, &ActionRecord, &str) -> HandlerReport;

/// Runs the handler for one record.
pub type Dispatcher = fn(&mut Transaction, &ActionRecord) -> HandlerReport;

/// Applies every record, in order, to the transaction.
///
/// A record that breaks a zoning rule, or whose handler faults, is reported
/// and the remaining records are still applied.
pub fn apply_records(txn: &mut Transaction, records: &[ActionRecord]) {
    apply_records_with(txn, records, dispatch);
}

/// Applies every record with `dispatcher` in place of the handler table.
pub fn apply_records_with(
    txn: &mut Transaction,
    records: &[ActionRecord],
    dispatcher: Dispatcher,
) {
    for record in records {
        apply_with(txn, record, dispatcher);
    }
}

/// Applies one record to the transaction, recording its findings.
pub fn apply_record(txn: &mut Transaction, record: &ActionRecord) {
    apply_with(txn, record, dispatch);
}

fn apply_with(txn: &mut Transaction, record: &ActionRecord, dispatcher: Dispatcher) {
    debug!(
        row = record.row,
        object = %record.object,
        action = %record.action,
        match_mode = %record.match_mode,
        name = %record.name,
        "dispatching action"
    );

    let rows: [usize; 1] = [record.row];
    match panic::catch_unwind(AssertUnwindSafe(|| dispatcher(txn, record))) {
        Ok(report) => {
            txn.findings.extend(
                report
                    .errors
                    .into_iter()
                    .map(|m| Finding::error(Category::Domain, m).with_rows(&rows)),
            );
            txn.findings.extend(
                report
                    .warnings
                    .into_iter()
                    .map(|m| Finding::warning(Category::Domain, m).with_rows(&rows)),
            );
        }
        Err(payload) => {
            let detail: String = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| String::from("unknown fault"));
            error!(
                row = record.row,
                object = %record.object,
                action = %record.action,
                name = %record.name,
                %detail,
                "action handler faulted"
            );
            txn.findings
                .push(Finding::error(Category::Software, SOFTWARE_ERROR).with_rows(&rows));
        }
    }
}

/// Selects the handler for a record.
pub fn dispatch(txn: &mut Transaction, r: &ActionRecord) -> HandlerReport {
    use ActionKind::{AddMember, Create, Delete, FullPurge, Ignore, Purge, RemoveMember};
    use ObjectKind::{Alias, PeerZone, Zone, ZoneConfig};

    if r.match_mode.is_pattern() && !r.action.accepts_pattern() {
        return HandlerReport::failed(format!(
            "Match type {} is not supported with action {}",
            r.match_mode, r.action
        ));
    }

    match (r.object, r.action) {
        (Alias, Create) => alias_create(txn, r),
        (Alias, AddMember) => alias_add_member(txn, r),
        (Alias, Delete) => fan_out(txn, r, alias_delete),
        (Alias, RemoveMember) => alias_remove_member(txn, r),
        (Alias, Purge) => fan_out(txn, r, alias_purge),
        (Alias, Ignore) => alias_ignore(txn, r),
        (Zone | PeerZone, Create) => zone_create(txn, r),
        (Zone | PeerZone, AddMember) => zone_add_member(txn, r),
        (Zone | PeerZone, Delete) => fan_out(txn, r, zone_delete),
        (Zone | PeerZone, RemoveMember) => zone_remove_member(txn, r),
        (Zone | PeerZone, Purge) => fan_out(txn, r, zone_purge),
        (Zone | PeerZone, FullPurge) => fan_out(txn, r, zone_full_purge),
        (ZoneConfig, Create) => config_create(txn, r),
        (ZoneConfig, AddMember) => config_add_member(txn, r),
        (ZoneConfig, Delete) => fan_out(txn, r, config_delete),
        (ZoneConfig, RemoveMember) => config_remove_member(txn, r),
        (object, action) => HandlerReport::failed(format!(
            "Action {action} is not supported for {object}"
        )),
    }
}

/// Names of the existing objects a pattern for `object` is matched against.
fn candidate_names(txn: &Transaction, object: ObjectKind) -> Vec<String> {
    match object {
        ObjectKind::Alias => txn.db.alias_names(),
        ObjectKind::Zone => txn.db.zone_names(),
        ObjectKind::PeerZone => txn
            .db
            .zones()
            .filter(|z| z.is_peer())
            .map(|z| z.name().to_string())
            .collect(),
        ObjectKind::ZoneConfig => txn.db.zone_config_names(),
    }
}

/// Resolves the record's `Name` and runs `handler` once per resolved name.
///
/// Patterns are matched against the names that exist when the record is
/// dispatched. Objects created while the handlers run are never matched.
fn fan_out(txn: &mut Transaction, r: &ActionRecord, handler: NamedHandler) -> HandlerReport {
    let names: Vec<String> = if r.match_mode.is_pattern() {
        let pattern: NamePattern = match NamePattern::new(&r.name, r.match_mode) {
            Ok(p) => p,
            Err(e) => return HandlerReport::failed(e.to_string()),
        };
        let snapshot: Vec<String> = candidate_names(txn, r.object);
        let matched: Vec<String> = pattern.select(snapshot.iter().map(String::as_str));
        info!(
            row = r.row,
            pattern = %r.name,
            match_mode = %r.match_mode,
            matches = matched.len(),
            "resolved name pattern"
        );
        matched
    } else {
        vec![r.name.clone()]
    };

    let mut report: HandlerReport = HandlerReport::default();
    for name in &names {
        report.merge(handler(txn, r, name));
    }
    report
}

/// Records the row against the object and flags the effective zone
/// configuration when the object is part of it.
fn track(txn: &mut Transaction, object: ObjectKind, name: &str, row: usize) {
    txn.tracking.record(object.tracked(), name, row);
    let effective: bool = match object {
        ObjectKind::Alias => txn.db.is_alias_effective(name),
        ObjectKind::Zone | ObjectKind::PeerZone => txn.db.is_zone_effective(name),
        ObjectKind::ZoneConfig => txn.db.effective_config() == Some(name),
    };
    if effective {
        txn.tracking.touch_effective();
    }
}

/// Keeps the members that are valid alias members, reporting the others.
fn valid_alias_members(members: &[String], alias: &str, report: &mut HandlerReport) -> Vec<String> {
    members
        .iter()
        .filter(|m| match classify_member(m) {
            Ok(MemberKind::Wwn | MemberKind::DomainIndex) => true,
            Ok(MemberKind::Name) => {
                report.error(format!(
                    "Invalid member {m} in alias {alias}. Alias members must be a WWN or d,i"
                ));
                false
            }
            Err(e) => {
                report.error(format!("{e} in alias {alias}"));
                false
            }
        })
        .cloned()
        .collect()
}

/// Reports zone members that are neither a WWN, a `d,i`, nor a usable alias name.
fn check_zone_members(members: &[String], zone: &str, report: &mut HandlerReport) {
    for member in members {
        let result: Result<(), DomainError> = match classify_member(member) {
            Ok(MemberKind::Name) => validate_zone_name(member),
            Ok(_) => Ok(()),
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            report.error(format!("{e} in zone {zone}"));
        }
    }
}

/// Reports zone configuration members that cannot be zone names.
fn check_config_members(members: &[String], config: &str, report: &mut HandlerReport) {
    for member in members {
        if let Err(e) = validate_zone_name(member) {
            report.error(format!("{e} in zone configuration {config}"));
        }
    }
}

// Aliases

fn alias_create(txn: &mut Transaction, r: &ActionRecord) -> HandlerReport {
    track(txn, ObjectKind::Alias, &r.name, r.row);
    if txn.db.alias(&r.name).is_some() {
        if r.is_continuation() {
            return alias_add_member(txn, r);
        }
        return HandlerReport::failed(format!("Alias {} already exists", r.name));
    }
    if txn.db.zone(&r.name).is_some() {
        return HandlerReport::failed(format!("{} is already used as a zone name", r.name));
    }

    let mut report: HandlerReport = HandlerReport::default();
    if !r.principal_members.is_empty() {
        report.error(format!(
            "Principal members are not supported for aliases. Alias {}",
            r.name
        ));
    }
    let members: Vec<String> = valid_alias_members(&r.members, &r.name, &mut report);
    if report.has_errors() {
        return report;
    }

    txn.db.add_alias(&r.name, &members);
    track(txn, ObjectKind::Alias, &r.name, r.row);
    info!(row = r.row, alias = %r.name, members = members.len(), "created alias");
    report
}

fn alias_add_member(txn: &mut Transaction, r: &ActionRecord) -> HandlerReport {
    track(txn, ObjectKind::Alias, &r.name, r.row);
    let mut report: HandlerReport = HandlerReport::default();
    if !r.principal_members.is_empty() {
        report.error(format!(
            "Principal members are not supported for aliases. Alias {}",
            r.name
        ));
    }
    if txn.db.alias(&r.name).is_none() {
        report.error(format!("Alias {} does not exist", r.name));
        return report;
    }

    for member in valid_alias_members(&r.members, &r.name, &mut report) {
        if txn.db.add_alias_member(&r.name, &member) == Some(MemberEdit::Unchanged) {
            report.warning(format!("{member} is already a member of alias {}", r.name));
        }
    }
    report
}

fn alias_delete(txn: &mut Transaction, r: &ActionRecord, name: &str) -> HandlerReport {
    track(txn, ObjectKind::Alias, name, r.row);
    let mut report: HandlerReport = HandlerReport::default();
    if txn.db.delete_alias(name).is_some() {
        info!(row = r.row, alias = name, "deleted alias");
    } else {
        report.warning(format!("Alias {name} does not exist. Nothing to delete"));
    }
    report
}

fn alias_remove_member(txn: &mut Transaction, r: &ActionRecord) -> HandlerReport {
    track(txn, ObjectKind::Alias, &r.name, r.row);
    let mut report: HandlerReport = HandlerReport::default();
    if !r.principal_members.is_empty() {
        report.error(format!(
            "Principal members are not supported for aliases. Alias {}",
            r.name
        ));
    }
    if txn.db.alias(&r.name).is_none() {
        report.error(format!("Alias {} does not exist", r.name));
        return report;
    }

    for member in &r.members {
        if txn.db.remove_alias_member(&r.name, member) == Some(MemberEdit::Unchanged) {
            report.warning(format!("{member} is not a member of alias {}", r.name));
        }
    }
    report
}

/// Removes an alias from every zone that uses it, then deletes it.
fn alias_purge(txn: &mut Transaction, r: &ActionRecord, name: &str) -> HandlerReport {
    track(txn, ObjectKind::Alias, name, r.row);
    if txn.db.alias(name).is_none() {
        return HandlerReport {
            errors: Vec::new(),
            warnings: vec![format!("Alias {name} does not exist. Nothing to purge")],
        };
    }

    for port in txn.db.ports_for_alias(name, &txn.logins) {
        txn.ledger.record_port(&port, name);
    }
    let zones: Vec<String> = txn.db.zones_using_alias(name);
    for zone in &zones {
        track(txn, ObjectKind::Zone, zone, r.row);
        txn.db.strip_zone_member(zone, name);
        txn.ledger.record_zone(zone, name);
    }
    txn.db.delete_alias(name);
    info!(row = r.row, alias = name, zones = zones.len(), "purged alias");
    HandlerReport::default()
}

/// Marks names to be disregarded when purge completion decides whether a
/// zone is empty.
fn alias_ignore(txn: &mut Transaction, r: &ActionRecord) -> HandlerReport {
    let mut names: Vec<String> = if r.match_mode.is_pattern() {
        let pattern: NamePattern = match NamePattern::new(&r.name, r.match_mode) {
            Ok(p) => p,
            Err(e) => return HandlerReport::failed(e.to_string()),
        };
        let mut snapshot: Vec<String> = txn.db.alias_names();
        snapshot.extend(txn.db.zones().flat_map(|z| z.all_members().cloned()));
        snapshot.sort();
        snapshot.dedup();
        pattern.select(snapshot.iter().map(String::as_str))
    } else {
        vec![r.name.clone()]
    };
    names.extend(r.members.iter().cloned());

    for name in &names {
        txn.ledger.ignore(name);
    }
    debug!(row = r.row, ignored = names.len(), "marked members ignored");
    HandlerReport::default()
}

// Zones

fn zone_create(txn: &mut Transaction, r: &ActionRecord) -> HandlerReport {
    let zone_type: ZoneType = r.object.zone_type().unwrap_or_default();
    track(txn, r.object, &r.name, r.row);
    if txn.db.zone(&r.name).is_some() {
        if r.is_continuation() {
            return zone_add_member(txn, r);
        }
        return HandlerReport::failed(format!("Zone {} already exists", r.name));
    }
    if txn.db.alias(&r.name).is_some() {
        return HandlerReport::failed(format!("{} is already used as an alias name", r.name));
    }
    if !zone_type.allows_principal_members() && !r.principal_members.is_empty() {
        return HandlerReport::failed(format!(
            "Principal members are only supported in peer zones. Zone {} is a standard zone",
            r.name
        ));
    }

    let mut report: HandlerReport = HandlerReport::default();
    check_zone_members(&r.principal_members, &r.name, &mut report);
    check_zone_members(&r.members, &r.name, &mut report);
    for member in r.principal_members.iter().filter(|p| r.members.contains(p)) {
        report.error(format!(
            "{member} cannot be both a member and a principal member of zone {}",
            r.name
        ));
    }
    if report.has_errors() {
        return report;
    }

    let rejected: Vec<(String, MemberEdit)> =
        txn.db
            .add_zone(&r.name, zone_type, &r.members, &r.principal_members);
    for (member, _) in rejected {
        report.warning(format!("{member} is listed more than once in zone {}", r.name));
    }
    track(txn, r.object, &r.name, r.row);
    info!(row = r.row, zone = %r.name, %zone_type, "created zone");
    report
}

fn zone_add_member(txn: &mut Transaction, r: &ActionRecord) -> HandlerReport {
    track(txn, r.object, &r.name, r.row);
    let Some(is_peer) = txn.db.zone(&r.name).map(fos_zone_domain::Zone::is_peer) else {
        return HandlerReport::failed(format!("Zone {} does not exist", r.name));
    };
    if r.object == ObjectKind::PeerZone && !is_peer {
        return HandlerReport::failed(format!("Zone {} is not a peer zone", r.name));
    }
    if !is_peer && !r.principal_members.is_empty() {
        return HandlerReport::failed(format!(
            "Principal members are only supported in peer zones. Zone {} is a standard zone",
            r.name
        ));
    }

    let mut report: HandlerReport = HandlerReport::default();
    check_zone_members(&r.principal_members, &r.name, &mut report);
    check_zone_members(&r.members, &r.name, &mut report);
    if report.has_errors() {
        return report;
    }

    for member in &r.principal_members {
        match txn.db.add_zone_principal_member(&r.name, member) {
            Some(MemberEdit::Unchanged) => report.warning(format!(
                "{member} is already a principal member of zone {}",
                r.name
            )),
            Some(MemberEdit::WrongList) => report.error(format!(
                "{member} is already a member of zone {} and cannot also be a principal member",
                r.name
            )),
            Some(MemberEdit::NotPeerZone) => report.error(format!(
                "Principal members are only supported in peer zones. Zone {} is a standard zone",
                r.name
            )),
            Some(MemberEdit::Applied) | None => {}
        }
    }
    for member in &r.members {
        match txn.db.add_zone_member(&r.name, member) {
            Some(MemberEdit::Unchanged) => {
                report.warning(format!("{member} is already a member of zone {}", r.name));
            }
            Some(MemberEdit::WrongList) => report.error(format!(
                "{member} is already a principal member of zone {} and cannot also be a member",
                r.name
            )),
            Some(MemberEdit::Applied | MemberEdit::NotPeerZone) | None => {}
        }
    }
    track(txn, r.object, &r.name, r.row);
    report
}

fn zone_delete(txn: &mut Transaction, r: &ActionRecord, name: &str) -> HandlerReport {
    track(txn, r.object, name, r.row);
    let mut report: HandlerReport = HandlerReport::default();
    if txn.db.delete_zone(name).is_some() {
        info!(row = r.row, zone = name, "deleted zone");
    } else {
        report.warning(format!("Zone {name} does not exist. Nothing to delete"));
    }
    report
}

fn zone_remove_member(txn: &mut Transaction, r: &ActionRecord) -> HandlerReport {
    track(txn, r.object, &r.name, r.row);
    let Some(is_peer) = txn.db.zone(&r.name).map(fos_zone_domain::Zone::is_peer) else {
        return HandlerReport::failed(format!("Zone {} does not exist", r.name));
    };
    if r.object == ObjectKind::PeerZone && !is_peer {
        return HandlerReport::failed(format!("Zone {} is not a peer zone", r.name));
    }
    if !is_peer && !r.principal_members.is_empty() {
        return HandlerReport::failed(format!(
            "Principal members are only supported in peer zones. Zone {} is a standard zone",
            r.name
        ));
    }

    let mut report: HandlerReport = HandlerReport::default();
    for member in &r.principal_members {
        match txn.db.remove_zone_principal_member(&r.name, member) {
            Some(MemberEdit::Unchanged) => report.warning(format!(
                "{member} is not a principal member of zone {}",
                r.name
            )),
            Some(MemberEdit::WrongList) => report.error(format!(
                "{member} is a member, not a principal member, of zone {}",
                r.name
            )),
            Some(MemberEdit::NotPeerZone) => report.error(format!(
                "Principal members are only supported in peer zones. Zone {} is a standard zone",
                r.name
            )),
            Some(MemberEdit::Applied) | None => {}
        }
    }
    for member in &r.members {
        match txn.db.remove_zone_member(&r.name, member) {
            Some(MemberEdit::Unchanged) => {
                report.warning(format!("{member} is not a member of zone {}", r.name));
            }
            Some(MemberEdit::WrongList) => report.error(format!(
                "{member} is a principal member, not a member, of zone {}",
                r.name
            )),
            Some(MemberEdit::Applied | MemberEdit::NotPeerZone) | None => {}
        }
    }
    report
}

/// Removes a zone from every zone configuration, then deletes it.
fn zone_purge(txn: &mut Transaction, r: &ActionRecord, name: &str) -> HandlerReport {
    track(txn, r.object, name, r.row);
    if txn.db.zone(name).is_none() {
        return HandlerReport {
            errors: Vec::new(),
            warnings: vec![format!("Zone {name} does not exist. Nothing to purge")],
        };
    }

    let configs: Vec<String> = txn.db.configs_using_zone(name);
    for config in &configs {
        track(txn, ObjectKind::ZoneConfig, config, r.row);
        txn.db.remove_config_member(config, name);
    }
    txn.db.delete_zone(name);
    info!(row = r.row, zone = name, configs = configs.len(), "purged zone");
    HandlerReport::default()
}

/// Purges every alias in the zone, then the zone itself.
fn zone_full_purge(txn: &mut Transaction, r: &ActionRecord, name: &str) -> HandlerReport {
    let Some(zone) = txn.db.zone(name) else {
        track(txn, r.object, name, r.row);
        return HandlerReport {
            errors: Vec::new(),
            warnings: vec![format!("Zone {name} does not exist. Nothing to purge")],
        };
    };
    let aliases: Vec<String> = zone
        .all_members()
        .filter(|m| txn.db.alias(m).is_some())
        .cloned()
        .collect();

    let mut report: HandlerReport = HandlerReport::default();
    for alias in &aliases {
        report.merge(alias_purge(txn, r, alias));
    }
    report.merge(zone_purge(txn, r, name));
    report
}

// Zone configurations

fn config_create(txn: &mut Transaction, r: &ActionRecord) -> HandlerReport {
    track(txn, ObjectKind::ZoneConfig, &r.name, r.row);
    if txn.db.zone_config(&r.name).is_some() {
        if r.is_continuation() {
            return config_add_member(txn, r);
        }
        return HandlerReport::failed(format!(
            "Zone configuration {} already exists",
            r.name
        ));
    }

    let mut report: HandlerReport = HandlerReport::default();
    if !r.principal_members.is_empty() {
        report.error(format!(
            "Principal members are not supported for zone configurations. Zone configuration {}",
            r.name
        ));
    }
    check_config_members(&r.members, &r.name, &mut report);
    if report.has_errors() {
        return report;
    }

    txn.db.add_zone_config(&r.name, &r.members);
    info!(row = r.row, config = %r.name, zones = r.members.len(), "created zone configuration");
    report
}

fn config_add_member(txn: &mut Transaction, r: &ActionRecord) -> HandlerReport {
    track(txn, ObjectKind::ZoneConfig, &r.name, r.row);
    let mut report: HandlerReport = HandlerReport::default();
    if !r.principal_members.is_empty() {
        report.error(format!(
            "Principal members are not supported for zone configurations. Zone configuration {}",
            r.name
        ));
    }
    if txn.db.zone_config(&r.name).is_none() {
        report.error(format!("Zone configuration {} does not exist", r.name));
        return report;
    }
    check_config_members(&r.members, &r.name, &mut report);
    if report.has_errors() {
        return report;
    }

    for member in &r.members {
        if txn.db.add_config_member(&r.name, member) == Some(MemberEdit::Unchanged) {
            report.warning(format!(
                "{member} is already a member of zone configuration {}",
                r.name
            ));
        }
    }
    report
}

fn config_delete(txn: &mut Transaction, r: &ActionRecord, name: &str) -> HandlerReport {
    track(txn, ObjectKind::ZoneConfig, name, r.row);
    let mut report: HandlerReport = HandlerReport::default();
    if txn.db.delete_zone_config(name).is_some() {
        info!(row = r.row, config = name, "deleted zone configuration");
    } else {
        report.warning(format!(
            "Zone configuration {name} does not exist. Nothing to delete"
        ));
    }
    report
}

fn config_remove_member(txn: &mut Transaction, r: &ActionRecord) -> HandlerReport {
    track(txn, ObjectKind::ZoneConfig, &r.name, r.row);
    let mut report: HandlerReport = HandlerReport::default();
    if !r.principal_members.is_empty() {
        report.error(format!(
            "Principal members are not supported for zone configurations. Zone configuration {}",
            r.name
        ));
    }
    if txn.db.zone_config(&r.name).is_none() {
        report.error(format!("Zone configuration {} does not exist", r.name));
        return report;
    }

    for member in &r.members {
        if txn.db.remove_config_member(&r.name, member) == Some(MemberEdit::Unchanged) {
            report.warning(format!(
                "{member} is not a member of zone configuration {}",
                r.name
            ));
        }
    }
    report
}
