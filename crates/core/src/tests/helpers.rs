// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ActionKind, ActionRecord, ObjectKind, RunOptions, Transaction, TransportError,
    WorkbookSheet, ZoneTransport,
};
use fos_zone_domain::{FabricZoningDatabase, Login, LoginTable, MatchMode, ZoneType};

pub const HOST1_WWN: &str = "10:00:00:00:00:00:00:01";
pub const HOST2_WWN: &str = "10:00:00:00:00:00:00:02";
pub const STOR1_WWN: &str = "50:00:00:00:00:00:00:01";
pub const SWITCH1_WWN: &str = "10:00:c4:f5:7c:00:00:01";
pub const SWITCH2_WWN: &str = "10:00:c4:f5:7c:00:00:02";

pub const HEADERS: [&str; 6] = [
    "Zone_Object",
    "Action",
    "Name",
    "Match",
    "Member",
    "Principal Member",
];

pub fn members(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

/// An exact-match record written out in full on its own row.
pub fn record(
    row: usize,
    object: ObjectKind,
    action: ActionKind,
    name: &str,
    values: &[&str],
) -> ActionRecord {
    ActionRecord {
        row,
        object,
        action,
        match_mode: MatchMode::Exact,
        name: name.to_string(),
        members: members(values),
        principal_members: Vec::new(),
        object_carried: false,
        action_carried: false,
        name_carried: false,
    }
}

pub fn pattern_record(
    row: usize,
    object: ObjectKind,
    action: ActionKind,
    match_mode: MatchMode,
    pattern: &str,
) -> ActionRecord {
    ActionRecord {
        match_mode,
        ..record(row, object, action, pattern, &[])
    }
}

pub fn sheet(rows: &[[&str; 6]]) -> WorkbookSheet {
    WorkbookSheet {
        headers: members(&HEADERS),
        rows: rows.iter().map(|r| members(r)).collect(),
    }
}

/// Two hosts zoned to one storage port, both zones in the effective `cfgA`.
pub fn create_test_database() -> FabricZoningDatabase {
    let mut db: FabricZoningDatabase = FabricZoningDatabase::new();
    db.add_alias("host1", &members(&[HOST1_WWN]));
    db.add_alias("host2", &members(&[HOST2_WWN]));
    db.add_alias("stor1", &members(&[STOR1_WWN]));
    db.add_zone(
        "z_host1_stor1",
        ZoneType::Standard,
        &members(&["host1", "stor1"]),
        &[],
    );
    db.add_zone(
        "z_host2_stor1",
        ZoneType::Standard,
        &members(&["host2", "stor1"]),
        &[],
    );
    db.add_zone_config("cfgA", &members(&["z_host1_stor1", "z_host2_stor1"]));
    db.set_effective_config(Some("cfgA"));
    db
}

pub fn create_test_logins() -> LoginTable {
    LoginTable::new(vec![
        Login {
            switch_wwn: String::from(SWITCH1_WWN),
            port: String::from("0/1"),
            wwn: String::from(HOST1_WWN),
        },
        Login {
            switch_wwn: String::from(SWITCH2_WWN),
            port: String::from("1/3"),
            wwn: String::from(HOST2_WWN),
        },
        Login {
            switch_wwn: String::from(SWITCH1_WWN),
            port: String::from("0/5"),
            wwn: String::from(STOR1_WWN),
        },
    ])
}

pub fn create_test_transaction() -> Transaction {
    Transaction::new(create_test_database(), create_test_logins())
}

pub fn save_options() -> RunOptions {
    RunOptions {
        fid: 128,
        save: true,
        ..RunOptions::default()
    }
}

pub fn error_messages(txn: &Transaction) -> Vec<String> {
    txn.findings()
        .iter()
        .filter(|f| f.is_error())
        .map(|f| f.message.clone())
        .collect()
}

pub fn warning_messages(txn: &Transaction) -> Vec<String> {
    txn.findings()
        .iter()
        .filter(|f| !f.is_error())
        .map(|f| f.message.clone())
        .collect()
}

/// A transport that records every call and can be told to fail one of them.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub calls: Vec<String>,
    pub fail_on: Option<&'static str>,
}

impl RecordingTransport {
    pub fn failing_on(call: &'static str) -> Self {
        Self {
            calls: Vec::new(),
            fail_on: Some(call),
        }
    }

    fn call(&mut self, name: &'static str, detail: String) -> Result<(), TransportError> {
        self.calls.push(detail);
        if self.fail_on == Some(name) {
            return Err(TransportError::Rejected(format!("{name} rejected")));
        }
        Ok(())
    }
}

impl ZoneTransport for RecordingTransport {
    fn login(&mut self) -> Result<(), TransportError> {
        self.call("login", String::from("login"))
    }

    fn logout(&mut self) -> Result<(), TransportError> {
        self.call("logout", String::from("logout"))
    }

    fn replace_zoning(
        &mut self,
        db: &FabricZoningDatabase,
        fid: u8,
    ) -> Result<(), TransportError> {
        self.call(
            "replace",
            format!("replace {fid} zones={}", db.zone_names().len()),
        )
    }

    fn enable_zone_config(&mut self, fid: u8, name: &str) -> Result<(), TransportError> {
        self.call("enable", format!("enable {fid} {name}"))
    }

    fn abort_pending_transaction(&mut self, fid: u8) -> Result<(), TransportError> {
        self.call("abort", format!("abort {fid}"))
    }
}
