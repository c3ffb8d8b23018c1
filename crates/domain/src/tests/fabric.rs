// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{FabricZoningDatabase, Login, LoginTable, MemberEdit, PortRef, ZoneType};

const HOST_WWN: &str = "10:00:00:00:00:00:00:01";

fn members(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

fn create_test_database() -> FabricZoningDatabase {
    let mut db: FabricZoningDatabase = FabricZoningDatabase::new();
    db.add_alias("host1", &members(&[HOST_WWN]));
    db.add_alias("stor1", &members(&["20:00:00:00:00:00:00:01"]));
    db.add_zone(
        "z_host1_stor1",
        ZoneType::Standard,
        &members(&["host1", "stor1"]),
        &[],
    );
    db.add_zone("z_other", ZoneType::Standard, &members(&["stor1"]), &[]);
    db.add_zone_config("cfgA", &members(&["z_host1_stor1"]));
    db.set_effective_config(Some("cfgA"));
    db
}

#[test]
fn test_add_alias_twice_extends_members() {
    let mut db: FabricZoningDatabase = create_test_database();
    db.add_alias("host1", &members(&["1,1"]));
    assert_eq!(db.alias("host1").unwrap().members().len(), 2);
}

#[test]
fn test_mutators_report_missing_objects() {
    let mut db: FabricZoningDatabase = create_test_database();
    assert_eq!(db.add_alias_member("nope", "1,1"), None);
    assert_eq!(db.remove_zone_member("nope", "host1"), None);
    assert_eq!(db.add_config_member("nope", "z1"), None);
    assert!(db.delete_zone_config("nope").is_none());
}

#[test]
fn test_add_zone_reports_rejected_members() {
    let mut db: FabricZoningDatabase = FabricZoningDatabase::new();
    let rejected = db.add_zone(
        "z1",
        ZoneType::Standard,
        &members(&["host1"]),
        &members(&["stor1"]),
    );
    assert_eq!(rejected, vec![(String::from("stor1"), MemberEdit::NotPeerZone)]);
    assert_eq!(db.zone("z1").unwrap().members().len(), 1);
}

#[test]
fn test_reverse_lookups() {
    let db: FabricZoningDatabase = create_test_database();
    assert_eq!(db.zones_using_alias("stor1"), vec!["z_host1_stor1", "z_other"]);
    assert_eq!(db.configs_using_zone("z_host1_stor1"), vec!["cfgA"]);
    assert!(db.configs_using_zone("z_other").is_empty());
}

#[test]
fn test_effective_membership() {
    let db: FabricZoningDatabase = create_test_database();
    assert!(db.is_zone_effective("z_host1_stor1"));
    assert!(!db.is_zone_effective("z_other"));
    assert!(db.is_alias_effective("host1"));
    assert!(db.is_alias_effective("stor1"));
}

#[test]
fn test_ports_for_alias_uses_logins() {
    let db: FabricZoningDatabase = create_test_database();
    let logins: LoginTable = LoginTable::new(vec![
        Login {
            switch_wwn: String::from("10:00:c4:f5:7c:00:00:01"),
            port: String::from("0/4"),
            wwn: HOST_WWN.to_uppercase(),
        },
        Login {
            switch_wwn: String::from("10:00:c4:f5:7c:00:00:01"),
            port: String::from("0/9"),
            wwn: String::from("30:00:00:00:00:00:00:01"),
        },
    ]);
    let ports: Vec<PortRef> = db.ports_for_alias("host1", &logins);
    assert_eq!(ports.len(), 1);
    assert_eq!(ports[0].port, "0/4");
    assert!(db.ports_for_alias("missing", &logins).is_empty());
}
