// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use crate::FabricSnapshot;
use camino_tempfile::Utf8TempDir;
use fos_zone_domain::{FabricZoningDatabase, Login, LoginTable, ZoneType};
use std::path::PathBuf;

pub const HOST1_WWN: &str = "10:00:00:00:00:00:00:01";
pub const STOR1_WWN: &str = "50:00:00:00:00:00:00:01";

pub fn members(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

/// A fresh temporary directory and the snapshot path inside it. The
/// directory is removed when the returned handle is dropped.
pub fn temp_snapshot_path() -> (Utf8TempDir, PathBuf) {
    let dir: Utf8TempDir = Utf8TempDir::new().unwrap();
    let path: PathBuf = dir.path().join("fabric.json").into_std_path_buf();
    (dir, path)
}

pub fn create_test_snapshot() -> FabricSnapshot {
    let mut zoning: FabricZoningDatabase = FabricZoningDatabase::new();
    zoning.add_alias("host1", &members(&[HOST1_WWN]));
    zoning.add_alias("stor1", &members(&[STOR1_WWN]));
    zoning.add_zone(
        "z_host1_stor1",
        ZoneType::Standard,
        &members(&["host1", "stor1"]),
        &[],
    );
    zoning.add_zone_config("cfgA", &members(&["z_host1_stor1"]));
    zoning.add_zone_config("cfgB", &members(&["z_host1_stor1"]));
    zoning.set_effective_config(Some("cfgA"));

    FabricSnapshot {
        fid: 128,
        zoning,
        logins: LoginTable::new(vec![Login {
            switch_wwn: String::from("10:00:c4:f5:7c:00:00:01"),
            port: String::from("0/1"),
            wwn: String::from(HOST1_WWN),
        }]),
    }
}
