// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fos_zone::{RunOptions, TransportError, ZoneTransport};
use fos_zone_domain::{FabricZoningDatabase, Login, LoginTable, ZoneType};
use fos_zone_persistence::FabricSnapshot;

pub const HOST1_WWN: &str = "10:00:00:00:00:00:00:01";
pub const HOST2_WWN: &str = "10:00:00:00:00:00:00:02";
pub const STOR1_WWN: &str = "50:00:00:00:00:00:00:01";
pub const SWITCH_WWN: &str = "10:00:c4:f5:7c:00:00:01";

pub const HEADER: &str = "Zone_Object,Action,Name,Match,Member,Principal Member\n";

pub fn members(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

/// A workbook CSV with the standard header.
pub fn workbook(rows: &[&str]) -> String {
    let mut csv: String = String::from(HEADER);
    for row in rows {
        csv.push_str(row);
        csv.push('\n');
    }
    csv
}

/// One host zoned to one storage port in the effective `cfgA`.
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
    zoning.set_effective_config(Some("cfgA"));

    FabricSnapshot {
        fid: 128,
        zoning,
        logins: LoginTable::new(vec![Login {
            switch_wwn: String::from(SWITCH_WWN),
            port: String::from("0/1"),
            wwn: String::from(HOST1_WWN),
        }]),
    }
}

pub fn options() -> RunOptions {
    RunOptions {
        fid: 128,
        ..RunOptions::default()
    }
}

/// Counts device requests.
#[derive(Debug, Default)]
pub struct CountingTransport {
    pub requests: usize,
    pub reject: bool,
}

impl CountingTransport {
    fn request(&mut self) -> Result<(), TransportError> {
        self.requests += 1;
        if self.reject {
            return Err(TransportError::Rejected(String::from("zone database busy")));
        }
        Ok(())
    }
}

impl ZoneTransport for CountingTransport {
    fn login(&mut self) -> Result<(), TransportError> {
        Ok(())
    }

    fn logout(&mut self) -> Result<(), TransportError> {
        Ok(())
    }

    fn replace_zoning(
        &mut self,
        _db: &FabricZoningDatabase,
        _fid: u8,
    ) -> Result<(), TransportError> {
        self.request()
    }

    fn enable_zone_config(&mut self, _fid: u8, _name: &str) -> Result<(), TransportError> {
        self.request()
    }

    fn abort_pending_transaction(&mut self, _fid: u8) -> Result<(), TransportError> {
        Ok(())
    }
}
