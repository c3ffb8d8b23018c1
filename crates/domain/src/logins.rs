// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// A switch port, identified by the switch WWN and the port address.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PortRef {
    /// WWN of the switch the port belongs to.
    pub switch_wwn: String,
    /// Port in `slot/port` form.
    pub port: String,
}

/// One fabric name server login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Login {
    /// WWN of the switch where the device logged in.
    pub switch_wwn: String,
    /// Port in `slot/port` form.
    pub port: String,
    /// WWPN of the logged in device.
    pub wwn: String,
}

/// Read-only view of the fabric name server.
///
/// Used by alias purges to report which switch ports lose zoning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoginTable {
    logins: Vec<Login>,
}

impl LoginTable {
    /// Creates a login table from captured logins.
    #[must_use]
    pub const fn new(logins: Vec<Login>) -> Self {
        Self { logins }
    }

    /// Returns every login.
    #[must_use]
    pub fn logins(&self) -> &[Login] {
        &self.logins
    }

    /// Returns the ports where `wwn` is logged in. WWNs compare case insensitively.
    #[must_use]
    pub fn ports_for_wwn(&self, wwn: &str) -> Vec<PortRef> {
        self.logins
            .iter()
            .filter(|l| l.wwn.eq_ignore_ascii_case(wwn))
            .map(|l| PortRef {
                switch_wwn: l.switch_wwn.clone(),
                port: l.port.clone(),
            })
            .collect()
    }
}
