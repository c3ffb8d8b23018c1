// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::transaction::Transaction;
use fos_zone_audit::{Category, Finding, PurgeFault, TrackedObject};
use tracing::{info, warn};

/// Finishes the zones left behind by alias purges.
///
/// Each zone an alias was purged from is deleted, and dropped from every
/// zone configuration, once nothing but ignored members remains in it.
/// A zone that still holds other members is recorded as a purge fault and
/// reported as a warning; the rest of the transaction is unaffected.
pub fn complete_purges(txn: &mut Transaction) {
    for zone in txn.ledger.zones() {
        let Some(current) = txn.db.zone(&zone) else {
            continue;
        };
        let remaining: Vec<String> = current
            .all_members()
            .filter(|m| !txn.ledger.is_ignored(m))
            .cloned()
            .collect();
        let rows: Vec<usize> = txn.tracking.rows(TrackedObject::Zone, &zone).to_vec();

        if remaining.is_empty() {
            for config in txn.db.configs_using_zone(&zone) {
                if txn.db.effective_config() == Some(config.as_str()) {
                    txn.tracking.touch_effective();
                }
                txn.db.remove_config_member(&config, &zone);
            }
            txn.db.delete_zone(&zone);
            info!(zone = %zone, "deleted zone emptied by purge");
            continue;
        }

        warn!(zone = %zone, remaining = remaining.len(), "purge left members behind");
        txn.findings.push(
            Finding::warning(
                Category::Domain,
                format!(
                    "Zone {zone} was not purged. Remaining members: {}",
                    remaining.join(", ")
                ),
            )
            .with_rows(&rows),
        );
        txn.purge_faults.push(PurgeFault { zone, remaining });
    }
}
