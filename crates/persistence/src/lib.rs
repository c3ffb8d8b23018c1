// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fabric snapshot storage.
//!
//! A snapshot is a JSON capture of one logical switch: its fabric ID, the
//! defined and effective zoning, and the name server logins. Runs start from
//! a snapshot, and [`SnapshotTransport`] commits back into one, standing in
//! for the switch when no live session is available.
//!
//! ```json
//! {
//!   "fid": 128,
//!   "zoning": {
//!     "aliases": { "host1": { "name": "host1", "members": ["10:00:00:00:00:00:00:01"] } },
//!     "zones": {},
//!     "zone_configs": {},
//!     "effective_config": null
//!   },
//!   "logins": [
//!     { "switch_wwn": "10:00:c4:f5:7c:00:00:01", "port": "0/1", "wwn": "10:00:00:00:00:00:00:01" }
//!   ]
//! }
//! ```

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod snapshot;
mod transport;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use snapshot::{FabricSnapshot, load_snapshot, parse_snapshot, save_snapshot};
pub use transport::SnapshotTransport;
