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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod fabric;
mod logins;
mod matching;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use fabric::FabricZoningDatabase;
pub use logins::{Login, LoginTable, PortRef};
pub use matching::{MatchMode, NamePattern};
pub use types::{Alias, MemberEdit, Zone, ZoneConfig, ZoneType};
pub use validation::{
    MAX_NAME_LEN, MemberKind, classify_member, is_valid_domain_index, is_valid_wwn,
    validate_zone_name,
};
