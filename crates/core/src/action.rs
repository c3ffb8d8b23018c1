// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use fos_zone_audit::TrackedObject;
use fos_zone_domain::{MatchMode, ZoneType};
use serde::Serialize;
use std::str::FromStr;

/// The zone object type named in a workbook `Zone_Object` cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// `alias`
    Alias,
    /// `zone`
    Zone,
    /// `peer_zone`
    PeerZone,
    /// `zone_cfg`
    ZoneConfig,
}

impl ObjectKind {
    /// Converts this object kind to its workbook token.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Alias => "alias",
            Self::Zone => "zone",
            Self::PeerZone => "peer_zone",
            Self::ZoneConfig => "zone_cfg",
        }
    }

    /// The tracking namespace rows of this kind are recorded under.
    #[must_use]
    pub const fn tracked(&self) -> TrackedObject {
        match self {
            Self::Alias => TrackedObject::Alias,
            Self::Zone | Self::PeerZone => TrackedObject::Zone,
            Self::ZoneConfig => TrackedObject::ZoneConfig,
        }
    }

    /// The zone type created by this kind, for zone kinds.
    #[must_use]
    pub const fn zone_type(&self) -> Option<ZoneType> {
        match self {
            Self::Zone => Some(ZoneType::Standard),
            Self::PeerZone => Some(ZoneType::Peer),
            Self::Alias | Self::ZoneConfig => None,
        }
    }
}

impl FromStr for ObjectKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "alias" => Ok(Self::Alias),
            "zone" => Ok(Self::Zone),
            "peer_zone" => Ok(Self::PeerZone),
            "zone_cfg" => Ok(Self::ZoneConfig),
            _ => Err(CoreError::UnknownToken {
                column: "Zone_Object",
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The verb named in a workbook `Action` cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// `create`
    Create,
    /// `delete`
    Delete,
    /// `add_mem`
    AddMember,
    /// `remove_mem`
    RemoveMember,
    /// `purge`
    Purge,
    /// `full_purge`
    FullPurge,
    /// `ignore`
    Ignore,
}

impl ActionKind {
    /// Converts this action to its workbook token.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Delete => "delete",
            Self::AddMember => "add_mem",
            Self::RemoveMember => "remove_mem",
            Self::Purge => "purge",
            Self::FullPurge => "full_purge",
            Self::Ignore => "ignore",
        }
    }

    /// Returns whether the action accepts a pattern in the `Name` cell.
    #[must_use]
    pub const fn accepts_pattern(&self) -> bool {
        matches!(
            self,
            Self::Delete | Self::Purge | Self::FullPurge | Self::Ignore
        )
    }
}

impl FromStr for ActionKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "create" => Ok(Self::Create),
            "delete" => Ok(Self::Delete),
            "add_mem" => Ok(Self::AddMember),
            "remove_mem" => Ok(Self::RemoveMember),
            "purge" => Ok(Self::Purge),
            "full_purge" => Ok(Self::FullPurge),
            "ignore" => Ok(Self::Ignore),
            _ => Err(CoreError::UnknownToken {
                column: "Action",
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One parsed workbook row.
///
/// Records are produced once by the parser and only read afterwards.
/// The `*_carried` flags say whether a field was inherited from an earlier
/// row instead of being written on this one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionRecord {
    /// 1-based workbook row. The header is row 1.
    pub row: usize,
    /// The zone object type.
    pub object: ObjectKind,
    /// The action verb.
    pub action: ActionKind,
    /// How `name` is compared with existing names.
    #[serde(serialize_with = "serialize_match_mode")]
    pub match_mode: MatchMode,
    /// Target object name, or a pattern.
    pub name: String,
    /// Members from the `Member` cell.
    pub members: Vec<String>,
    /// Members from the `Principal Member` cell.
    pub principal_members: Vec<String>,
    /// `Zone_Object` came from an earlier row.
    pub object_carried: bool,
    /// `Action` came from an earlier row.
    pub action_carried: bool,
    /// `Name` came from an earlier row.
    pub name_carried: bool,
}

impl ActionRecord {
    /// Returns whether this row only adds members to the action started
    /// on an earlier row.
    #[must_use]
    pub const fn is_continuation(&self) -> bool {
        self.name_carried
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_match_mode<S>(mode: &MatchMode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(mode.as_str())
}
