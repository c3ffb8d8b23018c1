// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// The kind of a zone.
///
/// Standard zones have a single member list. Peer zones split their
/// membership into principal members and (non-principal) members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ZoneType {
    /// A standard zone.
    #[default]
    Standard,
    /// A target driven peer zone.
    Peer,
}

impl ZoneType {
    /// Converts this zone type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Peer => "peer",
        }
    }

    /// Returns whether this zone type accepts principal members.
    #[must_use]
    pub const fn allows_principal_members(&self) -> bool {
        matches!(self, Self::Peer)
    }
}

impl std::fmt::Display for ZoneType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The outcome of a single membership edit on a zoning object.
///
/// Membership edits never fail. The caller decides whether an outcome
/// other than `Applied` is an error, a warning, or acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberEdit {
    /// The membership changed.
    Applied,
    /// The member was already present (add) or absent (remove).
    Unchanged,
    /// The member lives in the other list of a peer zone.
    WrongList,
    /// Principal members were addressed on a standard zone.
    NotPeerZone,
}

fn push_unique(list: &mut Vec<String>, member: &str) -> MemberEdit {
    if list.iter().any(|m| m == member) {
        return MemberEdit::Unchanged;
    }
    list.push(member.to_string());
    MemberEdit::Applied
}

fn remove_present(list: &mut Vec<String>, member: &str) -> MemberEdit {
    let before: usize = list.len();
    list.retain(|m| m != member);
    if list.len() == before {
        MemberEdit::Unchanged
    } else {
        MemberEdit::Applied
    }
}

/// A named set of WWNs or `domain,index` pairs used as zone member shorthand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    name: String,
    members: Vec<String>,
}

impl Alias {
    /// Creates a new alias with no members.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            members: Vec::new(),
        }
    }

    /// Returns the alias name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the alias members in insertion order.
    #[must_use]
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Returns whether `member` belongs to this alias.
    #[must_use]
    pub fn has_member(&self, member: &str) -> bool {
        self.members.iter().any(|m| m == member)
    }

    /// Adds a member, keeping the member list free of duplicates.
    pub fn add_member(&mut self, member: &str) -> MemberEdit {
        push_unique(&mut self.members, member)
    }

    /// Removes a member.
    pub fn remove_member(&mut self, member: &str) -> MemberEdit {
        remove_present(&mut self.members, member)
    }

    /// Returns whether the alias has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// A named access control group.
///
/// Principal members exist only on peer zones and never overlap the
/// member list. Both invariants are enforced by the mutators below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    name: String,
    #[serde(default)]
    zone_type: ZoneType,
    #[serde(default)]
    members: Vec<String>,
    #[serde(default)]
    principal_members: Vec<String>,
}

impl Zone {
    /// Creates a new zone with no members.
    #[must_use]
    pub fn new(name: &str, zone_type: ZoneType) -> Self {
        Self {
            name: name.to_string(),
            zone_type,
            members: Vec::new(),
            principal_members: Vec::new(),
        }
    }

    /// Returns the zone name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the zone type.
    #[must_use]
    pub const fn zone_type(&self) -> ZoneType {
        self.zone_type
    }

    /// Returns whether this is a peer zone.
    #[must_use]
    pub const fn is_peer(&self) -> bool {
        matches!(self.zone_type, ZoneType::Peer)
    }

    /// Returns the (non-principal) members in insertion order.
    #[must_use]
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Returns the principal members. Always empty for standard zones.
    #[must_use]
    pub fn principal_members(&self) -> &[String] {
        &self.principal_members
    }

    /// Iterates over principal members followed by members.
    pub fn all_members(&self) -> impl Iterator<Item = &String> {
        self.principal_members.iter().chain(self.members.iter())
    }

    /// Returns whether `member` appears in either member list.
    #[must_use]
    pub fn contains(&self, member: &str) -> bool {
        self.all_members().any(|m| m == member)
    }

    /// Adds a (non-principal) member.
    pub fn add_member(&mut self, member: &str) -> MemberEdit {
        if self.principal_members.iter().any(|m| m == member) {
            return MemberEdit::WrongList;
        }
        push_unique(&mut self.members, member)
    }

    /// Adds a principal member to a peer zone.
    pub fn add_principal_member(&mut self, member: &str) -> MemberEdit {
        if !self.is_peer() {
            return MemberEdit::NotPeerZone;
        }
        if self.members.iter().any(|m| m == member) {
            return MemberEdit::WrongList;
        }
        push_unique(&mut self.principal_members, member)
    }

    /// Removes a (non-principal) member.
    pub fn remove_member(&mut self, member: &str) -> MemberEdit {
        match remove_present(&mut self.members, member) {
            MemberEdit::Unchanged if self.principal_members.iter().any(|m| m == member) => {
                MemberEdit::WrongList
            }
            edit => edit,
        }
    }

    /// Removes a principal member from a peer zone.
    pub fn remove_principal_member(&mut self, member: &str) -> MemberEdit {
        if !self.is_peer() {
            return MemberEdit::NotPeerZone;
        }
        match remove_present(&mut self.principal_members, member) {
            MemberEdit::Unchanged if self.members.iter().any(|m| m == member) => {
                MemberEdit::WrongList
            }
            edit => edit,
        }
    }

    /// Removes `member` from whichever list holds it.
    pub fn remove_everywhere(&mut self, member: &str) -> MemberEdit {
        let principal: MemberEdit = remove_present(&mut self.principal_members, member);
        let plain: MemberEdit = remove_present(&mut self.members, member);
        if principal == MemberEdit::Applied || plain == MemberEdit::Applied {
            MemberEdit::Applied
        } else {
            MemberEdit::Unchanged
        }
    }

    /// Returns whether both member lists are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty() && self.principal_members.is_empty()
    }
}

/// A named, ordered set of zones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneConfig {
    name: String,
    members: Vec<String>,
}

impl ZoneConfig {
    /// Creates a new zone configuration with no member zones.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            members: Vec::new(),
        }
    }

    /// Returns the configuration name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the member zone names in insertion order.
    #[must_use]
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Returns whether `zone` is a member of this configuration.
    #[must_use]
    pub fn has_member(&self, zone: &str) -> bool {
        self.members.iter().any(|m| m == zone)
    }

    /// Adds a zone to the configuration.
    pub fn add_member(&mut self, zone: &str) -> MemberEdit {
        push_unique(&mut self.members, zone)
    }

    /// Removes a zone from the configuration.
    pub fn remove_member(&mut self, zone: &str) -> MemberEdit {
        remove_present(&mut self.members, zone)
    }

    /// Returns whether the configuration has no zones.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
