// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::logins::{LoginTable, PortRef};
use crate::types::{Alias, MemberEdit, Zone, ZoneConfig, ZoneType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The defined zoning database of one fabric.
///
/// Every mutator performs the requested structural edit and reports what
/// happened. None of them reject "already exists" or "not found"; deciding
/// whether that is an error belongs to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FabricZoningDatabase {
    #[serde(default)]
    aliases: BTreeMap<String, Alias>,
    #[serde(default)]
    zones: BTreeMap<String, Zone>,
    #[serde(default)]
    zone_configs: BTreeMap<String, ZoneConfig>,
    #[serde(default)]
    effective_config: Option<String>,
}

impl FabricZoningDatabase {
    /// Creates an empty zoning database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the name of the enabled zone configuration, if any.
    #[must_use]
    pub fn effective_config(&self) -> Option<&str> {
        self.effective_config.as_deref()
    }

    /// Records which zone configuration is enabled on the fabric.
    pub fn set_effective_config(&mut self, name: Option<&str>) {
        self.effective_config = name.map(str::to_string);
    }

    // Aliases

    /// Looks up an alias.
    #[must_use]
    pub fn alias(&self, name: &str) -> Option<&Alias> {
        self.aliases.get(name)
    }

    /// Iterates over all aliases in name order.
    pub fn aliases(&self) -> impl Iterator<Item = &Alias> {
        self.aliases.values()
    }

    /// Returns all alias names in name order.
    #[must_use]
    pub fn alias_names(&self) -> Vec<String> {
        self.aliases.keys().cloned().collect()
    }

    /// Creates an alias, or extends it if it already exists.
    pub fn add_alias(&mut self, name: &str, members: &[String]) {
        let alias: &mut Alias = self
            .aliases
            .entry(name.to_string())
            .or_insert_with(|| Alias::new(name));
        for member in members {
            alias.add_member(member);
        }
    }

    /// Deletes an alias, returning it if it existed.
    pub fn delete_alias(&mut self, name: &str) -> Option<Alias> {
        self.aliases.remove(name)
    }

    /// Adds a member to an alias. Returns `None` if the alias does not exist.
    pub fn add_alias_member(&mut self, name: &str, member: &str) -> Option<MemberEdit> {
        self.aliases.get_mut(name).map(|a| a.add_member(member))
    }

    /// Removes a member from an alias. Returns `None` if the alias does not exist.
    pub fn remove_alias_member(&mut self, name: &str, member: &str) -> Option<MemberEdit> {
        self.aliases.get_mut(name).map(|a| a.remove_member(member))
    }

    // Zones

    /// Looks up a zone.
    #[must_use]
    pub fn zone(&self, name: &str) -> Option<&Zone> {
        self.zones.get(name)
    }

    /// Iterates over all zones in name order.
    pub fn zones(&self) -> impl Iterator<Item = &Zone> {
        self.zones.values()
    }

    /// Returns all zone names in name order.
    #[must_use]
    pub fn zone_names(&self) -> Vec<String> {
        self.zones.keys().cloned().collect()
    }

    /// Creates a zone, or extends it if it already exists.
    ///
    /// Returns the membership edits that were not applied, paired with the
    /// member they refer to.
    pub fn add_zone(
        &mut self,
        name: &str,
        zone_type: ZoneType,
        members: &[String],
        principal_members: &[String],
    ) -> Vec<(String, MemberEdit)> {
        let zone: &mut Zone = self
            .zones
            .entry(name.to_string())
            .or_insert_with(|| Zone::new(name, zone_type));
        let mut rejected: Vec<(String, MemberEdit)> = Vec::new();
        for member in principal_members {
            let edit: MemberEdit = zone.add_principal_member(member);
            if edit != MemberEdit::Applied {
                rejected.push((member.clone(), edit));
            }
        }
        for member in members {
            let edit: MemberEdit = zone.add_member(member);
            if edit != MemberEdit::Applied {
                rejected.push((member.clone(), edit));
            }
        }
        rejected
    }

    /// Deletes a zone, returning it if it existed.
    pub fn delete_zone(&mut self, name: &str) -> Option<Zone> {
        self.zones.remove(name)
    }

    /// Adds a member to a zone. Returns `None` if the zone does not exist.
    pub fn add_zone_member(&mut self, name: &str, member: &str) -> Option<MemberEdit> {
        self.zones.get_mut(name).map(|z| z.add_member(member))
    }

    /// Adds a principal member to a zone. Returns `None` if the zone does not exist.
    pub fn add_zone_principal_member(&mut self, name: &str, member: &str) -> Option<MemberEdit> {
        self.zones.get_mut(name).map(|z| z.add_principal_member(member))
    }

    /// Removes a member from a zone. Returns `None` if the zone does not exist.
    pub fn remove_zone_member(&mut self, name: &str, member: &str) -> Option<MemberEdit> {
        self.zones.get_mut(name).map(|z| z.remove_member(member))
    }

    /// Removes a principal member from a zone. Returns `None` if the zone does not exist.
    pub fn remove_zone_principal_member(
        &mut self,
        name: &str,
        member: &str,
    ) -> Option<MemberEdit> {
        self.zones
            .get_mut(name)
            .map(|z| z.remove_principal_member(member))
    }

    /// Removes `member` from both member lists of a zone.
    pub fn strip_zone_member(&mut self, name: &str, member: &str) -> Option<MemberEdit> {
        self.zones.get_mut(name).map(|z| z.remove_everywhere(member))
    }

    // Zone configurations

    /// Looks up a zone configuration.
    #[must_use]
    pub fn zone_config(&self, name: &str) -> Option<&ZoneConfig> {
        self.zone_configs.get(name)
    }

    /// Iterates over all zone configurations in name order.
    pub fn zone_configs(&self) -> impl Iterator<Item = &ZoneConfig> {
        self.zone_configs.values()
    }

    /// Returns all zone configuration names in name order.
    #[must_use]
    pub fn zone_config_names(&self) -> Vec<String> {
        self.zone_configs.keys().cloned().collect()
    }

    /// Creates a zone configuration, or extends it if it already exists.
    pub fn add_zone_config(&mut self, name: &str, members: &[String]) {
        let config: &mut ZoneConfig = self
            .zone_configs
            .entry(name.to_string())
            .or_insert_with(|| ZoneConfig::new(name));
        for member in members {
            config.add_member(member);
        }
    }

    /// Deletes a zone configuration, returning it if it existed.
    pub fn delete_zone_config(&mut self, name: &str) -> Option<ZoneConfig> {
        self.zone_configs.remove(name)
    }

    /// Adds a zone to a configuration. Returns `None` if the configuration does not exist.
    pub fn add_config_member(&mut self, name: &str, zone: &str) -> Option<MemberEdit> {
        self.zone_configs.get_mut(name).map(|c| c.add_member(zone))
    }

    /// Removes a zone from a configuration. Returns `None` if the configuration does not exist.
    pub fn remove_config_member(&mut self, name: &str, zone: &str) -> Option<MemberEdit> {
        self.zone_configs
            .get_mut(name)
            .map(|c| c.remove_member(zone))
    }

    // Reverse lookups

    /// Names of every zone that lists `alias` as a member or principal member.
    #[must_use]
    pub fn zones_using_alias(&self, alias: &str) -> Vec<String> {
        self.zones
            .values()
            .filter(|z| z.contains(alias))
            .map(|z| z.name().to_string())
            .collect()
    }

    /// Names of every zone configuration that lists `zone`.
    #[must_use]
    pub fn configs_using_zone(&self, zone: &str) -> Vec<String> {
        self.zone_configs
            .values()
            .filter(|c| c.has_member(zone))
            .map(|c| c.name().to_string())
            .collect()
    }

    /// Ports whose name server logins resolve to a member of `alias`.
    #[must_use]
    pub fn ports_for_alias(&self, alias: &str, logins: &LoginTable) -> Vec<PortRef> {
        let mut ports: Vec<PortRef> = self
            .aliases
            .get(alias)
            .map(|a| {
                a.members()
                    .iter()
                    .flat_map(|m| logins.ports_for_wwn(m))
                    .collect()
            })
            .unwrap_or_default();
        ports.sort();
        ports.dedup();
        ports
    }

    /// Returns whether `zone` belongs to the effective configuration.
    #[must_use]
    pub fn is_zone_effective(&self, zone: &str) -> bool {
        self.effective_config
            .as_deref()
            .and_then(|name| self.zone_configs.get(name))
            .is_some_and(|c| c.has_member(zone))
    }

    /// Returns whether `alias` is used by a zone of the effective configuration.
    #[must_use]
    pub fn is_alias_effective(&self, alias: &str) -> bool {
        self.zones
            .values()
            .any(|z| z.contains(alias) && self.is_zone_effective(z.name()))
    }
}
