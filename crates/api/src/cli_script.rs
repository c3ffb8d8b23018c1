// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! FOS CLI equivalent of a transaction.
//!
//! The script is derived from the difference between the zoning database as
//! loaded and as left by the transaction, not from the workbook rows, so it
//! is the same whichever actions produced the change. Commands are grouped
//! by phase and every phase is split into blocks small enough to paste into
//! a switch session.

use fos_zone_domain::{FabricZoningDatabase, Zone};
use serde::Serialize;

/// Largest number of commands in one block.
pub const BLOCK_SIZE: usize = 20;

/// The stages of a CLI script, in the order they must run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// `cfgdelete`
    DeleteConfigs,
    /// `cfgremove`
    RemoveConfigMembers,
    /// `zonedelete`
    DeleteZones,
    /// `zoneremove`
    RemoveZoneMembers,
    /// `alidelete`
    DeleteAliases,
    /// `aliremove`
    RemoveAliasMembers,
    /// `alicreate`
    CreateAliases,
    /// `aliadd`
    AddAliasMembers,
    /// `zonecreate`
    CreateZones,
    /// `zoneadd`
    AddZoneMembers,
    /// `cfgcreate`
    CreateConfigs,
    /// `cfgadd`
    AddConfigMembers,
}

impl Phase {
    /// Every phase, in execution order.
    pub const ALL: [Self; 12] = [
        Self::DeleteConfigs,
        Self::RemoveConfigMembers,
        Self::DeleteZones,
        Self::RemoveZoneMembers,
        Self::DeleteAliases,
        Self::RemoveAliasMembers,
        Self::CreateAliases,
        Self::AddAliasMembers,
        Self::CreateZones,
        Self::AddZoneMembers,
        Self::CreateConfigs,
        Self::AddConfigMembers,
    ];
}

/// A block of commands from one phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandBlock {
    /// The phase the commands belong to.
    pub phase: Phase,
    /// At most [`BLOCK_SIZE`] commands.
    pub commands: Vec<String>,
}

/// The FOS CLI commands equivalent to a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CliScript {
    blocks: Vec<CommandBlock>,
    finish: Option<String>,
}

impl CliScript {
    /// Command blocks in execution order.
    #[must_use]
    pub fn blocks(&self) -> &[CommandBlock] {
        &self.blocks
    }

    /// Every command, in execution order, excluding the final save or enable.
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.blocks
            .iter()
            .flat_map(|b| b.commands.iter().map(String::as_str))
    }

    /// The closing `cfgenable` or `cfgsave` command.
    #[must_use]
    pub fn finish(&self) -> Option<&str> {
        self.finish.as_deref()
    }

    /// Returns whether the script does nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.finish.is_none()
    }
}

impl std::fmt::Display for CliScript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for block in &self.blocks {
            for command in &block.commands {
                writeln!(f, "{command}")?;
            }
            writeln!(f)?;
        }
        if let Some(finish) = &self.finish {
            writeln!(f, "{finish}")?;
        }
        Ok(())
    }
}

/// Members of `from` that are not in `other`, in `from` order.
fn missing_from(from: &[String], other: &[String]) -> Vec<String> {
    from.iter().filter(|m| !other.contains(m)).cloned().collect()
}

fn quoted(members: &[String]) -> String {
    format!("\"{}\"", members.join("; "))
}

/// `verb "name", "m1; m2"`, or `None` when there is nothing to list.
fn member_command(verb: &str, name: &str, members: &[String]) -> Option<String> {
    (!members.is_empty()).then(|| format!("{verb} \"{name}\", {}", quoted(members)))
}

/// `verb --peerzone "name" -principal "p" -members "m"`, omitting empty lists.
fn peer_command(
    verb: &str,
    name: &str,
    principal_members: &[String],
    members: &[String],
) -> Option<String> {
    if principal_members.is_empty() && members.is_empty() {
        return None;
    }
    let mut command: String = format!("{verb} --peerzone \"{name}\"");
    if !principal_members.is_empty() {
        command.push_str(&format!(" -principal {}", quoted(principal_members)));
    }
    if !members.is_empty() {
        command.push_str(&format!(" -members {}", quoted(members)));
    }
    Some(command)
}

fn zone_command(
    verb: &str,
    zone: &Zone,
    principal_members: &[String],
    members: &[String],
) -> Option<String> {
    if zone.is_peer() {
        peer_command(verb, zone.name(), principal_members, members)
    } else {
        member_command(verb, zone.name(), members)
    }
}

/// Commands per phase, built from the two databases.
#[derive(Debug, Default)]
struct PhaseCommands {
    by_phase: Vec<(Phase, String)>,
}

impl PhaseCommands {
    fn push(&mut self, phase: Phase, command: Option<String>) {
        if let Some(command) = command {
            self.by_phase.push((phase, command));
        }
    }

    fn into_blocks(self) -> Vec<CommandBlock> {
        let mut blocks: Vec<CommandBlock> = Vec::new();
        for phase in Phase::ALL {
            let commands: Vec<String> = self
                .by_phase
                .iter()
                .filter(|(p, _)| *p == phase)
                .map(|(_, c)| c.clone())
                .collect();
            blocks.extend(commands.chunks(BLOCK_SIZE).map(|chunk| CommandBlock {
                phase,
                commands: chunk.to_vec(),
            }));
        }
        blocks
    }
}

fn diff_configs(before: &FabricZoningDatabase, after: &FabricZoningDatabase, out: &mut PhaseCommands) {
    for old in before.zone_configs() {
        match after.zone_config(old.name()) {
            None => out.push(
                Phase::DeleteConfigs,
                Some(format!("cfgdelete \"{}\"", old.name())),
            ),
            Some(new) => {
                out.push(
                    Phase::RemoveConfigMembers,
                    member_command(
                        "cfgremove",
                        old.name(),
                        &missing_from(old.members(), new.members()),
                    ),
                );
                out.push(
                    Phase::AddConfigMembers,
                    member_command(
                        "cfgadd",
                        old.name(),
                        &missing_from(new.members(), old.members()),
                    ),
                );
            }
        }
    }
    for new in after.zone_configs() {
        if before.zone_config(new.name()).is_none() {
            out.push(
                Phase::CreateConfigs,
                member_command("cfgcreate", new.name(), new.members()),
            );
        }
    }
}

fn diff_zones(before: &FabricZoningDatabase, after: &FabricZoningDatabase, out: &mut PhaseCommands) {
    for old in before.zones() {
        match after.zone(old.name()) {
            Some(new) if new.zone_type() == old.zone_type() => {
                out.push(
                    Phase::RemoveZoneMembers,
                    zone_command(
                        "zoneremove",
                        old,
                        &missing_from(old.principal_members(), new.principal_members()),
                        &missing_from(old.members(), new.members()),
                    ),
                );
                out.push(
                    Phase::AddZoneMembers,
                    zone_command(
                        "zoneadd",
                        new,
                        &missing_from(new.principal_members(), old.principal_members()),
                        &missing_from(new.members(), old.members()),
                    ),
                );
            }
            _ => out.push(
                Phase::DeleteZones,
                Some(format!("zonedelete \"{}\"", old.name())),
            ),
        }
    }
    for new in after.zones() {
        let recreated: bool = before
            .zone(new.name())
            .is_none_or(|old| old.zone_type() != new.zone_type());
        if recreated {
            out.push(
                Phase::CreateZones,
                zone_command("zonecreate", new, new.principal_members(), new.members()),
            );
        }
    }
}

fn diff_aliases(before: &FabricZoningDatabase, after: &FabricZoningDatabase, out: &mut PhaseCommands) {
    for old in before.aliases() {
        match after.alias(old.name()) {
            None => out.push(
                Phase::DeleteAliases,
                Some(format!("alidelete \"{}\"", old.name())),
            ),
            Some(new) => {
                out.push(
                    Phase::RemoveAliasMembers,
                    member_command(
                        "aliremove",
                        old.name(),
                        &missing_from(old.members(), new.members()),
                    ),
                );
                out.push(
                    Phase::AddAliasMembers,
                    member_command(
                        "aliadd",
                        old.name(),
                        &missing_from(new.members(), old.members()),
                    ),
                );
            }
        }
    }
    for new in after.aliases() {
        if before.alias(new.name()).is_none() {
            out.push(
                Phase::CreateAliases,
                member_command("alicreate", new.name(), new.members()),
            );
        }
    }
}

/// Builds the CLI script that turns `before` into `after`.
///
/// The script ends with `cfgenable "<activate>" -f` when a configuration is
/// activated, otherwise with `cfgsave -f`. An unchanged database with
/// nothing to activate yields an empty script.
#[must_use]
pub fn build_cli_script(
    before: &FabricZoningDatabase,
    after: &FabricZoningDatabase,
    activate: Option<&str>,
) -> CliScript {
    let mut commands: PhaseCommands = PhaseCommands::default();
    diff_configs(before, after, &mut commands);
    diff_zones(before, after, &mut commands);
    diff_aliases(before, after, &mut commands);
    let blocks: Vec<CommandBlock> = commands.into_blocks();

    let finish: Option<String> = match activate {
        Some(name) => Some(format!("cfgenable \"{name}\" -f")),
        None if !blocks.is_empty() => Some(String::from("cfgsave -f")),
        None => None,
    };

    CliScript { blocks, finish }
}
