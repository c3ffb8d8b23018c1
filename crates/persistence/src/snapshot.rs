// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::PersistenceError;
use fos_zone_domain::{FabricZoningDatabase, LoginTable};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// A captured fabric: the defined zoning database of one logical switch and
/// the name server logins seen when it was captured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FabricSnapshot {
    /// Fabric ID of the logical switch.
    pub fid: u8,
    /// Defined and effective zoning.
    #[serde(default)]
    pub zoning: FabricZoningDatabase,
    /// Name server logins.
    #[serde(default)]
    pub logins: LoginTable,
}

fn io_error(path: &Path, err: &std::io::Error) -> PersistenceError {
    PersistenceError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

/// Parses a snapshot from JSON text.
///
/// # Errors
///
/// Returns an error if the text is not a snapshot, or if its effective
/// configuration is not one of its defined configurations.
pub fn parse_snapshot(json: &str) -> Result<FabricSnapshot, PersistenceError> {
    let snapshot: FabricSnapshot = serde_json::from_str(json)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;

    if let Some(effective) = snapshot.zoning.effective_config()
        && snapshot.zoning.zone_config(effective).is_none()
    {
        return Err(PersistenceError::InvalidSnapshot(format!(
            "effective zone configuration {effective} is not defined"
        )));
    }

    Ok(snapshot)
}

/// Loads a snapshot file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid snapshot.
pub fn load_snapshot(path: &Path) -> Result<FabricSnapshot, PersistenceError> {
    let json: String = std::fs::read_to_string(path).map_err(|e| io_error(path, &e))?;
    let snapshot: FabricSnapshot = parse_snapshot(&json)?;
    debug!(
        path = %path.display(),
        fid = snapshot.fid,
        aliases = snapshot.zoning.alias_names().len(),
        zones = snapshot.zoning.zone_names().len(),
        logins = snapshot.logins.logins().len(),
        "loaded fabric snapshot"
    );
    Ok(snapshot)
}

/// Writes a snapshot file.
///
/// The JSON is written next to `path` first and then renamed over it, so a
/// failed write never leaves a truncated snapshot behind.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be serialized or written.
pub fn save_snapshot(path: &Path, snapshot: &FabricSnapshot) -> Result<(), PersistenceError> {
    let json: String = serde_json::to_string_pretty(snapshot)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
    let staging = path.with_extension("json.tmp");
    std::fs::write(&staging, json).map_err(|e| io_error(&staging, &e))?;
    std::fs::rename(&staging, path).map_err(|e| io_error(path, &e))?;
    info!(path = %path.display(), fid = snapshot.fid, "saved fabric snapshot");
    Ok(())
}
