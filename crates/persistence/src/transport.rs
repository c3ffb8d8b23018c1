// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! A [`ZoneTransport`] that commits to a snapshot file.
//!
//! Behaves like the switch's zoning edit buffer: `replace_zoning` and
//! `enable_zone_config` stage changes, `abort_pending_transaction` throws
//! them away, and `logout` writes whatever is still staged. A transport
//! built with a seed opens its session from the seed while the file does not
//! exist yet, so the file is only created by a commit.

use crate::snapshot::{FabricSnapshot, load_snapshot, save_snapshot};
use fos_zone::{TransportError, ZoneTransport};
use fos_zone_domain::FabricZoningDatabase;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Commits zoning changes by rewriting a fabric snapshot file.
#[derive(Debug)]
pub struct SnapshotTransport {
    path: PathBuf,
    seed: Option<FabricSnapshot>,
    session: Option<FabricSnapshot>,
    staged: Option<FabricZoningDatabase>,
}

impl SnapshotTransport {
    /// Creates a transport for the snapshot at `path`.
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            seed: None,
            session: None,
            staged: None,
        }
    }

    /// Creates a transport for `path` that starts from `seed` until the
    /// file exists.
    #[must_use]
    pub fn with_seed(path: &Path, seed: FabricSnapshot) -> Self {
        Self {
            seed: Some(seed),
            ..Self::new(path)
        }
    }

    /// The snapshot file this transport writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn session(&self, fid: u8) -> Result<&FabricSnapshot, TransportError> {
        let snapshot: &FabricSnapshot = self
            .session
            .as_ref()
            .ok_or_else(|| TransportError::Session(String::from("not logged in")))?;
        if snapshot.fid != fid {
            return Err(TransportError::Rejected(format!(
                "Logical switch with FID {fid} not found"
            )));
        }
        Ok(snapshot)
    }
}

impl ZoneTransport for SnapshotTransport {
    fn login(&mut self) -> Result<(), TransportError> {
        let snapshot: FabricSnapshot = match &self.seed {
            Some(seed) if !self.path.exists() => {
                debug!(path = %self.path.display(), "snapshot session opened from seed");
                seed.clone()
            }
            _ => load_snapshot(&self.path).map_err(|e| TransportError::Session(e.to_string()))?,
        };
        debug!(path = %self.path.display(), fid = snapshot.fid, "snapshot session opened");
        self.session = Some(snapshot);
        self.staged = None;
        Ok(())
    }

    fn logout(&mut self) -> Result<(), TransportError> {
        let Some(mut snapshot) = self.session.take() else {
            return Ok(());
        };
        let Some(zoning) = self.staged.take() else {
            debug!(path = %self.path.display(), "snapshot session closed without changes");
            return Ok(());
        };
        snapshot.zoning = zoning;
        save_snapshot(&self.path, &snapshot).map_err(|e| TransportError::Io(e.to_string()))?;
        info!(path = %self.path.display(), fid = snapshot.fid, "committed zoning to snapshot");
        Ok(())
    }

    fn replace_zoning(
        &mut self,
        db: &FabricZoningDatabase,
        fid: u8,
    ) -> Result<(), TransportError> {
        let effective: Option<String> = self
            .session(fid)?
            .zoning
            .effective_config()
            .map(str::to_string);
        let mut staged: FabricZoningDatabase = db.clone();
        staged.set_effective_config(effective.as_deref());
        self.staged = Some(staged);
        Ok(())
    }

    fn enable_zone_config(&mut self, fid: u8, name: &str) -> Result<(), TransportError> {
        let current: &FabricZoningDatabase = &self.session(fid)?.zoning;
        let mut staged: FabricZoningDatabase = self.staged.clone().unwrap_or_else(|| current.clone());
        if staged.zone_config(name).is_none() {
            return Err(TransportError::Rejected(format!(
                "Zone configuration {name} does not exist"
            )));
        }
        staged.set_effective_config(Some(name));
        self.staged = Some(staged);
        Ok(())
    }

    fn abort_pending_transaction(&mut self, fid: u8) -> Result<(), TransportError> {
        if self.staged.take().is_some() {
            info!(fid, "discarded staged zoning changes");
        }
        Ok(())
    }
}
