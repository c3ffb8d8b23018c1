// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use fos_zone::RunOptions;
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

/// fos-zone-config - apply a SAN zoning workbook to a Brocade fabric
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// CSV export of the zoning workbook sheet
    #[arg(short, long)]
    pub workbook: PathBuf,

    /// Fabric snapshot (JSON) the workbook is applied to
    #[arg(short, long, required_unless_present = "scan")]
    pub snapshot: Option<PathBuf>,

    /// Fabric ID of the logical switch. Defaults to the snapshot's.
    #[arg(short, long)]
    pub fid: Option<u8>,

    /// Zone configuration to enable once the changes are committed
    #[arg(short, long)]
    pub activate: Option<String>,

    /// Save the defined zoning database without enabling a configuration
    #[arg(long)]
    pub save: bool,

    /// Validate only. Nothing is sent to the switch.
    #[arg(short, long)]
    pub test: bool,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,

    /// Print the parsed workbook and exit
    #[arg(long, conflicts_with_all = ["activate", "save", "test", "strict"])]
    pub scan: bool,

    /// Write the equivalent FOS CLI commands to this file
    #[arg(long, value_name = "FILE")]
    pub cli: Option<PathBuf>,

    /// Write the run summary as JSON to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Snapshot file that receives the commit. Defaults to --snapshot.
    #[arg(long, value_name = "FILE")]
    pub commit_to: Option<PathBuf>,

    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,
}

impl Args {
    #[must_use]
    pub fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }

    /// Engine options for a run against a snapshot of fabric `snapshot_fid`.
    #[must_use]
    pub fn run_options(&self, snapshot_fid: u8) -> RunOptions {
        RunOptions {
            fid: self.fid.unwrap_or(snapshot_fid),
            activate: self.activate.clone(),
            save: self.save,
            strict: self.strict,
            test: self.test,
        }
    }

    /// Where the commit is written.
    #[must_use]
    pub fn commit_target<'a>(&'a self, snapshot: &'a Path) -> &'a Path {
        self.commit_to.as_deref().unwrap_or(snapshot)
    }
}
