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
    clippy::unwrap_used,
    clippy::expect_used
)]

mod args;

#[cfg(test)]
mod tests;

use args::Args;
use clap::Parser;
use color_eyre::{
    Result,
    eyre::{Context, eyre},
};
use fos_zone::RunOptions;
use fos_zone_api::{ExitStatus, RunReport, ScanReport, run_workbook, scan_workbook};
use fos_zone_persistence::{FabricSnapshot, SnapshotTransport, load_snapshot};
use std::path::Path;
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;
use tracing::{error, info};

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let args: Args = Args::parse();
    init_tracing(args.log_level());

    let result: Result<ExitStatus> = if args.scan { scan(&args) } else { run(&args) };
    match result {
        Ok(status) => Ok(ExitCode::from(status.code())),
        Err(err) => {
            error!("{err:?}");
            Ok(ExitCode::from(ExitStatus::InputError.code()))
        }
    }
}

/// Logs to stderr. `RUST_LOG` overrides the `-v`/`-q` level.
fn init_tracing(level: LevelFilter) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn read_workbook(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read workbook {}", path.display()))
}

fn scan(args: &Args) -> Result<ExitStatus> {
    let report: ScanReport = scan_workbook(&read_workbook(&args.workbook)?)?;
    print!("{report}");
    if report.findings.is_empty() {
        Ok(ExitStatus::Success)
    } else {
        Ok(ExitStatus::InputError)
    }
}

fn run(args: &Args) -> Result<ExitStatus> {
    let csv: String = read_workbook(&args.workbook)?;
    let snapshot_path: &Path = args
        .snapshot
        .as_deref()
        .ok_or_else(|| eyre!("--snapshot is required unless --scan is given"))?;
    let snapshot: FabricSnapshot = load_snapshot(snapshot_path)?;
    let options: RunOptions = args.run_options(snapshot.fid);

    let target: &Path = args.commit_target(snapshot_path);
    let mut transport: SnapshotTransport = SnapshotTransport::with_seed(target, snapshot.clone());

    let report: RunReport = run_workbook(&csv, snapshot, &options, &mut transport)?;
    print!("{}", report.summary);

    if let Some(path) = &args.cli {
        std::fs::write(path, report.cli_script.to_string())
            .wrap_err_with(|| format!("Failed to write CLI script {}", path.display()))?;
        info!(path = %path.display(), "wrote FOS CLI script");
    }
    if let Some(path) = &args.report {
        std::fs::write(path, report.summary.to_json()?)
            .wrap_err_with(|| format!("Failed to write report {}", path.display()))?;
        info!(path = %path.display(), "wrote run summary");
    }

    Ok(report.summary.exit_status)
}
