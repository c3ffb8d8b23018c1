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
    clippy::all
)]

mod cli_script;
mod error;
mod handlers;
mod summary;
mod workbook;

#[cfg(test)]
mod tests;

pub use cli_script::{BLOCK_SIZE, CliScript, CommandBlock, Phase, build_cli_script};
pub use error::ApiError;
pub use handlers::{RunReport, ScanReport, run_workbook, scan_workbook};
pub use summary::{ExitStatus, RunSummary};
pub use workbook::read_workbook_csv;
