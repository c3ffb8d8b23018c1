// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Commit and abort against the switch.
//!
//! Edits accumulate in the transaction's working copy and reach the switch
//! at most once, as a single replacement of the defined zoning database,
//! optionally followed by enabling a zone configuration. The decision is an
//! explicit [`CommitPlan`] value computed from the findings and the caller's
//! [`RunOptions`].

use crate::transaction::{RunOptions, Transaction};
use fos_zone_audit::{Category, Finding};
use fos_zone_domain::FabricZoningDatabase;
use serde::Serialize;
use tracing::{info, warn};

/// A request the switch could not carry out.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The session could not be opened or closed.
    #[error("Session error: {0}")]
    Session(String),
    /// The switch rejected the request. Carries the FOS message.
    #[error("FOS error: {0}")]
    Rejected(String),
    /// The request never reached the switch.
    #[error("I/O error: {0}")]
    Io(String),
}

/// The switch side of a zoning transaction.
///
/// Implementations are not expected to support concurrent transactions.
pub trait ZoneTransport {
    /// Opens a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be opened.
    fn login(&mut self) -> Result<(), TransportError>;

    /// Closes the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be closed cleanly.
    fn logout(&mut self) -> Result<(), TransportError>;

    /// Replaces the defined zoning database of logical switch `fid`.
    ///
    /// # Errors
    ///
    /// Returns an error if the switch rejects the database.
    fn replace_zoning(&mut self, db: &FabricZoningDatabase, fid: u8)
    -> Result<(), TransportError>;

    /// Enables zone configuration `name` on logical switch `fid`.
    ///
    /// # Errors
    ///
    /// Returns an error if the switch cannot enable the configuration.
    fn enable_zone_config(&mut self, fid: u8, name: &str) -> Result<(), TransportError>;

    /// Discards any zoning transaction the switch holds open for `fid`.
    ///
    /// # Errors
    ///
    /// Returns an error if the abort request fails.
    fn abort_pending_transaction(&mut self, fid: u8) -> Result<(), TransportError>;
}

/// What the end of a run will do with the switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitPlan {
    /// Findings prevent any contact with the switch.
    Blocked {
        /// Error findings.
        errors: usize,
        /// Warning findings.
        warnings: usize,
    },
    /// Nothing is sent to the switch.
    DryRun,
    /// Replace the defined zoning database, then optionally enable a
    /// configuration.
    Replace {
        /// Configuration to enable after the replacement.
        activate: Option<String>,
    },
    /// Only enable a configuration. The defined database is unchanged.
    Enable {
        /// Configuration to enable.
        config: String,
    },
}

/// What actually happened at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommitOutcome {
    /// Not committed because of errors (or warnings in strict mode).
    Blocked,
    /// Not committed because nothing was requested, or test mode.
    DryRun,
    /// The switch accepted every request.
    Committed {
        /// The defined zoning database was replaced.
        replaced: bool,
        /// The configuration that was enabled, if any.
        activated: Option<String>,
    },
    /// The switch rejected a request. Nothing was committed.
    Failed {
        /// The transport error.
        message: String,
    },
}

impl CommitOutcome {
    /// Returns whether the switch rejected the commit.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl std::fmt::Display for CommitOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blocked => write!(f, "Not committed: errors were found"),
            Self::DryRun => write!(f, "Not committed: no changes were sent to the switch"),
            Self::Committed {
                activated: Some(name),
                ..
            } => write!(f, "Committed and enabled zone configuration {name}"),
            Self::Committed {
                replaced: true,
                activated: None,
            } => write!(f, "Committed and saved"),
            Self::Committed { .. } => write!(f, "Committed"),
            Self::Failed { message } => write!(f, "Commit failed: {message}"),
        }
    }
}

/// Decides what the end of a run does with the switch.
#[must_use]
pub fn plan_commit(txn: &Transaction, options: &RunOptions) -> CommitPlan {
    let errors: usize = txn.error_count();
    let warnings: usize = txn.warning_count();

    if errors > 0 || (options.strict && warnings > 0) {
        return CommitPlan::Blocked { errors, warnings };
    }
    if options.test {
        return CommitPlan::DryRun;
    }
    if txn.has_pending_changes() && options.requests_commit() {
        return CommitPlan::Replace {
            activate: options.activate.clone(),
        };
    }
    match &options.activate {
        Some(config) => CommitPlan::Enable {
            config: config.clone(),
        },
        None => CommitPlan::DryRun,
    }
}

/// Sends the plan's requests inside an open session. On failure the switch
/// is told to abort its pending transaction.
fn send(
    txn: &Transaction,
    fid: u8,
    plan: &CommitPlan,
    transport: &mut dyn ZoneTransport,
) -> Result<CommitOutcome, TransportError> {
    let result: Result<CommitOutcome, TransportError> = match plan {
        CommitPlan::Replace { activate } => {
            transport.replace_zoning(&txn.db, fid).and_then(|()| {
                if let Some(name) = activate {
                    transport.enable_zone_config(fid, name)?;
                }
                Ok(CommitOutcome::Committed {
                    replaced: true,
                    activated: activate.clone(),
                })
            })
        }
        CommitPlan::Enable { config } => {
            transport
                .enable_zone_config(fid, config)
                .map(|()| CommitOutcome::Committed {
                    replaced: false,
                    activated: Some(config.clone()),
                })
        }
        CommitPlan::Blocked { .. } => Ok(CommitOutcome::Blocked),
        CommitPlan::DryRun => Ok(CommitOutcome::DryRun),
    };

    let Err(cause) = &result else {
        return result;
    };
    if let Err(abort) = transport.abort_pending_transaction(fid) {
        warn!(fid, %cause, error = %abort, "failed to abort pending zoning transaction");
    }
    result
}

/// Carries out the end of a run.
///
/// The transaction's working copy is never changed here. A transport
/// failure is recorded as a device finding on the transaction.
pub fn commit(
    txn: &mut Transaction,
    options: &RunOptions,
    transport: &mut dyn ZoneTransport,
) -> CommitOutcome {
    let plan: CommitPlan = plan_commit(txn, options);
    match &plan {
        CommitPlan::Blocked { errors, warnings } => {
            info!(errors, warnings, strict = options.strict, "commit blocked");
            return CommitOutcome::Blocked;
        }
        CommitPlan::DryRun => {
            info!(test = options.test, "no changes sent to the switch");
            return CommitOutcome::DryRun;
        }
        CommitPlan::Replace { activate } => {
            info!(fid = options.fid, activate = ?activate, "replacing zoning database");
        }
        CommitPlan::Enable { config } => {
            info!(fid = options.fid, config = %config, "enabling zone configuration");
        }
    }

    if let Err(e) = transport.login() {
        return device_failure(txn, &e);
    }

    let outcome: Result<CommitOutcome, TransportError> = send(txn, options.fid, &plan, transport);
    let logout: Result<(), TransportError> = transport.logout();

    match (outcome, logout) {
        (Ok(outcome), Ok(())) => {
            info!(%outcome, "commit complete");
            outcome
        }
        (Ok(_), Err(e)) | (Err(e), Ok(())) => device_failure(txn, &e),
        (Err(e), Err(logout_err)) => {
            warn!(error = %logout_err, "logout failed after commit failure");
            device_failure(txn, &e)
        }
    }
}

fn device_failure(txn: &mut Transaction, error: &TransportError) -> CommitOutcome {
    warn!(%error, "commit failed");
    txn.findings
        .push(Finding::error(Category::Device, error.to_string()));
    CommitOutcome::Failed {
        message: error.to_string(),
    }
}
