// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use fos_zone::CoreError;

/// API-level errors.
///
/// These stop a run before any zoning action is applied. Problems with
/// individual workbook rows are findings, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The workbook is not readable CSV.
    InvalidCsvFormat {
        /// A human-readable description of the problem.
        reason: String,
    },
    /// The workbook is CSV but not a zoning workbook.
    InvalidWorkbook {
        /// A human-readable description of the problem.
        reason: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCsvFormat { reason } => write!(f, "Invalid CSV format: {reason}"),
            Self::InvalidWorkbook { reason } => write!(f, "Invalid zoning workbook: {reason}"),
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self::InvalidWorkbook {
            reason: err.to_string(),
        }
    }
}
