// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fos_zone_domain::DomainError;

/// Errors raised while reading workbook rows into action records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The header row lacks required columns.
    MissingColumns(Vec<String>),
    /// A cell holds a value outside its column's vocabulary.
    UnknownToken {
        /// The workbook column.
        column: &'static str,
        /// The cell value.
        value: String,
    },
    /// A required cell is blank and no earlier row supplies it.
    Unresolved {
        /// The workbook column.
        column: &'static str,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::MissingColumns(columns) => {
                write!(f, "Missing required columns: {}", columns.join(", "))
            }
            Self::UnknownToken { column, value } => {
                write!(f, "Unknown {column} value '{value}'")
            }
            Self::Unresolved { column } => {
                write!(f, "{column} is blank and no previous row supplies it")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
