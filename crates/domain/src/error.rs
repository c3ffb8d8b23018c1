// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors raised by zoning domain rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A zone object name does not follow FOS naming rules.
    InvalidName {
        /// The offending name.
        name: String,
        /// Why the name was rejected.
        reason: &'static str,
    },
    /// A value that looks like a WWN is malformed.
    InvalidWwn(String),
    /// A value that looks like a `domain,index` pair is malformed.
    InvalidDomainIndex(String),
    /// A match mode token was not recognized.
    InvalidMatchMode(String),
    /// A name pattern could not be compiled.
    InvalidPattern {
        /// The pattern as written.
        pattern: String,
        /// The compiler error.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName { name, reason } => {
                write!(f, "Invalid name '{name}': {reason}")
            }
            Self::InvalidWwn(wwn) => write!(f, "Invalid WWN: {wwn}"),
            Self::InvalidDomainIndex(value) => {
                write!(f, "Invalid domain,index member: {value}")
            }
            Self::InvalidMatchMode(value) => write!(
                f,
                "Invalid match type '{value}'. Must be exact, wild, regex_m, or regex_s"
            ),
            Self::InvalidPattern { pattern, error } => {
                write!(f, "Invalid pattern '{pattern}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
