// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Name selection for pattern based workbook actions.
//!
//! A workbook `Match` column selects how the `Name` cell is compared
//! against existing zone object names:
//!
//! - `exact`: literal, case sensitive comparison
//! - `wild`: shell style wildcards (`*`, `?`, `[...]`, `[!...]`)
//! - `regex_m`: regular expression anchored at the start of the name
//! - `regex_s`: regular expression matched anywhere in the name

use crate::error::DomainError;
use glob::Pattern;
use regex::Regex;
use std::str::FromStr;

/// How a workbook `Name` is compared against zone object names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchMode {
    /// Literal comparison.
    #[default]
    Exact,
    /// Shell style wildcard comparison.
    Wild,
    /// Regular expression, anchored at the start.
    RegexMatch,
    /// Regular expression, matched anywhere.
    RegexSearch,
}

impl MatchMode {
    /// Converts this match mode to its workbook token.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Wild => "wild",
            Self::RegexMatch => "regex_m",
            Self::RegexSearch => "regex_s",
        }
    }

    /// Returns whether this mode selects names by pattern.
    #[must_use]
    pub const fn is_pattern(&self) -> bool {
        !matches!(self, Self::Exact)
    }
}

impl FromStr for MatchMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "exact" => Ok(Self::Exact),
            "wild" => Ok(Self::Wild),
            "regex_m" => Ok(Self::RegexMatch),
            "regex_s" => Ok(Self::RegexSearch),
            _ => Err(DomainError::InvalidMatchMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A compiled name selector.
#[derive(Debug, Clone)]
pub enum NamePattern {
    /// A literal name.
    Exact(String),
    /// A shell style wildcard.
    Wild(Pattern),
    /// A regular expression. Anchoring is part of the compiled expression.
    Regex(Regex),
}

impl NamePattern {
    /// Compiles `pattern` for the given match mode.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPattern` if the pattern does not compile.
    pub fn new(pattern: &str, mode: MatchMode) -> Result<Self, DomainError> {
        let invalid = |error: String| DomainError::InvalidPattern {
            pattern: pattern.to_string(),
            error,
        };
        match mode {
            MatchMode::Exact => Ok(Self::Exact(pattern.to_string())),
            MatchMode::Wild => Pattern::new(pattern)
                .map(Self::Wild)
                .map_err(|e| invalid(e.to_string())),
            MatchMode::RegexMatch => Regex::new(&format!("^(?:{pattern})"))
                .map(Self::Regex)
                .map_err(|e| invalid(e.to_string())),
            MatchMode::RegexSearch => Regex::new(pattern)
                .map(Self::Regex)
                .map_err(|e| invalid(e.to_string())),
        }
    }

    /// Returns whether `name` is selected by this pattern.
    #[must_use]
    pub fn is_match(&self, name: &str) -> bool {
        match self {
            Self::Exact(text) => name == text,
            Self::Wild(pattern) => pattern.matches(name),
            Self::Regex(regex) => regex.is_match(name),
        }
    }

    /// Selects the matching names, preserving the order of `names`.
    pub fn select<'a, I>(&self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .filter(|n| self.is_match(n))
            .map(str::to_string)
            .collect()
    }
}
