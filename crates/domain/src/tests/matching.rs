// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, MatchMode, NamePattern};
use std::str::FromStr;

const NAMES: [&str; 4] = ["test_1", "test_2", "prod_1", "xtest_3"];

#[test]
fn test_match_mode_defaults_to_exact_for_blank() {
    assert_eq!(MatchMode::from_str("").unwrap(), MatchMode::Exact);
    assert_eq!(MatchMode::from_str(" Regex_M ").unwrap(), MatchMode::RegexMatch);
    assert!(matches!(
        MatchMode::from_str("glob"),
        Err(DomainError::InvalidMatchMode(_))
    ));
}

#[test]
fn test_exact_selects_literal_name_only() {
    let pattern: NamePattern = NamePattern::new("test_*", MatchMode::Exact).unwrap();
    assert!(pattern.select(NAMES).is_empty());
}

#[test]
fn test_wild_selection() {
    let pattern: NamePattern = NamePattern::new("test_*", MatchMode::Wild).unwrap();
    assert_eq!(pattern.select(NAMES), vec!["test_1", "test_2"]);

    let single: NamePattern = NamePattern::new("test_?", MatchMode::Wild).unwrap();
    assert_eq!(single.select(NAMES).len(), 2);

    let class: NamePattern = NamePattern::new("*_[!1]", MatchMode::Wild).unwrap();
    assert_eq!(class.select(NAMES), vec!["test_2", "xtest_3"]);
}

#[test]
fn test_wild_escapes_regex_metacharacters() {
    let pattern: NamePattern = NamePattern::new("a.b*", MatchMode::Wild).unwrap();
    assert!(pattern.is_match("a.bcd"));
    assert!(!pattern.is_match("axbcd"));
}

#[test]
fn test_wild_caret_in_brackets_is_literal() {
    let pattern: NamePattern = NamePattern::new("test_[^0]", MatchMode::Wild).unwrap();
    assert_eq!(
        pattern.select(["test_1", "test_^", "test_0"]),
        vec!["test_^", "test_0"]
    );
}

#[test]
fn test_unclosed_wild_bracket_is_reported() {
    let result: Result<NamePattern, DomainError> = NamePattern::new("test_[", MatchMode::Wild);
    assert!(matches!(result, Err(DomainError::InvalidPattern { .. })));
}

#[test]
fn test_regex_match_is_anchored_at_start() {
    let pattern: NamePattern = NamePattern::new("test", MatchMode::RegexMatch).unwrap();
    assert_eq!(pattern.select(NAMES), vec!["test_1", "test_2"]);
}

#[test]
fn test_regex_search_matches_anywhere() {
    let pattern: NamePattern = NamePattern::new("test", MatchMode::RegexSearch).unwrap();
    assert_eq!(pattern.select(NAMES), vec!["test_1", "test_2", "xtest_3"]);
}

#[test]
fn test_bad_regex_is_reported() {
    let result: Result<NamePattern, DomainError> = NamePattern::new("(", MatchMode::RegexSearch);
    assert!(matches!(result, Err(DomainError::InvalidPattern { .. })));
}
