// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Maximum length of an alias, zone, or zone configuration name.
pub const MAX_NAME_LEN: usize = 64;

/// Highest usable fabric domain ID.
const MAX_DOMAIN_ID: u16 = 239;

/// The syntactic category of a zone or alias member string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// A world wide name, `xx:xx:xx:xx:xx:xx:xx:xx`.
    Wwn,
    /// A `domain,index` pair.
    DomainIndex,
    /// Anything else; interpreted as an alias name.
    Name,
}

/// Returns whether `value` is a well formed WWN.
#[must_use]
pub fn is_valid_wwn(value: &str) -> bool {
    let octets: Vec<&str> = value.split(':').collect();
    octets.len() == 8
        && octets
            .iter()
            .all(|o| o.len() == 2 && o.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Returns whether `value` is a well formed `domain,index` pair.
#[must_use]
pub fn is_valid_domain_index(value: &str) -> bool {
    let Some((domain, index)) = value.split_once(',') else {
        return false;
    };
    let domain: Option<u16> = domain.trim().parse::<u16>().ok();
    let index: Option<u16> = index.trim().parse::<u16>().ok();
    matches!((domain, index), (Some(d), Some(_)) if d <= MAX_DOMAIN_ID)
}

/// Classifies a member string.
///
/// Strings containing `:` must be WWNs and strings containing `,` must be
/// `domain,index` pairs; anything else is treated as a name.
///
/// # Errors
///
/// Returns an error if the value looks like a WWN or `d,i` pair but is
/// malformed.
pub fn classify_member(value: &str) -> Result<MemberKind, DomainError> {
    if value.contains(':') {
        if is_valid_wwn(value) {
            return Ok(MemberKind::Wwn);
        }
        return Err(DomainError::InvalidWwn(value.to_string()));
    }
    if value.contains(',') {
        if is_valid_domain_index(value) {
            return Ok(MemberKind::DomainIndex);
        }
        return Err(DomainError::InvalidDomainIndex(value.to_string()));
    }
    Ok(MemberKind::Name)
}

/// Validates a zone object name against FOS naming rules.
///
/// Names begin with a letter, contain only letters, digits, `_`, `-`,
/// `^` and `$`, and are at most [`MAX_NAME_LEN`] characters long.
///
/// # Errors
///
/// Returns `DomainError::InvalidName` describing the first rule broken.
pub fn validate_zone_name(name: &str) -> Result<(), DomainError> {
    let invalid = |reason: &'static str| DomainError::InvalidName {
        name: name.to_string(),
        reason,
    };

    let Some(first) = name.chars().next() else {
        return Err(invalid("name cannot be empty"));
    };
    if name.len() > MAX_NAME_LEN {
        return Err(invalid("name exceeds 64 characters"));
    }
    if !first.is_ascii_alphabetic() {
        return Err(invalid("name must begin with a letter"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '^' | '$'))
    {
        return Err(invalid(
            "name may only contain letters, digits, and the characters _ - ^ $",
        ));
    }
    Ok(())
}
