use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TokenError;

/// Sign flag appended after a sign or divider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Flag {
    /// `#`
    Damage,
    /// `?`
    Uncertain,
    /// `!`
    Correction,
    /// `*`
    Collation,
}

impl Flag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Flag::Damage => "#",
            Flag::Uncertain => "?",
            Flag::Correction => "!",
            Flag::Collation => "*",
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const ALL_FLAGS: &[Flag] = &[Flag::Damage, Flag::Uncertain, Flag::Correction, Flag::Collation];

/// Unreadable signs can be damaged, uncertain or collated but never corrected.
pub const UNKNOWN_SIGN_FLAGS: &[Flag] = &[Flag::Damage, Flag::Uncertain, Flag::Collation];

/// Normalized words only record damage and uncertainty.
pub const NORMALIZED_WORD_FLAGS: &[Flag] = &[Flag::Damage, Flag::Uncertain];

pub fn render_flags(flags: &[Flag]) -> String {
    flags.iter().map(Flag::as_str).collect()
}

/// Check that every flag is allowed for `kind` and none is repeated.
pub fn validate_flags(kind: &str, flags: &[Flag], allowed: &[Flag]) -> Result<(), TokenError> {
    for (index, flag) in flags.iter().enumerate() {
        if !allowed.contains(flag) {
            return Err(TokenError::invalid_flag(kind, *flag));
        }
        if flags[..index].contains(flag) {
            return Err(TokenError::duplicate_flag(kind, *flag));
        }
    }
    Ok(())
}

const MODIFIER_LETTERS: &[char] = &['c', 'f', 'g', 's', 't', 'n', 'z', 'k', 'r', 'h', 'v'];

/// Sign modifiers are `@` followed by a single known letter or a number.
pub fn validate_modifiers(modifiers: &[String]) -> Result<(), TokenError> {
    for modifier in modifiers {
        let body = modifier
            .strip_prefix('@')
            .ok_or_else(|| TokenError::invalid_modifier(modifier.clone()))?;

        let mut chars = body.chars();
        let valid = match (chars.next(), chars.as_str()) {
            (Some(letter), "") if MODIFIER_LETTERS.contains(&letter) => true,
            _ => !body.is_empty() && body.chars().all(|c| c.is_ascii_digit()),
        };

        if !valid {
            return Err(TokenError::invalid_modifier(modifier.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_flags() {
        assert_eq!(render_flags(&[Flag::Damage, Flag::Uncertain]), "#?");
        assert_eq!(render_flags(&[]), "");
    }

    #[test]
    fn test_rejects_disallowed_flag() {
        let result = validate_flags("UnclearSign", &[Flag::Correction], UNKNOWN_SIGN_FLAGS);
        assert_eq!(
            result,
            Err(TokenError::invalid_flag("UnclearSign", Flag::Correction))
        );
    }

    #[test]
    fn test_rejects_duplicate_flag() {
        let result = validate_flags("Reading", &[Flag::Damage, Flag::Damage], ALL_FLAGS);
        assert!(matches!(result, Err(TokenError::DuplicateFlag { .. })));
    }

    #[test]
    fn test_modifiers() {
        assert!(validate_modifiers(&["@v".to_string(), "@90".to_string()]).is_ok());
        assert!(validate_modifiers(&["@".to_string()]).is_err());
        assert!(validate_modifiers(&["v".to_string()]).is_err());
        assert!(validate_modifiers(&["@vv".to_string()]).is_err());
        assert!(validate_modifiers(&["@x".to_string()]).is_err());
    }
}
