//! Input validation primitives.
//!
//! Helpers for the field checks applied to setup answers:
//! - Validating non-empty strings
//! - Matching a value against a fixed pattern
//! - Restricting a value to a closed set of literals

use regex::Regex;

use crate::error::{Error, Result};

/// Require a string to be non-empty after trimming.
///
/// Returns a reference to the trimmed string on success.
pub fn require_non_empty<'a>(value: &'a str, field: &str, message: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(Error::validation_invalid_argument(field, message, None, None))
    } else {
        Ok(trimmed)
    }
}

/// Require a value to match `pattern` in full.
pub fn require_match(value: &str, pattern: &Regex, field: &str, message: &str) -> Result<()> {
    if pattern.is_match(value) {
        Ok(())
    } else {
        Err(Error::validation_invalid_argument(
            field,
            message,
            Some(value.to_string()),
            None,
        ))
    }
}

/// Require a value to be one of `allowed`.
pub fn require_one_of<'a>(value: &str, allowed: &[&'a str], field: &str) -> Result<&'a str> {
    allowed
        .iter()
        .copied()
        .find(|candidate| *candidate == value)
        .ok_or_else(|| {
            Error::validation_invalid_argument(
                field,
                format!("must be one of: {}", allowed.join(", ")),
                Some(value.to_string()),
                Some(allowed.iter().map(|s| s.to_string()).collect()),
            )
        })
}
