//! Validation helper functions for configuration types.

use regex::Regex;

use crate::core::errors::{LsgoError, Result};

/// Validate that a string value is not blank.
pub fn validate_non_empty(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LsgoError::validation_field(
            format!("{} must not be empty", field),
            field,
        ));
    }
    Ok(())
}

/// Validate that a skip/keep pattern compiles. Empty patterns are allowed and
/// mean "no stage".
pub fn validate_pattern(pattern: &str, field: &str) -> Result<()> {
    if pattern.is_empty() {
        return Ok(());
    }

    Regex::new(pattern).map(|_| ()).map_err(|err| {
        LsgoError::config_field(format!("Invalid pattern '{pattern}': {err}"), field)
    })
}
