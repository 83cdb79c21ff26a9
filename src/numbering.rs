//! # Document Numbering
//!
//! Display numbers are produced from a format string holding the
//! `{invoice_number}` placeholder, e.g. `INV-{invoice_number}/2024`.
//! A store may force the sequence to restart from a given number; after that
//! numbers keep counting up from the last issued one.

use crate::error::{DocsmithError, Result};

/// Placeholder replaced by the sequential number.
pub const NUMBER_PLACEHOLDER: &str = "{invoice_number}";

/// Format used when the store has not configured one.
pub const DEFAULT_NUMBER_FORMAT: &str = NUMBER_PLACEHOLDER;

/// Check that a format string contains the placeholder.
pub fn validate_number_format(format: &str) -> Result<()> {
    if format.contains(NUMBER_PLACEHOLDER) {
        Ok(())
    } else {
        Err(DocsmithError::InvalidNumberFormat(format!(
            "Text {} needs to be included in input.",
            NUMBER_PLACEHOLDER
        )))
    }
}

/// Substitute `number` into `format`.
pub fn format_display_number(format: &str, number: u64) -> Result<String> {
    validate_number_format(format)?;
    Ok(format.replace(NUMBER_PLACEHOLDER, &number.to_string()))
}

/// Number the next document receives.
///
/// A forced number wins over the running sequence; otherwise the sequence
/// continues from `last_issued` (0 when nothing was issued yet).
pub fn next_number(last_issued: Option<u64>, forced: Option<u64>) -> u64 {
    match forced {
        Some(forced) => forced,
        None => last_issued.map_or(1, |n| n.saturating_add(1)),
    }
}

/// Formatted display number for the next document.
pub fn next_display_number(
    format: Option<&str>,
    last_issued: Option<u64>,
    forced: Option<u64>,
) -> Result<String> {
    let format = format.unwrap_or(DEFAULT_NUMBER_FORMAT);
    format_display_number(format, next_number(last_issued, forced))
}
