//! # Money Formatting
//!
//! Converts order amounts into display strings.
//!
//! Every amount that reaches a document is expressed in the currency's
//! minor units (cents for USD, yen for JPY, fils for KWD). Display divides by
//! `10^digits` where `digits` comes from the ISO 4217 minor-unit table below:
//!
//! ```text
//! 1050  USD  →  10.50 USD
//! 1050  JPY  →  1050 JPY
//! 1050  KWD  →  1.050 KWD
//! ```
//!
//! Integer amounts and `Decimal` amounts go through the same code path so a
//! total never renders differently depending on how the order stored it.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{DocsmithError, Result};

/// Digit count used when a currency is missing from the table.
pub const DEFAULT_DECIMAL_DIGITS: u32 = 2;

/// ISO 4217 codes whose minor unit is not 2 digits.
const NON_DEFAULT_DIGITS: &[(&str, u32)] = &[
    // Zero-decimal currencies
    ("BIF", 0),
    ("CLP", 0),
    ("DJF", 0),
    ("GNF", 0),
    ("ISK", 0),
    ("JPY", 0),
    ("KMF", 0),
    ("KRW", 0),
    ("PYG", 0),
    ("RWF", 0),
    ("UGX", 0),
    ("UYI", 0),
    ("VND", 0),
    ("VUV", 0),
    ("XAF", 0),
    ("XOF", 0),
    ("XPF", 0),
    // Three-decimal currencies
    ("BHD", 3),
    ("IQD", 3),
    ("JOD", 3),
    ("KWD", 3),
    ("LYD", 3),
    ("OMR", 3),
    ("TND", 3),
    // Four-decimal units of account
    ("CLF", 4),
    ("UYW", 4),
];

/// ISO 4217 codes with the usual 2-digit minor unit.
const TWO_DIGIT_CODES: &[&str] = &[
    "AED", "AFN", "ALL", "AMD", "ANG", "AOA", "ARS", "AUD", "AWG", "AZN", "BAM", "BBD", "BDT",
    "BGN", "BMD", "BND", "BOB", "BRL", "BSD", "BTN", "BWP", "BYN", "BZD", "CAD", "CDF", "CHF",
    "CNY", "COP", "CRC", "CUP", "CVE", "CZK", "DKK", "DOP", "DZD", "EGP", "ERN", "ETB", "EUR",
    "FJD", "FKP", "GBP", "GEL", "GHS", "GIP", "GMD", "GTQ", "GYD", "HKD", "HNL", "HTG", "HUF",
    "IDR", "ILS", "INR", "IRR", "JMD", "KES", "KGS", "KHR", "KPW", "KYD", "KZT", "LAK", "LBP",
    "LKR", "LRD", "LSL", "MAD", "MDL", "MGA", "MKD", "MMK", "MNT", "MOP", "MRU", "MUR", "MVR",
    "MWK", "MXN", "MYR", "MZN", "NAD", "NGN", "NIO", "NOK", "NPR", "NZD", "PAB", "PEN", "PGK",
    "PHP", "PKR", "PLN", "QAR", "RON", "RSD", "RUB", "SAR", "SBD", "SCR", "SDG", "SEK", "SGD",
    "SHP", "SLE", "SOS", "SRD", "SSP", "STN", "SVC", "SYP", "SZL", "THB", "TJS", "TMT", "TOP",
    "TRY", "TTD", "TWD", "TZS", "UAH", "USD", "UYU", "UZS", "VES", "WST", "XCD", "YER", "ZAR",
    "ZMW", "ZWL",
];

/// Look up the number of minor-unit digits for an ISO currency code.
///
/// Case-insensitive. Fails with [`DocsmithError::UnknownCurrency`] when the
/// code is not in the table; document rendering uses
/// [`decimal_digits_or_default`] instead so an odd code never aborts a render.
pub fn decimal_digits(currency_code: &str) -> Result<u32> {
    let code = currency_code.trim().to_ascii_uppercase();

    if let Some(&(_, digits)) = NON_DEFAULT_DIGITS.iter().find(|(c, _)| *c == code) {
        return Ok(digits);
    }
    if TWO_DIGIT_CODES.contains(&code.as_str()) {
        return Ok(2);
    }
    Err(DocsmithError::UnknownCurrency(currency_code.to_string()))
}

/// Like [`decimal_digits`], falling back to [`DEFAULT_DECIMAL_DIGITS`] with a warning.
pub fn decimal_digits_or_default(currency_code: &str) -> u32 {
    decimal_digits(currency_code).unwrap_or_else(|err| {
        log::warn!("{}; formatting with {} decimal digits", err, DEFAULT_DECIMAL_DIGITS);
        DEFAULT_DECIMAL_DIGITS
    })
}

/// Format an integer minor-unit amount, e.g. `1050, "usd"` → `"10.50 USD"`.
pub fn format_amount(minor_units: i64, currency_code: &str) -> String {
    format_amount_from_decimal(Decimal::from(minor_units), currency_code)
}

/// Format an arbitrary-precision minor-unit amount.
///
/// Produces exactly the same text as [`format_amount`] for the same logical
/// amount. Fractions of a minor unit are rounded half away from zero.
pub fn format_amount_from_decimal(minor_units: Decimal, currency_code: &str) -> String {
    let digits = decimal_digits_or_default(currency_code);
    let major = shift_to_major(minor_units, digits);
    format!(
        "{:.prec$} {}",
        major,
        currency_code.trim().to_uppercase(),
        prec = digits as usize
    )
}

/// Divide a minor-unit amount down to major units, rounded to `digits`.
fn shift_to_major(minor_units: Decimal, digits: u32) -> Decimal {
    let mut major = minor_units;
    // set_scale fails only beyond 28 digits, which no currency reaches
    if major.set_scale(major.scale() + digits).is_err() {
        major = minor_units / Decimal::from(10i64.pow(digits));
    }
    major.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero)
}

/// Short numeric date in the `M/D/YYYY` shape used on documents.
pub fn format_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%-m/%-d/%Y").to_string()
}

/// Date for right-to-left documents.
///
/// The characters of [`format_date`] are reversed so that, once the line is
/// laid out right to left, numerals and separators read in the expected
/// visual order.
pub fn format_date_rtl(timestamp: &DateTime<Utc>) -> String {
    format_date(timestamp).chars().rev().collect()
}
