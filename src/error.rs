//! # Error Types
//!
//! This module defines error types used throughout the docsmith library.

use thiserror::Error;

/// Placeholder payload returned by callers that still expect a buffer for
/// template kinds the dispatcher does not know.
pub const UNSUPPORTED_TEMPLATE_PAYLOAD: &[u8] = b"Not supported template";

/// Main error type for docsmith operations
#[derive(Debug, Error)]
pub enum DocsmithError {
    /// Settings required by the chosen template are absent
    #[error("Missing settings: {0}")]
    MissingSettings(String),

    /// Template kind outside the closed set of variants
    #[error("Not supported template: {0}")]
    UnsupportedTemplate(String),

    /// Currency code not present in the minor-unit table
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Font or logo could not be loaded or decoded
    #[error("Asset error: {0}")]
    Asset(String),

    /// PDF serialization failure
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Order data that cannot be printed, e.g. a line total out of range
    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    /// Document number format without the number placeholder
    #[error("Invalid number format: {0}")]
    InvalidNumberFormat(String),

    /// JSON input could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DocsmithError {
    /// Buffer handed back to legacy callers when a render cannot be produced
    /// for an unknown template kind.
    pub fn fallback_buffer(&self) -> Option<Vec<u8>> {
        match self {
            DocsmithError::UnsupportedTemplate(_) => Some(UNSUPPORTED_TEMPLATE_PAYLOAD.to_vec()),
            _ => None,
        }
    }
}

impl From<lopdf::Error> for DocsmithError {
    fn from(err: lopdf::Error) -> Self {
        DocsmithError::Pdf(err.to_string())
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, DocsmithError>;
