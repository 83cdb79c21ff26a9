//! Per-document data: numbering, timestamps and store details.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Invoice identity as issued by the numbering service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceData {
    /// Number already formatted for display, e.g. `INV-0042`.
    pub display_number: String,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
}

/// Packing slip identity as issued by the numbering service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingSlipData {
    pub display_number: String,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
}

/// Number and date of whatever document is being rendered.
#[derive(Debug, Clone, Copy)]
pub struct DocumentHeading<'a> {
    pub display_number: &'a str,
    pub created_at: &'a DateTime<Utc>,
}

impl InvoiceData {
    pub fn heading(&self) -> DocumentHeading<'_> {
        DocumentHeading {
            display_number: &self.display_number,
            created_at: &self.created_at,
        }
    }
}

impl PackingSlipData {
    pub fn heading(&self) -> DocumentHeading<'_> {
        DocumentHeading {
            display_number: &self.display_number,
            created_at: &self.created_at,
        }
    }
}

/// Store metadata only logo-bearing templates need.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreDetail {
    #[serde(default)]
    pub name: Option<String>,
    /// Encoded logo image (PNG or JPEG), already fetched.
    #[serde(skip)]
    pub logo: Option<Vec<u8>>,
}

impl StoreDetail {
    pub fn with_logo(logo: Vec<u8>) -> Self {
        Self {
            name: None,
            logo: Some(logo),
        }
    }
}
