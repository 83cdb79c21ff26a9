//! Store-level document settings.

use serde::{Deserialize, Serialize};

use crate::templates::{InvoiceTemplateKind, PackingSlipTemplateKind};

/// Store address printed in every document header.
///
/// All fields are optional in storage; templates decide which ones they need.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreAddress {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub address_1: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
}

impl StoreAddress {
    /// `city postal_code`, skipping whichever part is missing.
    pub fn city_line(&self) -> String {
        join_present(&[self.city.as_deref(), self.postal_code.as_deref()])
    }
}

/// Document settings as kept by the configuration store.
///
/// JSON shape:
///
/// ```json
/// {
///   "storeAddress": {"company": "ACME", "address_1": "1 Main St", "city": "Springfield", "postal_code": "12345"},
///   "storeLogoSource": "https://example.com/logo.png",
///   "invoiceNumberFormat": "INV-{invoice_number}",
///   "invoiceForcedNumber": 100,
///   "invoiceTemplate": "BASIC_LOGO",
///   "packingSlipTemplate": "BASIC_SMALL"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSettings {
    #[serde(default)]
    pub store_address: Option<StoreAddress>,
    /// URL or file path of the store logo.
    #[serde(default)]
    pub store_logo_source: Option<String>,
    /// Display number format, must contain `{invoice_number}`.
    #[serde(default)]
    pub invoice_number_format: Option<String>,
    /// Number the next invoice is forced to start from.
    #[serde(default)]
    pub invoice_forced_number: Option<u64>,
    #[serde(default)]
    pub invoice_template: Option<InvoiceTemplateKind>,
    #[serde(default)]
    pub packing_slip_template: Option<PackingSlipTemplateKind>,
}

impl DocumentSettings {
    /// Store address, or an empty one when none is configured.
    pub fn address(&self) -> StoreAddress {
        self.store_address.clone().unwrap_or_default()
    }
}

/// Join the non-empty parts with single spaces.
pub(crate) fn join_present(parts: &[Option<&str>]) -> String {
    parts
        .iter()
        .flatten()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_json() {
        let json = r#"{
            "storeAddress": {"company": "ACME", "address_1": "1 Main St", "city": "Springfield", "postal_code": "12345"},
            "storeLogoSource": "https://example.com/logo.png",
            "invoiceTemplate": "BASIC_ARABIC"
        }"#;
        let settings: DocumentSettings = serde_json::from_str(json).unwrap();
        let address = settings.address();
        assert_eq!(address.company.as_deref(), Some("ACME"));
        assert_eq!(address.city_line(), "Springfield 12345");
        assert_eq!(settings.invoice_template, Some(InvoiceTemplateKind::BasicArabic));
        assert!(settings.packing_slip_template.is_none());
    }

    #[test]
    fn test_empty_settings() {
        let settings: DocumentSettings = serde_json::from_str("{}").unwrap();
        assert!(settings.store_address.is_none());
        assert_eq!(settings.address(), StoreAddress::default());
    }

    #[test]
    fn test_city_line_skips_missing_parts() {
        let address = StoreAddress {
            city: Some("Berlin".into()),
            ..Default::default()
        };
        assert_eq!(address.city_line(), "Berlin");
    }
}
