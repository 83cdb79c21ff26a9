//! # Template Dispatcher
//!
//! Maps a template kind to its layout, validates the settings it needs and
//! renders. Typed kinds cannot be unknown; the `*_for_kind_name` entry points
//! accept the raw stored string and report kinds outside the closed set.
//!
//! ## Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use docsmith::config::RenderConfig;
//! use docsmith::generator::generate_invoice;
//! use docsmith::model::{DocumentSettings, InvoiceData, LineItem, Order, StoreAddress, StoreDetail};
//! use docsmith::templates::InvoiceTemplateKind;
//!
//! let settings = DocumentSettings {
//!     store_address: Some(StoreAddress {
//!         company: Some("ACME".into()),
//!         address_1: Some("1 Main St".into()),
//!         city: Some("Springfield".into()),
//!         postal_code: Some("12345".into()),
//!     }),
//!     ..Default::default()
//! };
//! let invoice = InvoiceData {
//!     display_number: "INV-1".into(),
//!     created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
//! };
//! let order = Order {
//!     currency_code: "usd".into(),
//!     items: vec![LineItem::new("Shirt", 1000, 1)],
//!     ..Default::default()
//! };
//!
//! let pdf = generate_invoice(
//!     InvoiceTemplateKind::Basic,
//!     &settings,
//!     &invoice,
//!     &order,
//!     &StoreDetail::default(),
//!     &RenderConfig::default(),
//! )
//! .unwrap();
//! assert!(pdf.starts_with(b"%PDF-"));
//! ```

use std::fmt;
use std::str::FromStr;

use crate::config::RenderConfig;
use crate::error::{DocsmithError, Result};
use crate::model::{
    DocumentHeading, DocumentSettings, InvoiceData, Order, PackingSlipData, StoreDetail,
};
use crate::templates::{
    InvoiceTemplateKind, PackingSlipTemplateKind, RenderInput, Template,
    UNSUPPORTED_TEMPLATE_MESSAGE, Validation,
};

/// Which document family a raw kind name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentType {
    Invoice,
    PackingSlip,
}

impl DocumentType {
    pub fn name(&self) -> &'static str {
        match self {
            DocumentType::Invoice => "invoice",
            DocumentType::PackingSlip => "packing-slip",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DocumentType {
    type Err = DocsmithError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "invoice" => Ok(DocumentType::Invoice),
            "packing-slip" => Ok(DocumentType::PackingSlip),
            _ => Err(DocsmithError::UnsupportedTemplate(s.to_string())),
        }
    }
}

/// Check `settings` against an invoice layout.
pub fn validate_invoice_input(kind: InvoiceTemplateKind, settings: &DocumentSettings) -> Validation {
    kind.template().validate(settings)
}

/// Check `settings` against a packing slip layout.
pub fn validate_packing_slip_input(
    kind: PackingSlipTemplateKind,
    settings: &DocumentSettings,
) -> Validation {
    kind.template().validate(settings)
}

/// Resolve a raw kind name to its layout.
fn template_for_name(document: DocumentType, raw_kind: &str) -> Result<&'static dyn Template> {
    match document {
        DocumentType::Invoice => raw_kind.parse::<InvoiceTemplateKind>().map(|k| k.template()),
        DocumentType::PackingSlip => raw_kind
            .parse::<PackingSlipTemplateKind>()
            .map(|k| k.template()),
    }
}

/// Validate against a kind given by name.
///
/// Kinds outside the supported set fail with `"Not supported template"`.
pub fn validate_input_for_kind(
    document: DocumentType,
    raw_kind: &str,
    settings: &DocumentSettings,
) -> Validation {
    match template_for_name(document, raw_kind) {
        Ok(template) => template.validate(settings),
        Err(_) => Validation::failed(UNSUPPORTED_TEMPLATE_MESSAGE),
    }
}

fn generate(
    template: &dyn Template,
    settings: &DocumentSettings,
    document: DocumentHeading<'_>,
    order: &Order,
    store: &StoreDetail,
    config: &RenderConfig,
) -> Result<Vec<u8>> {
    template.validate(settings).into_result()?;
    let input = RenderInput {
        settings,
        document,
        order,
        store,
        config,
    };
    let pdf = template.render(&input)?;
    log::info!(
        "Rendered {} for order {:?} ({} bytes)",
        document.display_number,
        order.id,
        pdf.len()
    );
    Ok(pdf)
}

/// Validate, then render an invoice.
pub fn generate_invoice(
    kind: InvoiceTemplateKind,
    settings: &DocumentSettings,
    invoice: &InvoiceData,
    order: &Order,
    store: &StoreDetail,
    config: &RenderConfig,
) -> Result<Vec<u8>> {
    log::debug!("Generating invoice with template {}", kind);
    generate(kind.template(), settings, invoice.heading(), order, store, config)
}

/// Validate, then render a packing slip.
pub fn generate_packing_slip(
    kind: PackingSlipTemplateKind,
    settings: &DocumentSettings,
    packing_slip: &PackingSlipData,
    order: &Order,
    store: &StoreDetail,
    config: &RenderConfig,
) -> Result<Vec<u8>> {
    log::debug!("Generating packing slip with template {}", kind);
    generate(kind.template(), settings, packing_slip.heading(), order, store, config)
}

/// Render a document whose kind is only known by name.
///
/// Unknown kinds return [`DocsmithError::UnsupportedTemplate`]; callers that
/// need the old placeholder buffer can take it from
/// [`DocsmithError::fallback_buffer`].
pub fn generate_for_kind_name(
    document_type: DocumentType,
    raw_kind: &str,
    settings: &DocumentSettings,
    document: DocumentHeading<'_>,
    order: &Order,
    store: &StoreDetail,
    config: &RenderConfig,
) -> Result<Vec<u8>> {
    let template = template_for_name(document_type, raw_kind)?;
    generate(template, settings, document, order, store, config)
}
