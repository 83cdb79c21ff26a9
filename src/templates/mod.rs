//! # Templates
//!
//! The closed set of document layouts.
//!
//! | Document | Kind | Page | Notes |
//! |----------|------|------|-------|
//! | Invoice | `BASIC` | Letter | Helvetica |
//! | Invoice | `BASIC_LOGO` | Letter | store logo in the header |
//! | Invoice | `BASIC_ARABIC` | A4 | embedded Arabic family, right-to-left labels |
//! | Packing slip | `BASIC` | Letter | no prices |
//! | Packing slip | `BASIC_SMALL` | A6 | compact label size |
//!
//! Every template validates the settings it needs and renders the same
//! pipeline: header → document info → customer info → table, each section
//! returning the cursor the next one starts at. Long tables continue on
//! further pages.
//!
//! Latin layouts start on Helvetica. When a name or address holds characters
//! outside WinAnsi, the layout is drawn again with the configured Latin
//! family embedded.

pub mod geometry;
pub mod invoice;
pub mod packing_slip;
pub mod parts;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::canvas::{Cursor, PageSetup, PdfCanvas};
use crate::config::RenderConfig;
use crate::error::{DocsmithError, Result};
use crate::fonts::FontSet;
use crate::ir::PdfInfo;
use crate::model::{DocumentHeading, DocumentSettings, Order, StoreDetail};

/// Validation message for kinds outside the supported set.
pub const UNSUPPORTED_TEMPLATE_MESSAGE: &str = "Not supported template";

/// Invoice layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceTemplateKind {
    #[default]
    Basic,
    BasicLogo,
    BasicArabic,
}

impl InvoiceTemplateKind {
    pub const ALL: [InvoiceTemplateKind; 3] = [
        InvoiceTemplateKind::Basic,
        InvoiceTemplateKind::BasicLogo,
        InvoiceTemplateKind::BasicArabic,
    ];

    /// Stored name, e.g. `BASIC_LOGO`.
    pub fn name(&self) -> &'static str {
        match self {
            InvoiceTemplateKind::Basic => "BASIC",
            InvoiceTemplateKind::BasicLogo => "BASIC_LOGO",
            InvoiceTemplateKind::BasicArabic => "BASIC_ARABIC",
        }
    }

    /// Layout implementing this kind.
    pub fn template(&self) -> &'static dyn Template {
        match self {
            InvoiceTemplateKind::Basic => &invoice::BasicInvoice,
            InvoiceTemplateKind::BasicLogo => &invoice::BasicLogoInvoice,
            InvoiceTemplateKind::BasicArabic => &invoice::BasicArabicInvoice,
        }
    }
}

/// Packing slip layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackingSlipTemplateKind {
    #[default]
    Basic,
    BasicSmall,
}

impl PackingSlipTemplateKind {
    pub const ALL: [PackingSlipTemplateKind; 2] =
        [PackingSlipTemplateKind::Basic, PackingSlipTemplateKind::BasicSmall];

    pub fn name(&self) -> &'static str {
        match self {
            PackingSlipTemplateKind::Basic => "BASIC",
            PackingSlipTemplateKind::BasicSmall => "BASIC_SMALL",
        }
    }

    pub fn template(&self) -> &'static dyn Template {
        match self {
            PackingSlipTemplateKind::Basic => &packing_slip::BasicPackingSlip,
            PackingSlipTemplateKind::BasicSmall => &packing_slip::BasicSmallPackingSlip,
        }
    }
}

impl fmt::Display for InvoiceTemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for PackingSlipTemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Normalize user input: `basic-logo` and `Basic_Logo` both mean `BASIC_LOGO`.
fn normalize_kind(s: &str) -> String {
    s.trim().to_ascii_uppercase().replace('-', "_")
}

impl FromStr for InvoiceTemplateKind {
    type Err = DocsmithError;

    fn from_str(s: &str) -> Result<Self> {
        let name = normalize_kind(s);
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| DocsmithError::UnsupportedTemplate(s.to_string()))
    }
}

impl FromStr for PackingSlipTemplateKind {
    type Err = DocsmithError;

    fn from_str(s: &str) -> Result<Self> {
        let name = normalize_kind(s);
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| DocsmithError::UnsupportedTemplate(s.to_string()))
    }
}

/// Pick the kind to render: a per-request override (previews) wins over the
/// stored setting, which wins over `Basic`.
pub fn resolve_kind<K: Copy + Default>(override_kind: Option<K>, stored: Option<K>) -> K {
    override_kind.or(stored).unwrap_or_default()
}

/// Outcome of checking settings against a template's needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    pub ok: bool,
    pub message: String,
}

impl Validation {
    pub fn ok() -> Self {
        Self {
            ok: true,
            message: String::new(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }

    /// Convert a failure into [`DocsmithError::MissingSettings`].
    pub fn into_result(self) -> Result<()> {
        if self.ok {
            Ok(())
        } else {
            Err(DocsmithError::MissingSettings(self.message))
        }
    }
}

/// Everything a template reads while rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub settings: &'a DocumentSettings,
    pub document: DocumentHeading<'a>,
    pub order: &'a Order,
    pub store: &'a StoreDetail,
    pub config: &'a RenderConfig,
}

/// A document layout.
pub trait Template: Send + Sync {
    /// Check that every setting the layout prints is present.
    fn validate(&self, settings: &DocumentSettings) -> Validation;

    /// Render a complete PDF.
    fn render(&self, input: &RenderInput<'_>) -> Result<Vec<u8>>;
}

/// Document metadata: title is the document label plus its number.
pub(crate) fn pdf_info(title: &str, input: &RenderInput<'_>) -> PdfInfo {
    PdfInfo {
        title: format!("{} {}", title, input.document.display_number),
        creator: input.config.creator.clone(),
    }
}

/// Render a Latin-script layout, embedding the Latin family only when
/// Helvetica cannot encode what was drawn.
pub(crate) fn render_latin<F>(
    input: &RenderInput<'_>,
    page: PageSetup,
    title: &str,
    draw: F,
) -> Result<Vec<u8>>
where
    F: Fn(&mut PdfCanvas) -> Cursor,
{
    input.order.check_line_totals()?;

    let mut canvas = PdfCanvas::new(page, FontSet::helvetica());
    let mut end = draw(&mut canvas);
    if let Some(text) = canvas.unencodable_text().map(str::to_string) {
        let family = &input.config.latin_family;
        log::debug!("{:?} is outside WinAnsi, embedding {}", text, family.regular);
        canvas = PdfCanvas::new(page, FontSet::load_family(&input.config.font_dir, family)?);
        end = draw(&mut canvas);
        if let Some(missing) = canvas.unencodable_text() {
            log::warn!("No glyphs for {:?} in {}", missing, family.regular);
        }
    }

    log::debug!(
        "{} {} laid out in {} ops on {} pages, content ends at {:.1}",
        title,
        input.document.display_number,
        canvas.program().len(),
        canvas.program().page_count(),
        end
    );
    canvas.finish(&pdf_info(title, input))
}

/// True when the value is present and not blank.
fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// Validation shared by layouts that print the full store address.
pub(crate) fn validate_store_address(settings: &DocumentSettings) -> Validation {
    let complete = settings.store_address.as_ref().is_some_and(|address| {
        present(&address.company)
            && present(&address.address_1)
            && present(&address.city)
            && present(&address.postal_code)
    });
    if complete {
        Validation::ok()
    } else {
        Validation::failed(
            "Not all settings are defined to generate template. Following settings are checked: company, address, city, postal_code",
        )
    }
}

/// Store address plus a logo source.
pub(crate) fn validate_store_address_and_logo(settings: &DocumentSettings) -> Validation {
    if validate_store_address(settings).ok && present(&settings.store_logo_source) {
        Validation::ok()
    } else {
        Validation::failed(
            "Not all settings are defined to generate template. Following settings are checked: company, address, city, postal_code, logo",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StoreAddress;

    fn full_settings() -> DocumentSettings {
        DocumentSettings {
            store_address: Some(StoreAddress {
                company: Some("ACME".into()),
                address_1: Some("1 Main St".into()),
                city: Some("Springfield".into()),
                postal_code: Some("12345".into()),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_kind_serde_names() {
        assert_eq!(
            serde_json::to_string(&InvoiceTemplateKind::BasicArabic).unwrap(),
            "\"BASIC_ARABIC\""
        );
        let kind: PackingSlipTemplateKind = serde_json::from_str("\"BASIC_SMALL\"").unwrap();
        assert_eq!(kind, PackingSlipTemplateKind::BasicSmall);
        assert!(serde_json::from_str::<InvoiceTemplateKind>("\"FANCY\"").is_err());
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!(
            "basic-logo".parse::<InvoiceTemplateKind>().unwrap(),
            InvoiceTemplateKind::BasicLogo
        );
        assert_eq!(
            "BASIC".parse::<PackingSlipTemplateKind>().unwrap(),
            PackingSlipTemplateKind::Basic
        );
        let err = "FANCY".parse::<InvoiceTemplateKind>().unwrap_err();
        assert!(matches!(err, DocsmithError::UnsupportedTemplate(k) if k == "FANCY"));
    }

    #[test]
    fn test_display_matches_name() {
        for kind in InvoiceTemplateKind::ALL {
            assert_eq!(kind.to_string().parse::<InvoiceTemplateKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_resolve_kind_precedence() {
        use InvoiceTemplateKind::*;
        assert_eq!(resolve_kind(Some(BasicArabic), Some(BasicLogo)), BasicArabic);
        assert_eq!(resolve_kind(None, Some(BasicLogo)), BasicLogo);
        assert_eq!(resolve_kind::<InvoiceTemplateKind>(None, None), Basic);
    }

    #[test]
    fn test_store_address_validation() {
        assert_eq!(validate_store_address(&full_settings()), Validation::ok());

        let mut settings = full_settings();
        if let Some(address) = settings.store_address.as_mut() {
            address.city = None;
        }
        let result = validate_store_address(&settings);
        assert!(!result.ok);
        assert!(result.message.contains("city"));
    }

    #[test]
    fn test_blank_field_is_missing() {
        let mut settings = full_settings();
        if let Some(address) = settings.store_address.as_mut() {
            address.company = Some("   ".into());
        }
        assert!(!validate_store_address(&settings).ok);
    }

    #[test]
    fn test_logo_validation() {
        let mut settings = full_settings();
        let result = validate_store_address_and_logo(&settings);
        assert!(!result.ok);
        assert!(result.message.contains("logo"));

        settings.store_logo_source = Some("https://example.com/logo.png".into());
        assert!(validate_store_address_and_logo(&settings).ok);
    }

    #[test]
    fn test_validation_into_result() {
        assert!(Validation::ok().into_result().is_ok());
        let err = Validation::failed("missing city").into_result().unwrap_err();
        assert!(matches!(err, DocsmithError::MissingSettings(m) if m == "missing city"));
    }
}
