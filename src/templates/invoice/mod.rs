//! Invoice layouts.

pub mod arabic_parts;
mod table;

pub use table::invoice_table;

use super::geometry::Geometry;
use super::parts::{INVOICE_LABELS, customer_info, document_info, header, logo_header};
use super::{
    RenderInput, Template, Validation, pdf_info, render_latin, validate_store_address,
    validate_store_address_and_logo,
};
use crate::canvas::{Canvas, Cursor, PdfCanvas};
use crate::error::{DocsmithError, Result};
use crate::fonts::FontSet;
use crate::ir::ImageData;
use crate::model::DocumentSettings;

const TITLE: &str = "Invoice";

/// Company name header on a Letter page.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicInvoice;

/// Store logo in place of the company name.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicLogoInvoice;

/// Arabic labels on A4, set in the configured Arabic family.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicArabicInvoice;

impl BasicInvoice {
    pub(crate) fn draw(canvas: &mut impl Canvas, input: &RenderInput<'_>) -> Cursor {
        let g = &Geometry::LETTER;
        let address = input.settings.address();
        let mut y = header(canvas, g.start, &address, g);
        y = document_info(canvas, y, &INVOICE_LABELS, input.document, g);
        y = customer_info(canvas, y, input.order, g);
        invoice_table(canvas, y, input.order)
    }
}

impl Template for BasicInvoice {
    fn validate(&self, settings: &DocumentSettings) -> Validation {
        validate_store_address(settings)
    }

    fn render(&self, input: &RenderInput<'_>) -> Result<Vec<u8>> {
        render_latin(input, Geometry::LETTER.page, TITLE, |canvas| {
            Self::draw(canvas, input)
        })
    }
}

impl BasicLogoInvoice {
    pub(crate) fn draw(
        canvas: &mut impl Canvas,
        input: &RenderInput<'_>,
        logo: &ImageData,
    ) -> Cursor {
        let g = &Geometry::LETTER;
        let address = input.settings.address();
        let mut y = logo_header(canvas, g.start, &address, logo, g);
        y = document_info(canvas, y, &INVOICE_LABELS, input.document, g);
        y = customer_info(canvas, y, input.order, g);
        invoice_table(canvas, y, input.order)
    }
}

impl Template for BasicLogoInvoice {
    fn validate(&self, settings: &DocumentSettings) -> Validation {
        validate_store_address_and_logo(settings)
    }

    fn render(&self, input: &RenderInput<'_>) -> Result<Vec<u8>> {
        let bytes = input
            .store
            .logo
            .as_deref()
            .ok_or_else(|| DocsmithError::Asset("store logo has not been fetched".into()))?;
        let logo = ImageData::decode(bytes)?;

        render_latin(input, Geometry::LETTER.page, TITLE, |canvas| {
            Self::draw(canvas, input, &logo)
        })
    }
}

impl BasicArabicInvoice {
    pub(crate) fn draw(canvas: &mut impl Canvas, input: &RenderInput<'_>) -> Cursor {
        let address = input.settings.address();
        let mut y = arabic_parts::header(canvas, 50.0, &address);
        y = arabic_parts::invoice_info(canvas, y, input.document);
        y = arabic_parts::customer_info(canvas, y, input.order);
        arabic_parts::invoice_table(canvas, y, input.order)
    }
}

impl Template for BasicArabicInvoice {
    fn validate(&self, settings: &DocumentSettings) -> Validation {
        validate_store_address(settings)
    }

    fn render(&self, input: &RenderInput<'_>) -> Result<Vec<u8>> {
        input.order.check_line_totals()?;
        let family = &input.config.arabic_family;
        let fonts = FontSet::load_family(&input.config.font_dir, family)?;
        let mut canvas = PdfCanvas::new(arabic_parts::PAGE, fonts);
        let end = Self::draw(&mut canvas, input);
        if let Some(missing) = canvas.unencodable_text() {
            log::warn!("No glyphs for {:?} in {}", missing, family.regular);
        }
        log::debug!(
            "Arabic invoice {} laid out on {} pages, content ends at {:.1}",
            input.document.display_number,
            canvas.program().page_count(),
            end
        );
        canvas.finish(&pdf_info(TITLE, input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::ir::Op;
    use crate::model::{Address, InvoiceData, LineItem, Order, StoreAddress, StoreDetail};
    use chrono::{TimeZone, Utc};
    use std::io::Cursor as IoCursor;

    fn settings() -> DocumentSettings {
        DocumentSettings {
            store_address: Some(StoreAddress {
                company: Some("ACME".into()),
                address_1: Some("1 Main St".into()),
                city: Some("Springfield".into()),
                postal_code: Some("12345".into()),
            }),
            store_logo_source: Some("logo.png".into()),
            ..Default::default()
        }
    }

    fn order() -> Order {
        Order {
            id: "order_01".into(),
            currency_code: "usd".into(),
            items: vec![LineItem::new("Shirt", 1000, 2).subtitle("Large")],
            shipping_address: Some(Address {
                first_name: Some("Jane".into()),
                last_name: Some("Doe".into()),
                city: Some("Berlin".into()),
                postal_code: Some("10115".into()),
                address_1: Some("Unter den Linden 1".into()),
                ..Default::default()
            }),
            shipping_total: 500i64.into(),
            tax_total: 150i64.into(),
            total: 3150i64.into(),
            ..Default::default()
        }
    }

    fn invoice() -> InvoiceData {
        InvoiceData {
            display_number: "INV-0001".into(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap(),
        }
    }

    fn png_logo() -> Vec<u8> {
        let image = image::RgbaImage::from_pixel(40, 20, image::Rgba([200, 30, 30, 255]));
        let mut bytes = IoCursor::new(Vec::new());
        image.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_basic_invoice_renders_pdf() {
        let (settings, order, invoice) = (settings(), order(), invoice());
        let store = StoreDetail::default();
        let config = RenderConfig::default();
        let input = RenderInput {
            settings: &settings,
            document: invoice.heading(),
            order: &order,
            store: &store,
            config: &config,
        };
        let pdf = BasicInvoice.render(&input).unwrap();
        assert!(pdf.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_basic_invoice_section_order() {
        let (settings, order, invoice) = (settings(), order(), invoice());
        let store = StoreDetail::default();
        let config = RenderConfig::default();
        let input = RenderInput {
            settings: &settings,
            document: invoice.heading(),
            order: &order,
            store: &store,
            config: &config,
        };
        let mut canvas = PdfCanvas::new(Geometry::LETTER.page, FontSet::helvetica());
        BasicInvoice::draw(&mut canvas, &input);

        let y_of = |needle: &str| {
            canvas.program().iter().find_map(|op| match op {
                Op::Text { y, text, .. } if text == needle => Some(*y),
                _ => None,
            })
        };
        let title = y_of("Invoice").unwrap();
        let ship_to = y_of("Ship to:").unwrap();
        let total = y_of("31.50 USD").unwrap();
        assert!(title < ship_to && ship_to < total);
        assert!(y_of("INV-0001").is_some());
    }

    #[test]
    fn test_logo_invoice_requires_fetched_logo() {
        let (settings, order, invoice) = (settings(), order(), invoice());
        let store = StoreDetail::default();
        let config = RenderConfig::default();
        let input = RenderInput {
            settings: &settings,
            document: invoice.heading(),
            order: &order,
            store: &store,
            config: &config,
        };
        let err = BasicLogoInvoice.render(&input).unwrap_err();
        assert!(matches!(err, DocsmithError::Asset(_)));
    }

    #[test]
    fn test_logo_invoice_embeds_image() {
        let (settings, order, invoice) = (settings(), order(), invoice());
        let store = StoreDetail::with_logo(png_logo());
        let config = RenderConfig::default();
        let input = RenderInput {
            settings: &settings,
            document: invoice.heading(),
            order: &order,
            store: &store,
            config: &config,
        };
        let pdf = BasicLogoInvoice.render(&input).unwrap();
        let text = String::from_utf8_lossy(&pdf);
        assert!(text.contains("/XObject"));
        assert!(text.contains("/Im1"));
    }

    #[test]
    fn test_arabic_invoice_without_fonts() {
        let dir = tempfile::tempdir().unwrap();
        let (settings, order, invoice) = (settings(), order(), invoice());
        let store = StoreDetail::default();
        let config = RenderConfig::default().with_font_dir(dir.path());
        let input = RenderInput {
            settings: &settings,
            document: invoice.heading(),
            order: &order,
            store: &store,
            config: &config,
        };
        let err = BasicArabicInvoice.render(&input).unwrap_err();
        assert!(matches!(err, DocsmithError::Asset(_)));
    }

    #[test]
    fn test_arabic_layout_on_standard_fonts() {
        let (settings, order, invoice) = (settings(), order(), invoice());
        let store = StoreDetail::default();
        let config = RenderConfig::default();
        let input = RenderInput {
            settings: &settings,
            document: invoice.heading(),
            order: &order,
            store: &store,
            config: &config,
        };
        let mut canvas = PdfCanvas::new(arabic_parts::PAGE, FontSet::helvetica());
        let end = BasicArabicInvoice::draw(&mut canvas, &input);
        assert!(end > 300.0);
        assert!(canvas.program().texts().any(|t| t == "31.50 USD"));
        assert!(canvas.program().texts().any(|t| t.contains("INV-0001")));
    }

    #[test]
    fn test_arabic_invoice_with_bundled_fonts() {
        let (settings, order, invoice) = (settings(), order(), invoice());
        let store = StoreDetail::default();
        let config = RenderConfig::default();
        let input = RenderInput {
            settings: &settings,
            document: invoice.heading(),
            order: &order,
            store: &store,
            config: &config,
        };
        let pdf = BasicArabicInvoice.render(&input).unwrap();
        let doc = lopdf::Document::load_mem(&pdf).unwrap();
        let text = doc.extract_text(&[1]).unwrap();
        assert!(text.contains("31.50 USD"), "{}", text);
        assert!(text.contains("1/15/2024"), "{}", text);
        assert!(!text.contains("4202"));
    }

    #[test]
    fn test_overflowing_line_total_is_rejected() {
        let (settings, mut order, invoice) = (settings(), order(), invoice());
        order.items[0].raw_unit_price = Some(rust_decimal::Decimal::MAX.into());
        let store = StoreDetail::default();
        let config = RenderConfig::default();
        let input = RenderInput {
            settings: &settings,
            document: invoice.heading(),
            order: &order,
            store: &store,
            config: &config,
        };
        for template in [&BasicInvoice as &dyn Template, &BasicArabicInvoice] {
            let err = template.render(&input).unwrap_err();
            assert!(matches!(err, DocsmithError::InvalidOrder(_)));
        }
    }

    #[test]
    fn test_validation_per_layout() {
        let mut settings = settings();
        assert!(BasicInvoice.validate(&settings).ok);
        assert!(BasicLogoInvoice.validate(&settings).ok);
        assert!(BasicArabicInvoice.validate(&settings).ok);

        settings.store_logo_source = None;
        assert!(BasicInvoice.validate(&settings).ok);
        assert!(!BasicLogoInvoice.validate(&settings).ok);
    }
}
