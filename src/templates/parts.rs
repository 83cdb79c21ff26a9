//! Sections shared by the Latin-script invoice and packing slip layouts.

use super::geometry::Geometry;
use crate::canvas::{Canvas, Cursor, TextOptions, TextStyle};
use crate::ir::ImageData;
use crate::layout::draw_rule;
use crate::model::{Address, DocumentHeading, Order, StoreAddress};
use crate::money::format_date;

/// Labels of the document info block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoLabels {
    pub title: &'static str,
    pub number: &'static str,
    pub date: &'static str,
}

pub const INVOICE_LABELS: InfoLabels = InfoLabels {
    title: "Invoice",
    number: "Invoice number:",
    date: "Invoice date:",
};

pub const PACKING_SLIP_LABELS: InfoLabels = InfoLabels {
    title: "Packing slip",
    number: "Slip number:",
    date: "Date:",
};

/// Store company, city line and street, right-aligned.
///
/// Returns the measured height of the street lines, which is what can vary.
fn store_block(canvas: &mut impl Canvas, y: Cursor, store: &StoreAddress, g: &Geometry) -> f32 {
    let style = TextStyle::regular(g.body_size);
    let company = store.company.as_deref().unwrap_or_default();
    let street = store.address_1.as_deref().unwrap_or_default();

    canvas.draw_text(company, g.store_block_x, y, &style, TextOptions::right());
    canvas.draw_text(
        &store.city_line(),
        g.store_block_x,
        y + g.line,
        &style,
        TextOptions::right(),
    );
    canvas.draw_text(
        street,
        g.address_x,
        y + 2.0 * g.line,
        &style,
        TextOptions::right().width(g.address_width),
    )
}

/// Large company name on the left, store block on the right.
///
/// The company name wraps inside its column, so the returned cursor moves
/// down with every extra line it takes.
pub fn header(canvas: &mut impl Canvas, y: Cursor, store: &StoreAddress, g: &Geometry) -> Cursor {
    let company = store.company.as_deref().unwrap_or_default();
    let company_height = canvas.draw_text(
        company,
        g.left,
        y,
        &TextStyle::regular(g.title_size),
        TextOptions::left().width(g.company_width),
    );
    let street_height = store_block(canvas, y, store, g);
    y + company_height.max(street_height) + g.header_padding
}

/// Logo on the left in place of the company name, store block on the right.
pub fn logo_header(
    canvas: &mut impl Canvas,
    y: Cursor,
    store: &StoreAddress,
    logo: &ImageData,
    g: &Geometry,
) -> Cursor {
    let (_, logo_height) = canvas.draw_image(logo, g.left, y, g.logo_fit);
    let street_height = store_block(canvas, y, store, g);
    y + logo_height.max(street_height) + g.header_padding
}

/// Title, separator, number and date. Fixed height.
pub fn document_info(
    canvas: &mut impl Canvas,
    y: Cursor,
    labels: &InfoLabels,
    heading: DocumentHeading<'_>,
    g: &Geometry,
) -> Cursor {
    let body = TextStyle::regular(g.body_size);

    canvas.draw_text(
        labels.title,
        g.left,
        y + g.title_offset,
        &TextStyle::regular(g.title_size),
        TextOptions::left(),
    );
    draw_rule(canvas, y + g.info_rule_offset, g.rule);

    let top = y + g.info_top_offset;
    canvas.draw_text(labels.number, g.left, top, &body, TextOptions::left());
    canvas.draw_text(
        heading.display_number,
        g.value_x,
        top,
        &TextStyle::bold(g.body_size),
        TextOptions::left(),
    );
    canvas.draw_text(labels.date, g.left, top + g.line, &body, TextOptions::left());
    canvas.draw_text(
        &format_date(heading.created_at),
        g.value_x,
        top + g.line,
        &body,
        TextOptions::left(),
    );

    draw_rule(canvas, y + g.info_end_offset, g.rule);
    y + g.info_end_offset
}

/// Title, name, city line and wrapped street; returns the column end.
fn address_column(
    canvas: &mut impl Canvas,
    x: f32,
    top: Cursor,
    title: &str,
    address: &Address,
    g: &Geometry,
) -> Cursor {
    let body = TextStyle::regular(g.body_size);
    let column = TextOptions::left().width(g.column_width);

    canvas.draw_text(title, x, top, &TextStyle::bold(g.body_size), column);
    canvas.draw_text(&address.full_name(), x, top + g.line, &body, column);
    canvas.draw_text(&address.city_line(), x, top + 2.0 * g.line, &body, column);
    let street_height = canvas.draw_text(&address.street(), x, top + 3.0 * g.line, &body, column);
    top + 3.0 * g.line + street_height
}

/// Billing and shipping columns side by side; either may be absent.
pub fn customer_info(canvas: &mut impl Canvas, y: Cursor, order: &Order, g: &Geometry) -> Cursor {
    let top = y + g.section_spacing;
    let mut end: Option<Cursor> = None;

    if let Some(billing) = &order.billing_address {
        let column_end = address_column(canvas, g.left, top, "Bill to:", billing, g);
        end = Some(end.map_or(column_end, |e: f32| e.max(column_end)));
    }
    if let Some(shipping) = &order.shipping_address {
        let column_end = address_column(canvas, g.second_column_x, top, "Ship to:", shipping, g);
        end = Some(end.map_or(column_end, |e: f32| e.max(column_end)));
    }

    match end {
        Some(end) => end + g.section_spacing,
        None => y,
    }
}
