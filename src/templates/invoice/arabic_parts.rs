//! Sections of the Arabic invoice.
//!
//! Labels are Arabic and right-aligned. Amounts and quantities keep
//! left-to-right columns; item and description cells pick their alignment
//! from their own content, so a Latin product name in an Arabic invoice
//! still reads left to right.

use crate::bidi::{Direction, RunOrder, direction_of};
use crate::canvas::{Align, Canvas, Cursor, PageSetup, TextOptions, TextStyle};
use crate::ir::PageSize;
use crate::layout::{Column, RuleSpan, draw_cell, draw_rule};
use crate::model::{Address, DocumentHeading, Order, StoreAddress};
use crate::money::{format_amount, format_amount_from_decimal, format_date_rtl};

/// A4 with a narrow side margin.
pub const PAGE: PageSetup = PageSetup::new(PageSize::A4, 10.0).with_vertical_margin(50.0);

/// Separators run nearly edge to edge.
pub const RULE: RuleSpan = RuleSpan {
    from: 10.0,
    to: 585.0,
};

/// Right-aligned labels start here and run to the margin.
const LABEL_X: f32 = 400.0;

/// Column for free text: aligned by the direction of what it holds.
fn text_column(x: f32, width: f32, text: &str) -> Column {
    let align = match direction_of(text) {
        Direction::Rtl => Align::Right,
        Direction::Ltr => Align::Left,
    };
    Column::left(x).width(width).align(align)
}

// ===== Header =====

/// Company name on the left; company, city line and address on the right.
pub fn header(canvas: &mut impl Canvas, y: Cursor, store: &StoreAddress) -> Cursor {
    let company = store.company.as_deref().unwrap_or_default();
    let street = store.address_1.as_deref().unwrap_or_default();
    let small = TextStyle::regular(12.0);
    let address_style = TextStyle::regular(11.0);

    let company_height = canvas.draw_text(
        company,
        50.0,
        y - 5.0,
        &TextStyle::regular(23.0),
        TextOptions::left().width(200.0),
    );
    canvas.draw_text(company, 200.0, y, &small, TextOptions::right());
    canvas.draw_text(&store.city_line(), 200.0, y + 20.0, &small, TextOptions::right());

    let address_height =
        canvas.measure_text(street, 200.0, &address_style, TextOptions::left().width(150.0));
    canvas.draw_text(
        &format!("العنوان :{}", street),
        200.0,
        y + 40.0,
        &address_style,
        TextOptions::right(),
    );

    (y + company_height).max(y + 40.0 + address_height) + 3.0
}

// ===== Invoice info =====

/// Title, separator, number and right-to-left date.
///
/// The date is stored reversed and the whole line is reversed again when
/// drawn, so it reads `M/D/YYYY` left of the label.
pub fn invoice_info(canvas: &mut impl Canvas, y: Cursor, heading: DocumentHeading<'_>) -> Cursor {
    canvas.draw_text(
        "فاتورة",
        LABEL_X,
        y + 20.0,
        &TextStyle::regular(20.0),
        TextOptions::right(),
    );
    draw_rule(canvas, y + 50.0, RULE);

    let top = y + 70.0;
    let style = TextStyle::regular(13.0);
    canvas.draw_text(
        &format!("الرقم: {}", heading.display_number),
        LABEL_X,
        top,
        &style,
        TextOptions::right(),
    );
    canvas.draw_text(
        &format!("التاريخ: {}", format_date_rtl(heading.created_at)),
        LABEL_X,
        top + 18.0,
        &style,
        TextOptions::right().order(RunOrder::Reversed),
    );

    top + 20.0
}

// ===== Customer info =====

const LINE_HEIGHT: f32 = 20.0;
const BLOCK_SPACING: f32 = 10.0;
const SECTION_SPACING: f32 = 10.0;

/// One address column, right-aligned inside `options`; returns its end.
fn address_block(
    canvas: &mut impl Canvas,
    x: f32,
    top: Cursor,
    title: &str,
    address: &Address,
    options: TextOptions,
) -> Cursor {
    let body = TextStyle::regular(12.0);
    let mut current = top;

    canvas.draw_text(title, x, current, &TextStyle::bold(12.0), options);
    current += LINE_HEIGHT;
    canvas.draw_text(&address.full_name(), x, current, &body, options);
    current += LINE_HEIGHT;
    canvas.draw_text(&address.city_line(), x, current, &body, options);
    current += LINE_HEIGHT;

    let street = address.address_1.as_deref().unwrap_or_default();
    let street_height = canvas.draw_text(street, x, current, &body, options);
    current + street_height + BLOCK_SPACING
}

/// Billing column on the right, shipping column to its left.
pub fn customer_info(canvas: &mut impl Canvas, y: Cursor, order: &Order) -> Cursor {
    canvas.draw_text(
        "بيانات العميل",
        LABEL_X,
        y + 30.0,
        &TextStyle::regular(20.0),
        TextOptions::right(),
    );
    draw_rule(canvas, y + 65.0, RULE);

    let top = y + 80.0;
    let mut end = top;

    if let Some(billing) = &order.billing_address {
        let options = TextOptions::right();
        let block_end = address_block(canvas, 100.0, top, "الفاتورة إلى:", billing, options);
        end = end.max(block_end);
    }
    if let Some(shipping) = &order.shipping_address {
        let options = TextOptions::right().width(150.0);
        let block_end = address_block(canvas, 50.0, top, "الشحن إلى:", shipping, options);
        end = end.max(block_end);
    }

    end + SECTION_SPACING
}

// ===== Table =====

const TABLE_OFFSET: f32 = 15.0;
const ROW_PITCH: f32 = 35.0;
const RULE_OFFSET: f32 = 25.0;
const TOTAL_GAP: f32 = 40.0;
const FONT_SIZE: f32 = 11.0;

const LINE_TOTAL: Column = Column::left(50.0);
const QUANTITY: Column = Column::left(140.0).width(90.0);
const UNIT_COST: Column = Column::left(230.0).width(90.0);

/// Amounts and quantity left to right; item and description by content.
///
/// Cells are `[item, description, unit cost, quantity, line total]`.
fn table_row(canvas: &mut impl Canvas, y: Cursor, cells: [&str; 5], style: &TextStyle) {
    let [item, description, unit_cost, quantity, line_total] = cells;
    draw_cell(canvas, LINE_TOTAL, y, line_total, style);
    draw_cell(canvas, QUANTITY, y, quantity, style);
    draw_cell(canvas, UNIT_COST, y, unit_cost, style);
    draw_cell(canvas, text_column(320.0, 150.0, description), y, description, style);
    draw_cell(canvas, text_column(480.0, 120.0, item), y, item, style);
}

fn table_header(canvas: &mut impl Canvas, top: Cursor) {
    let bold = TextStyle::bold(FONT_SIZE);
    draw_cell(canvas, LINE_TOTAL, top, "المجموع", &bold);
    draw_cell(canvas, QUANTITY, top, "الكمية", &bold);
    draw_cell(canvas, UNIT_COST, top, "سعر الوحدة", &bold);
    draw_cell(canvas, Column::right(250.0).width(150.0), top, "الوصف", &bold);
    draw_cell(canvas, Column::right(450.0).width(120.0), top, "الصنف", &bold);
    draw_rule(canvas, top + RULE_OFFSET, RULE);
}

/// Line items with shipping, tax and total rows.
///
/// Rows sit at a fixed pitch; long titles are not measured. Rows past the
/// bottom margin continue on a new page under a repeated header.
pub fn invoice_table(canvas: &mut impl Canvas, y: Cursor, order: &Order) -> Cursor {
    let currency = order.currency_code.as_str();
    let body = TextStyle::regular(FONT_SIZE);
    let bold = TextStyle::bold(FONT_SIZE);

    let mut top = y + TABLE_OFFSET;
    if let Some(next) = canvas.break_before(top, 2.0 * ROW_PITCH) {
        top = next;
    }
    table_header(canvas, top);

    let mut position = top;
    for item in &order.items {
        position += ROW_PITCH;
        if let Some(next) = canvas.break_before(position, ROW_PITCH) {
            table_header(canvas, next);
            position = next + ROW_PITCH;
        }
        let line_total = item
            .line_total()
            .map(|total| format_amount_from_decimal(total, currency))
            .unwrap_or_default();
        table_row(
            canvas,
            position,
            [
                item.title.as_str(),
                item.description(),
                &format_amount(item.unit_price, currency),
                &item.quantity.to_string(),
                &line_total,
            ],
            &body,
        );
        draw_rule(canvas, position + RULE_OFFSET, RULE);
    }

    let mut shipping_position = position + ROW_PITCH;
    let footer_height = ROW_PITCH + TOTAL_GAP + canvas.line_height(&bold);
    if let Some(next) = canvas.break_before(shipping_position, footer_height) {
        shipping_position = next;
    }
    let shipping = format_amount_from_decimal(order.shipping_total.value(), currency);
    table_row(canvas, shipping_position, ["", "", "الشحن", "", &shipping], &body);

    let tax_position = shipping_position + ROW_PITCH;
    let tax = format_amount_from_decimal(order.tax_total.value(), currency);
    table_row(canvas, tax_position, ["", "", "الضريبة", "", &tax], &body);

    let total_position = tax_position + TOTAL_GAP;
    let total = format_amount_from_decimal(order.total.value(), currency);
    table_row(canvas, total_position, ["", "", "الإجمالي", "", &total], &bold);

    total_position + canvas.line_height(&bold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bidi::visual_order;
    use crate::canvas::PdfCanvas;
    use crate::fonts::{FontSet, Weight};
    use crate::ir::Op;
    use crate::model::LineItem;
    use chrono::{TimeZone, Utc};

    // Arabic glyphs fall back to a default width in Helvetica, which is
    // enough to check positions without shipping font files.
    fn canvas() -> PdfCanvas {
        PdfCanvas::new(PAGE, FontSet::helvetica())
    }

    fn text_at(canvas: &PdfCanvas, needle: &str) -> Option<(f32, f32, Weight)> {
        canvas.program().iter().find_map(|op| match op {
            Op::Text {
                x, y, text, weight, ..
            } if text == needle => Some((*x, *y, *weight)),
            _ => None,
        })
    }

    fn address(first: &str, street: &str) -> Address {
        Address {
            first_name: Some(first.into()),
            last_name: Some("Saleh".into()),
            city: Some("Dubai".into()),
            postal_code: Some("00000".into()),
            address_1: Some(street.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_text_column_direction() {
        assert_eq!(text_column(320.0, 150.0, "قميص").align, Align::Right);
        assert_eq!(text_column(320.0, 150.0, "Shirt").align, Align::Left);
    }

    #[test]
    fn test_header_returns_measured_end() {
        let mut canvas = canvas();
        let store = StoreAddress {
            company: Some("Souq".into()),
            address_1: Some("Sheikh Zayed Road".into()),
            city: Some("Dubai".into()),
            postal_code: Some("00000".into()),
        };
        let end = header(&mut canvas, 50.0, &store);
        let address_height = canvas.line_height(&TextStyle::regular(11.0));
        assert!((end - (50.0 + 40.0 + address_height + 3.0)).abs() < 0.001);
    }

    #[test]
    fn test_invoice_info_uses_reversed_date() {
        let mut canvas = canvas();
        let created = Utc.with_ymd_and_hms(2024, 12, 25, 9, 0, 0).unwrap();
        let heading = DocumentHeading {
            display_number: "INV-7",
            created_at: &created,
        };
        let end = invoice_info(&mut canvas, 100.0, heading);
        assert_eq!(end, 190.0);
        let date_line = canvas
            .program()
            .texts()
            .find(|t| t.contains("2024"))
            .unwrap();
        assert!(date_line.starts_with("12/25/2024 :"), "{}", date_line);
        assert!(!date_line.contains("4202"));
    }

    #[test]
    fn test_customer_columns() {
        let mut canvas = canvas();
        let order = Order {
            billing_address: Some(address("Omar", "Street 1")),
            shipping_address: Some(address("Lina", "Street 2")),
            ..Default::default()
        };
        let end = customer_info(&mut canvas, 100.0, &order);
        let body = TextStyle::regular(12.0);
        let street_height = canvas.line_height(&body);
        let expected = 180.0 + 3.0 * LINE_HEIGHT + street_height + BLOCK_SPACING + SECTION_SPACING;
        assert!((end - expected).abs() < 0.001);

        // Shipping column ends at x = 200
        let (x, _, _) = text_at(&canvas, "Lina Saleh").unwrap();
        assert!((x + canvas.text_width("Lina Saleh", &body) - 200.0).abs() < 0.01);
    }

    #[test]
    fn test_customer_info_without_addresses() {
        let mut canvas = canvas();
        let end = customer_info(&mut canvas, 100.0, &Order::default());
        assert_eq!(end, 100.0 + 80.0 + SECTION_SPACING);
    }

    #[test]
    fn test_table_rows_and_directions() {
        let mut canvas = canvas();
        let order = Order {
            currency_code: "kwd".into(),
            items: vec![
                LineItem::new("قميص", 1500, 2).subtitle("Cotton"),
                LineItem::new("Hat", 250, 1).subtitle("أحمر"),
            ],
            shipping_total: 1000i64.into(),
            tax_total: 0i64.into(),
            total: 4250i64.into(),
            ..Default::default()
        };
        invoice_table(&mut canvas, 300.0, &order);

        let (x, y, _) = text_at(&canvas, "1.500 KWD").unwrap();
        assert_eq!(x, 230.0);
        assert!(y > 350.0 && y < 385.0);
        assert!(text_at(&canvas, "3.000 KWD").is_some());

        // Latin description stays left; Arabic item is right-aligned in its box
        let (desc_x, _, _) = text_at(&canvas, "Cotton").unwrap();
        assert_eq!(desc_x, 320.0);
        let item = visual_order("قميص");
        let (item_x, _, _) = text_at(&canvas, &item).unwrap();
        let body = TextStyle::regular(FONT_SIZE);
        assert!((item_x + canvas.text_width(&item, &body) - 600.0).abs() < 0.01);

        let (_, _, weight) = text_at(&canvas, "4.250 KWD").unwrap();
        assert_eq!(weight, Weight::Bold);
    }

    #[test]
    fn test_long_table_continues_on_new_pages() {
        let mut canvas = canvas();
        let order = Order {
            currency_code: "usd".into(),
            items: (0..30)
                .map(|i| LineItem::new(format!("Item {}", i + 1), 100, 1))
                .collect(),
            total: 3000i64.into(),
            ..Default::default()
        };
        invoice_table(&mut canvas, 400.0, &order);

        let program = canvas.program();
        assert!(program.page_count() >= 2);
        let bottom = PAGE.content_bottom();
        assert!(program.iter().all(|op| match op {
            Op::Text { y, .. } => *y <= bottom,
            _ => true,
        }));
        let header = visual_order("الصنف");
        for page in 0..program.page_count() {
            assert!(program.page_ops(page).iter().any(|op| matches!(op, Op::Text { text, .. } if *text == header)));
        }
        let last = program.page_ops(program.page_count() - 1);
        assert!(last.iter().any(|op| matches!(op, Op::Text { text, .. } if text == "30.00 USD")));
    }
}
