//! Line-item table with shipping, tax and total rows.
//!
//! Rows sit at a fixed pitch. Item titles and descriptions are not measured,
//! so text long enough to wrap runs into the next row. A row that would
//! cross the bottom margin moves to a new page under a repeated header, and
//! the shipping, tax and total rows stay together.

use crate::canvas::{Canvas, Cursor, TextStyle};
use crate::layout::{Column, draw_cell, draw_horizontal_rule};
use crate::model::Order;
use crate::money::{format_amount, format_amount_from_decimal};

const ITEM: Column = Column::left(50.0);
const DESCRIPTION: Column = Column::left(150.0);
const UNIT_COST: Column = Column::right(280.0).width(90.0);
const QUANTITY: Column = Column::right(370.0).width(90.0);
const LINE_TOTAL: Column = Column::right(0.0);

const TABLE_OFFSET: f32 = 30.0;
const ROW_PITCH: f32 = 30.0;
const RULE_OFFSET: f32 = 20.0;
const TAX_GAP: f32 = 20.0;
const TOTAL_GAP: f32 = 25.0;
const FONT_SIZE: f32 = 10.0;

fn table_row(canvas: &mut impl Canvas, y: Cursor, cells: [&str; 5], style: &TextStyle) {
    let columns = [ITEM, DESCRIPTION, UNIT_COST, QUANTITY, LINE_TOTAL];
    for (column, text) in columns.into_iter().zip(cells) {
        draw_cell(canvas, column, y, text, style);
    }
}

fn table_header(canvas: &mut impl Canvas, top: Cursor) {
    table_row(
        canvas,
        top,
        ["Item", "Description", "Unit Cost", "Quantity", "Line Total"],
        &TextStyle::bold(FONT_SIZE),
    );
    draw_horizontal_rule(canvas, top + RULE_OFFSET);
}

/// Draw the table; returns the cursor below the total row.
pub fn invoice_table(canvas: &mut impl Canvas, y: Cursor, order: &Order) -> Cursor {
    let currency = order.currency_code.as_str();
    let body = TextStyle::regular(FONT_SIZE);
    let bold = TextStyle::bold(FONT_SIZE);

    // header plus at least one row
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
        draw_horizontal_rule(canvas, position + RULE_OFFSET);
    }

    let mut shipping_position = position + ROW_PITCH;
    let footer_height = TAX_GAP + TOTAL_GAP + canvas.line_height(&bold);
    if let Some(next) = canvas.break_before(shipping_position, footer_height) {
        shipping_position = next;
    }
    let shipping = format_amount_from_decimal(order.shipping_total.value(), currency);
    table_row(canvas, shipping_position, ["", "", "Shipping", "", &shipping], &body);

    let tax_position = shipping_position + TAX_GAP;
    let tax = format_amount_from_decimal(order.tax_total.value(), currency);
    table_row(canvas, tax_position, ["", "", "Tax", "", &tax], &body);

    let total_position = tax_position + TOTAL_GAP;
    let total = format_amount_from_decimal(order.total.value(), currency);
    table_row(canvas, total_position, ["", "", "Total", "", &total], &bold);

    total_position + canvas.line_height(&bold)
}
