//! Item table of a packing slip: what is in the box, without prices.

use crate::canvas::{Canvas, Cursor, TextStyle};
use crate::layout::{Column, draw_cell, draw_rule};
use crate::model::Order;
use crate::templates::geometry::Geometry;

fn columns(g: &Geometry) -> [Column; 3] {
    [
        Column::left(g.left),
        Column::left(g.description_x),
        Column::right(g.second_column_x),
    ]
}

fn table_row(
    canvas: &mut impl Canvas,
    y: Cursor,
    cells: [&str; 3],
    style: &TextStyle,
    g: &Geometry,
) {
    for (column, text) in columns(g).into_iter().zip(cells) {
        draw_cell(canvas, column, y, text, style);
    }
}

fn table_header(canvas: &mut impl Canvas, top: Cursor, g: &Geometry) {
    table_row(
        canvas,
        top,
        ["Item", "Description", "Quantity"],
        &TextStyle::bold(g.body_size),
        g,
    );
    draw_rule(canvas, top + g.row_rule_offset, g.rule);
}

/// Header row and one row per item at a fixed pitch. Rows past the bottom
/// margin continue on a new page under a repeated header.
///
/// Returns the cursor one pitch below the last row.
pub fn packing_slip_table(
    canvas: &mut impl Canvas,
    y: Cursor,
    order: &Order,
    g: &Geometry,
) -> Cursor {
    let mut top = y + g.table_offset;
    if let Some(next) = canvas.break_before(top, 2.0 * g.row_pitch) {
        top = next;
    }
    table_header(canvas, top, g);

    let body = TextStyle::regular(g.body_size);
    let mut position = top;
    for item in &order.items {
        position += g.row_pitch;
        if let Some(next) = canvas.break_before(position, g.row_pitch) {
            table_header(canvas, next, g);
            position = next + g.row_pitch;
        }
        table_row(
            canvas,
            position,
            [item.title.as_str(), item.description(), &item.quantity.to_string()],
            &body,
            g,
        );
        draw_rule(canvas, position + g.row_rule_offset, g.rule);
    }

    position + g.row_pitch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::PdfCanvas;
    use crate::fonts::FontSet;
    use crate::ir::Op;
    use crate::model::LineItem;

    fn order() -> Order {
        Order {
            currency_code: "usd".into(),
            items: vec![
                LineItem::new("Shirt", 1000, 2).subtitle("Large"),
                LineItem::new("Socks", 500, 3),
            ],
            total: 3150i64.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_prices_printed() {
        let g = Geometry::LETTER;
        let mut canvas = PdfCanvas::new(g.page, FontSet::helvetica());
        packing_slip_table(&mut canvas, 300.0, &order(), &g);
        let texts: Vec<_> = canvas.program().texts().collect();
        assert!(texts.contains(&"Shirt"));
        assert!(texts.contains(&"Large"));
        assert!(texts.contains(&"3"));
        assert!(!texts.iter().any(|t| t.contains("USD")));
        assert!(!texts.contains(&"Total"));
    }

    #[test]
    fn test_rows_follow_geometry_pitch() {
        for g in [Geometry::LETTER, Geometry::A6] {
            let mut canvas = PdfCanvas::new(g.page, FontSet::helvetica());
            let end = packing_slip_table(&mut canvas, 100.0, &order(), &g);
            let rules: Vec<f32> = canvas
                .program()
                .iter()
                .filter_map(|op| match op {
                    Op::Line { from, .. } => Some(from.1),
                    _ => None,
                })
                .collect();
            let top = 100.0 + g.table_offset;
            assert_eq!(
                rules,
                vec![
                    top + g.row_rule_offset,
                    top + g.row_pitch + g.row_rule_offset,
                    top + 2.0 * g.row_pitch + g.row_rule_offset,
                ]
            );
            assert_eq!(end, top + 3.0 * g.row_pitch);
        }
    }

    #[test]
    fn test_quantity_right_aligned_to_margin() {
        let g = Geometry::A6;
        let mut canvas = PdfCanvas::new(g.page, FontSet::helvetica());
        packing_slip_table(&mut canvas, 100.0, &order(), &g);
        let style = TextStyle::regular(g.body_size);
        let x = canvas
            .program()
            .iter()
            .find_map(|op| match op {
                Op::Text { x, text, .. } if text == "2" => Some(*x),
                _ => None,
            })
            .unwrap();
        let right = g.page.content_right();
        assert!((x + canvas.text_width("2", &style) - right).abs() < 0.01);
    }

    #[test]
    fn test_small_slip_paginates() {
        let g = Geometry::A6;
        let mut canvas = PdfCanvas::new(g.page, FontSet::helvetica());
        let order = Order {
            items: (0..30)
                .map(|i| LineItem::new(format!("Item {}", i + 1), 0, 1))
                .collect(),
            ..Default::default()
        };
        let end = packing_slip_table(&mut canvas, 150.0, &order, &g);

        let program = canvas.program();
        assert!(program.page_count() >= 3);
        assert!(end <= g.page.content_bottom() + g.row_pitch);
        for page in 0..program.page_count() {
            let ops = program.page_ops(page);
            assert!(ops.iter().any(|op| matches!(op, Op::Text { text, .. } if text == "Quantity")));
            assert!(ops.iter().all(|op| match op {
                Op::Text { y, .. } => *y <= g.page.content_bottom(),
                _ => true,
            }));
        }
        assert_eq!(program.texts().filter(|t| t.starts_with("Item ")).count(), 30);
    }
}
