//! # Layout Primitives
//!
//! Separators and fixed-column table cells shared by all templates.

use crate::canvas::{Align, Canvas, Cursor, Stroke, TextOptions, TextStyle};

/// Horizontal extent of a separator rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleSpan {
    pub from: f32,
    pub to: f32,
}

impl RuleSpan {
    /// Content width of the Latin templates.
    pub const CONTENT: RuleSpan = RuleSpan {
        from: 50.0,
        to: 550.0,
    };
}

/// Gray separator across the standard content width.
pub fn draw_horizontal_rule(canvas: &mut impl Canvas, y: Cursor) {
    draw_rule(canvas, y, RuleSpan::CONTENT);
}

/// Gray separator across `span`.
pub fn draw_rule(canvas: &mut impl Canvas, y: Cursor, span: RuleSpan) {
    canvas.draw_line((span.from, y), (span.to, y), Stroke::RULE);
}

/// A table column at a fixed x offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub x: f32,
    /// Cell width; `None` runs to the right page margin.
    pub width: Option<f32>,
    pub align: Align,
}

impl Column {
    pub const fn left(x: f32) -> Self {
        Self {
            x,
            width: None,
            align: Align::Left,
        }
    }

    pub const fn right(x: f32) -> Self {
        Self {
            x,
            width: None,
            align: Align::Right,
        }
    }

    pub const fn width(self, width: f32) -> Self {
        Self {
            width: Some(width),
            ..self
        }
    }

    pub const fn align(self, align: Align) -> Self {
        Self { align, ..self }
    }

    fn options(&self) -> TextOptions {
        TextOptions {
            width: self.width,
            align: self.align,
            ..TextOptions::default()
        }
    }
}

/// Draw one table cell; returns the height drawn.
pub fn draw_cell(
    canvas: &mut impl Canvas,
    column: Column,
    y: Cursor,
    text: &str,
    style: &TextStyle,
) -> f32 {
    canvas.draw_text(text, column.x, y, style, column.options())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{PageSetup, PdfCanvas};
    use crate::fonts::FontSet;
    use crate::ir::{Color, Op, PageSize};

    fn canvas() -> PdfCanvas {
        PdfCanvas::new(PageSetup::new(PageSize::LETTER, 72.0), FontSet::helvetica())
    }

    #[test]
    fn test_horizontal_rule_spans_content() {
        let mut canvas = canvas();
        draw_horizontal_rule(&mut canvas, 120.0);
        assert_eq!(
            canvas.program().page_ops(0).to_vec(),
            vec![Op::Line {
                from: (50.0, 120.0),
                to: (550.0, 120.0),
                width: 1.0,
                color: Color::RULE,
            }]
        );
    }

    #[test]
    fn test_custom_rule_span() {
        let mut canvas = canvas();
        draw_rule(&mut canvas, 10.0, RuleSpan { from: 10.0, to: 585.0 });
        assert!(matches!(
            canvas.program().page_ops(0)[0],
            Op::Line { from: (10.0, _), to: (585.0, _), .. }
        ));
    }

    #[test]
    fn test_cell_uses_column_box() {
        let mut canvas = canvas();
        let quantity = Column::right(370.0).width(90.0);
        draw_cell(&mut canvas, quantity, 200.0, "12", &TextStyle::regular(10.0));
        let Op::Text { x, .. } = &canvas.program().page_ops(0)[0] else {
            panic!("expected text op");
        };
        assert!(*x > 370.0 && *x < 460.0);
    }
}
