//! # Canvas
//!
//! The drawing surface section renderers work against. A canvas knows the
//! page geometry and the fonts of the template, measures text with real
//! glyph metrics and records what is drawn as [IR ops](crate::ir::Op).
//!
//! Text placement follows the usual document-layout rules:
//!
//! - `(x, y)` is the top-left corner of the first line; y grows downwards.
//! - Without an explicit width, text may run from `x` to the right page
//!   margin, and wraps there.
//! - Alignment is applied per wrapped line inside that box.
//! - Right-to-left lines are shaped and put into visual order before they are
//!   measured, so alignment uses the width of what is actually drawn.
//!
//! Content that would cross the bottom margin continues on a new page.
//! Sections ask [`Canvas::break_before`] before drawing a block and carry on
//! from the cursor it hands back.
//!
//! Section renderers are plain functions `fn(&mut impl Canvas, Cursor, data)
//! -> Cursor`: they draw below the incoming cursor and return where the next
//! section starts.

mod pdf;
pub mod wrap;

pub use pdf::PdfCanvas;

use crate::bidi::RunOrder;
use crate::fonts::Weight;
use crate::ir::{Color, ImageData, PageSize};

/// Vertical offset from the top of the page, in points.
pub type Cursor = f32;

/// Horizontal alignment inside the text box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Font size, weight and fill color of a text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub weight: Weight,
    pub color: Color,
}

impl TextStyle {
    pub const fn regular(size: f32) -> Self {
        Self {
            size,
            weight: Weight::Regular,
            color: Color::TEXT,
        }
    }

    pub const fn bold(size: f32) -> Self {
        Self {
            size,
            weight: Weight::Bold,
            color: Color::TEXT,
        }
    }

    pub const fn with_weight(self, weight: Weight) -> Self {
        Self { weight, ..self }
    }
}

/// Box width and alignment for a text call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextOptions {
    /// Wrap width; `None` means up to the right page margin.
    pub width: Option<f32>,
    pub align: Align,
    pub order: RunOrder,
}

impl TextOptions {
    pub const fn left() -> Self {
        Self {
            width: None,
            align: Align::Left,
            order: RunOrder::Bidi,
        }
    }

    pub const fn right() -> Self {
        Self {
            width: None,
            align: Align::Right,
            order: RunOrder::Bidi,
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

    pub const fn order(self, order: RunOrder) -> Self {
        Self { order, ..self }
    }
}

/// Line stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Color,
}

impl Stroke {
    /// Thin gray separator.
    pub const RULE: Stroke = Stroke {
        width: 1.0,
        color: Color::RULE,
    };
}

/// Page size plus the margins that bound text boxes and page content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    pub size: PageSize,
    /// Right margin of default-width text.
    pub margin: f32,
    /// Top margin of continuation pages and bottom margin of every page.
    pub vertical_margin: f32,
}

impl PageSetup {
    pub const fn new(size: PageSize, margin: f32) -> Self {
        Self {
            size,
            margin,
            vertical_margin: margin,
        }
    }

    pub const fn with_vertical_margin(self, vertical_margin: f32) -> Self {
        Self {
            vertical_margin,
            ..self
        }
    }

    /// Rightmost x that default-width text may reach.
    pub fn content_right(&self) -> f32 {
        self.size.width - self.margin
    }

    /// Where content starts on a continuation page.
    pub fn content_top(&self) -> Cursor {
        self.vertical_margin
    }

    /// Lowest y content may reach.
    pub fn content_bottom(&self) -> Cursor {
        self.size.height - self.vertical_margin
    }
}

/// Drawing surface used by every section renderer.
pub trait Canvas {
    /// Page geometry of the document being drawn.
    fn page(&self) -> PageSetup;

    /// Width of a single unwrapped line, in points.
    fn text_width(&self, text: &str, style: &TextStyle) -> f32;

    /// Line pitch for `style`, in points.
    fn line_height(&self, style: &TextStyle) -> f32;

    /// Height `text` would occupy if drawn at `x` with `options`.
    fn measure_text(&self, text: &str, x: f32, style: &TextStyle, options: TextOptions) -> f32;

    /// Draw text; returns the height it occupies.
    fn draw_text(
        &mut self,
        text: &str,
        x: f32,
        y: Cursor,
        style: &TextStyle,
        options: TextOptions,
    ) -> f32;

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), stroke: Stroke);

    /// Draw an image scaled to fit inside `fit` (width, height), keeping its
    /// aspect ratio. Returns the drawn size.
    fn draw_image(&mut self, image: &ImageData, x: f32, y: Cursor, fit: (f32, f32)) -> (f32, f32);

    /// Start a new page; returns the cursor at its top margin.
    fn new_page(&mut self) -> Cursor;

    /// Start a new page when a block of `height` drawn at `y` would cross
    /// the bottom margin. Returns the cursor to draw at instead.
    ///
    /// A block that already starts at the top of a page stays there even if
    /// it is taller than the page.
    fn break_before(&mut self, y: Cursor, height: f32) -> Option<Cursor> {
        let page = self.page();
        if y + height > page.content_bottom() && y > page.content_top() {
            Some(self.new_page())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::PageSize;

    #[test]
    fn test_page_setup_margins() {
        let page = PageSetup::new(PageSize::LETTER, 72.0);
        assert_eq!(page.content_top(), 72.0);
        assert_eq!(page.content_bottom(), 720.0);
        assert_eq!(page.content_right(), 540.0);

        let page = page.with_vertical_margin(50.0);
        assert_eq!(page.content_bottom(), 742.0);
        assert_eq!(page.content_right(), 540.0);
    }

    #[test]
    fn test_text_options_builders() {
        let options = TextOptions::right().width(90.0).order(RunOrder::Reversed);
        assert_eq!(options.width, Some(90.0));
        assert_eq!(options.align, Align::Right);
        assert_eq!(options.order, RunOrder::Reversed);
        assert_eq!(TextOptions::default().order, RunOrder::Bidi);
    }
}
