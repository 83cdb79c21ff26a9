//! Canvas that records IR and finishes into a PDF.

use super::wrap::wrap_lines;
use super::{Align, Canvas, Cursor, PageSetup, Stroke, TextOptions, TextStyle};
use crate::bidi::visual_line;
use crate::error::Result;
use crate::fonts::FontSet;
use crate::ir::{ImageData, Op, PdfInfo, Program};

/// PDF canvas; pages are added as content flows past the bottom margin.
///
/// Each render owns its canvas; [`PdfCanvas::finish`] consumes it, so
/// nothing can be drawn after the document is closed.
#[derive(Debug)]
pub struct PdfCanvas {
    page: PageSetup,
    fonts: FontSet,
    program: Program,
}

impl PdfCanvas {
    pub fn new(page: PageSetup, fonts: FontSet) -> Self {
        Self {
            page,
            fonts,
            program: Program::new(page.size),
        }
    }

    /// Ops recorded so far.
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// First recorded text the font of its weight cannot draw.
    pub fn unencodable_text(&self) -> Option<&str> {
        self.program.iter().find_map(|op| match op {
            Op::Text { text, weight, .. } if !self.fonts.face(*weight).covers(text) => {
                Some(text.as_str())
            }
            _ => None,
        })
    }

    /// Close the document and serialize it.
    pub fn finish(self, info: &PdfInfo) -> Result<Vec<u8>> {
        self.program.to_pdf(&self.fonts, info)
    }

    fn box_width(&self, x: f32, options: &TextOptions) -> f32 {
        options
            .width
            .unwrap_or_else(|| self.page.content_right() - x)
            .max(0.0)
    }

    fn layout(&self, text: &str, x: f32, style: &TextStyle, options: &TextOptions) -> Vec<String> {
        let width = self.box_width(x, options);
        wrap_lines(text, width, |line| {
            self.text_width(&visual_line(line, options.order), style)
        })
    }
}

impl Canvas for PdfCanvas {
    fn page(&self) -> PageSetup {
        self.page
    }

    fn text_width(&self, text: &str, style: &TextStyle) -> f32 {
        self.fonts.face(style.weight).text_width(text, style.size)
    }

    fn line_height(&self, style: &TextStyle) -> f32 {
        self.fonts.face(style.weight).line_height(style.size)
    }

    fn measure_text(&self, text: &str, x: f32, style: &TextStyle, options: TextOptions) -> f32 {
        self.layout(text, x, style, &options).len() as f32 * self.line_height(style)
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: f32,
        y: Cursor,
        style: &TextStyle,
        options: TextOptions,
    ) -> f32 {
        let lines = self.layout(text, x, style, &options);
        let box_width = self.box_width(x, &options);
        let line_height = self.line_height(style);
        let ascent = self.fonts.face(style.weight).ascent(style.size);

        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let visual = visual_line(line, options.order);
            let width = self.text_width(&visual, style);
            let offset = match options.align {
                Align::Left => 0.0,
                Align::Center => (box_width - width) / 2.0,
                Align::Right => box_width - width,
            };
            self.program.push(Op::Text {
                x: x + offset,
                y: y + i as f32 * line_height + ascent,
                size: style.size,
                weight: style.weight,
                color: style.color,
                text: visual,
            });
        }

        lines.len() as f32 * line_height
    }

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), stroke: Stroke) {
        self.program.push(Op::Line {
            from,
            to,
            width: stroke.width,
            color: stroke.color,
        });
    }

    fn draw_image(&mut self, image: &ImageData, x: f32, y: Cursor, fit: (f32, f32)) -> (f32, f32) {
        let (max_width, max_height) = fit;
        let ratio = image.aspect_ratio();
        let (width, height) = if max_height * ratio <= max_width {
            (max_height * ratio, max_height)
        } else {
            (max_width, max_width / ratio)
        };

        self.program.push(Op::Image {
            x,
            y,
            width,
            height,
            data: image.clone(),
        });
        (width, height)
    }

    fn new_page(&mut self) -> Cursor {
        self.program.new_page();
        log::debug!("Started page {}", self.program.page_count());
        self.page.content_top()
    }
}
