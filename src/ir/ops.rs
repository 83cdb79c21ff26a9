//! # IR Opcodes
//!
//! Drawing operations recorded by the canvas. Coordinates are in points
//! measured from the top-left corner of the page, the way section renderers
//! think about them; codegen flips them into PDF user space.
//!
//! Text ops carry a single line that is already wrapped, aligned and in
//! visual order, so codegen never measures or reorders anything.

use crate::error::{DocsmithError, Result};
use crate::fonts::Weight;

/// RGB color, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Body text gray (`#444444`).
    pub const TEXT: Color = Color::rgb(0x44, 0x44, 0x44);
    /// Separator gray (`#aaaaaa`).
    pub const RULE: Color = Color::rgb(0xaa, 0xaa, 0xaa);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels scaled to 0.0..=1.0 for PDF color operators.
    pub fn components(&self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

/// Page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    /// US Letter, 8.5 × 11 in.
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };
    /// ISO A4, 210 × 297 mm.
    pub const A4: PageSize = PageSize {
        width: 595.28,
        height: 841.89,
    };
    /// ISO A6, 105 × 148 mm.
    pub const A6: PageSize = PageSize {
        width: 297.64,
        height: 419.53,
    };
}

/// Decoded raster image ready for embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    /// Packed 8-bit RGB samples.
    pub rgb: Vec<u8>,
    /// 8-bit alpha samples, present only when some pixel is translucent.
    pub alpha: Option<Vec<u8>>,
}

impl ImageData {
    /// Decode a PNG/JPEG/GIF/WebP image from memory.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| DocsmithError::Asset(format!("Failed to decode image: {}", e)))?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(DocsmithError::Asset("Image has no pixels".into()));
        }

        let pixel_count = (width * height) as usize;
        let mut rgb = Vec::with_capacity(pixel_count * 3);
        let mut alpha = Vec::with_capacity(pixel_count);
        for pixel in rgba.pixels() {
            rgb.extend_from_slice(&pixel.0[..3]);
            alpha.push(pixel.0[3]);
        }
        let alpha = alpha.iter().any(|&a| a != 255).then_some(alpha);

        Ok(Self {
            width,
            height,
            rgb,
            alpha,
        })
    }

    /// Width/height ratio.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// IR opcodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// One line of text. `y` is the baseline.
    Text {
        x: f32,
        y: f32,
        size: f32,
        weight: Weight,
        color: Color,
        text: String,
    },

    /// Straight stroked segment.
    Line {
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
        color: Color,
    },

    /// Image scaled into the box whose top-left corner is (`x`, `y`).
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        data: ImageData,
    },
}

/// Ops of a document, page by page. All pages share one size.
#[derive(Debug, Clone)]
pub struct Program {
    pub page: PageSize,
    pub pages: Vec<Vec<Op>>,
}

impl Program {
    /// Create a program with one empty page of the given size.
    pub fn new(page: PageSize) -> Self {
        Self {
            page,
            pages: vec![Vec::new()],
        }
    }

    /// Add an op to the current (last) page.
    pub fn push(&mut self, op: Op) {
        match self.pages.last_mut() {
            Some(page) => page.push(op),
            None => self.pages.push(vec![op]),
        }
    }

    /// Start a new page; later ops land on it.
    pub fn new_page(&mut self) {
        self.pages.push(Vec::new());
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Ops of page `index` (0-based).
    pub fn page_ops(&self, index: usize) -> &[Op] {
        self.pages.get(index).map(Vec::as_slice).unwrap_or_default()
    }

    /// Get the number of ops across all pages.
    pub fn len(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }

    /// Check if no page has any op.
    pub fn is_empty(&self) -> bool {
        self.pages.iter().all(Vec::is_empty)
    }

    /// Iterate over ops of every page, in drawing order.
    pub fn iter(&self) -> impl Iterator<Item = &Op> {
        self.pages.iter().flatten()
    }

    /// Text of every text op, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.iter().filter_map(|op| match op {
            Op::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Op;
    type IntoIter = std::iter::Flatten<std::slice::Iter<'a, Vec<Op>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png(width: u32, height: u32, alpha: u8) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([200, 10, 10, alpha]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_program_new() {
        let program = Program::new(PageSize::LETTER);
        assert!(program.is_empty());
        assert_eq!(program.page_count(), 1);
        assert_eq!(program.page.width, 612.0);
    }

    #[test]
    fn test_ops_land_on_current_page() {
        let mut program = Program::new(PageSize::A6);
        let line = Op::Line {
            from: (15.0, 30.0),
            to: (282.0, 30.0),
            width: 1.0,
            color: Color::RULE,
        };
        program.push(line.clone());
        program.new_page();
        program.push(line.clone());
        program.push(line);
        assert_eq!(program.page_count(), 2);
        assert_eq!(program.page_ops(0).len(), 1);
        assert_eq!(program.page_ops(1).len(), 2);
        assert!(program.page_ops(2).is_empty());
        assert_eq!(program.len(), 3);
        assert_eq!((&program).into_iter().count(), 3);
    }

    #[test]
    fn test_program_texts() {
        let mut program = Program::new(PageSize::A4);
        program.push(Op::Line {
            from: (10.0, 10.0),
            to: (20.0, 10.0),
            width: 1.0,
            color: Color::RULE,
        });
        program.push(Op::Text {
            x: 0.0,
            y: 12.0,
            size: 10.0,
            weight: Weight::Bold,
            color: Color::TEXT,
            text: "Total".into(),
        });
        assert_eq!(program.len(), 2);
        assert_eq!(program.texts().collect::<Vec<_>>(), vec!["Total"]);
    }

    #[test]
    fn test_decode_opaque_png() {
        let image = ImageData::decode(&png(4, 2, 255)).unwrap();
        assert_eq!((image.width, image.height), (4, 2));
        assert_eq!(image.rgb.len(), 4 * 2 * 3);
        assert!(image.alpha.is_none());
        assert_eq!(image.aspect_ratio(), 2.0);
    }

    #[test]
    fn test_decode_translucent_png_keeps_alpha() {
        let image = ImageData::decode(&png(3, 3, 128)).unwrap();
        assert_eq!(image.alpha.as_ref().map(Vec::len), Some(9));
    }

    #[test]
    fn test_decode_garbage() {
        let err = ImageData::decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, DocsmithError::Asset(_)));
    }

    #[test]
    fn test_color_components() {
        assert_eq!(Color::BLACK.components(), [0.0, 0.0, 0.0]);
        let [r, _, _] = Color::RULE.components();
        assert!((r - 0.6667).abs() < 0.001);
    }
}
