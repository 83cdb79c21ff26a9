//! # Fonts
//!
//! A template renders with one [`FontSet`]: a regular and a bold face from
//! the same family. Faces are either standard PDF fonts (no assets, WinAnsi
//! text only) or TrueType files embedded into the output, subset to the
//! glyphs a document draws.
//!
//! All metrics are in 1/1000 em; [`FontFace::text_width`] and friends scale
//! them to points for a given font size.

mod standard;
mod subset;
mod truetype;

pub use standard::StandardFont;
pub use subset::subset_font;
pub use truetype::TrueTypeFont;

use std::path::Path;
use std::sync::Arc;

use crate::config::FontFamily;
use crate::error::Result;

/// Font weight used by the templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Weight {
    #[default]
    Regular,
    Bold,
}

/// A single font face.
#[derive(Debug, Clone)]
pub enum FontFace {
    Standard(StandardFont),
    TrueType(Arc<TrueTypeFont>),
}

impl FontFace {
    fn advance(&self, ch: char) -> f32 {
        match self {
            FontFace::Standard(f) => f.advance(ch),
            FontFace::TrueType(f) => f.advance(ch),
        }
    }

    /// Width of `text` in points at `size`.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().map(|c| self.advance(c)).sum::<f32>() * size / 1000.0
    }

    /// Distance from the top of a line to its baseline, in points.
    pub fn ascent(&self, size: f32) -> f32 {
        let units = match self {
            FontFace::Standard(f) => f.ascender(),
            FontFace::TrueType(f) => f.ascender(),
        };
        units * size / 1000.0
    }

    /// Whether every character of `text` can be drawn with this face.
    pub fn covers(&self, text: &str) -> bool {
        match self {
            FontFace::Standard(_) => StandardFont::can_encode(text),
            FontFace::TrueType(f) => text.chars().all(|c| c.is_whitespace() || f.glyph_id(c) != 0),
        }
    }

    /// Line pitch in points.
    pub fn line_height(&self, size: f32) -> f32 {
        let units = match self {
            FontFace::Standard(f) => f.line_height(),
            FontFace::TrueType(f) => f.line_height(),
        };
        units * size / 1000.0
    }
}

/// Regular + bold faces of one family.
#[derive(Debug, Clone)]
pub struct FontSet {
    regular: FontFace,
    bold: FontFace,
}

impl FontSet {
    /// Helvetica / Helvetica-Bold.
    pub fn helvetica() -> Self {
        Self {
            regular: FontFace::Standard(StandardFont::Helvetica),
            bold: FontFace::Standard(StandardFont::HelveticaBold),
        }
    }

    /// Load a regular/bold pair of TrueType files from `dir`.
    pub fn load_truetype(dir: &Path, regular_file: &str, bold_file: &str) -> Result<Self> {
        let regular = TrueTypeFont::load(&dir.join(regular_file))?;
        let bold = TrueTypeFont::load(&dir.join(bold_file))?;
        Ok(Self {
            regular: FontFace::TrueType(regular),
            bold: FontFace::TrueType(bold),
        })
    }

    /// Load a configured family from `dir`.
    pub fn load_family(dir: &Path, family: &FontFamily) -> Result<Self> {
        Self::load_truetype(dir, &family.regular, &family.bold)
    }

    pub fn face(&self, weight: Weight) -> &FontFace {
        match weight {
            Weight::Regular => &self.regular,
            Weight::Bold => &self.bold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helvetica_width_scales_with_size() {
        let fonts = FontSet::helvetica();
        let face = fonts.face(Weight::Regular);
        let w10 = face.text_width("Invoice", 10.0);
        let w20 = face.text_width("Invoice", 20.0);
        assert!((w20 - 2.0 * w10).abs() < 0.001);
        // "0" is 556/1000 em
        assert!((face.text_width("0", 10.0) - 5.56).abs() < 0.001);
    }

    #[test]
    fn test_line_height_exceeds_ascent() {
        let fonts = FontSet::helvetica();
        for weight in [Weight::Regular, Weight::Bold] {
            let face = fonts.face(weight);
            assert!(face.line_height(12.0) > face.ascent(12.0));
        }
    }

    #[test]
    fn test_standard_coverage() {
        let face = FontSet::helvetica().face(Weight::Regular).clone();
        assert!(face.covers("Jane Doe, Zürich"));
        assert!(!face.covers("Łukasz"));
    }

    #[test]
    fn test_bundled_family_coverage() {
        let fonts = FontSet::load_family(
            Path::new(crate::config::DEFAULT_FONT_DIR),
            &FontFamily::bundled(),
        )
        .unwrap();
        for weight in [Weight::Regular, Weight::Bold] {
            let face = fonts.face(weight);
            assert!(face.covers("Łukasz Żółć"));
            assert!(face.covers("Кофе"));
            assert!(face.covers("فاتورة"));
            assert!(face.covers(&crate::bidi::visual_order("الإجمالي")));
        }
    }

    #[test]
    fn test_missing_truetype_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FontSet::load_truetype(dir.path(), "A.ttf", "B.ttf").is_err());
    }
}
