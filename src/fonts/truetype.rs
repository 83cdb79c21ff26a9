//! TrueType fonts loaded from the font directory.
//!
//! Metrics and glyph lookup go through ab_glyph. Parsed fonts are cached
//! process-wide by path: the data is read-only, so concurrent renders share
//! one copy while each keeps its own canvas.

use ab_glyph::{Font, FontArc, GlyphId};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use crate::error::{DocsmithError, Result};

/// A parsed TrueType font together with its raw bytes for embedding.
pub struct TrueTypeFont {
    name: String,
    data: Vec<u8>,
    font: FontArc,
    units_per_em: f32,
}

impl std::fmt::Debug for TrueTypeFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrueTypeFont")
            .field("name", &self.name)
            .field("bytes", &self.data.len())
            .finish()
    }
}

static FONT_CACHE: OnceLock<Mutex<HashMap<PathBuf, Arc<TrueTypeFont>>>> = OnceLock::new();

impl TrueTypeFont {
    /// Parse a font from bytes. `name` becomes the PDF `BaseFont`.
    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Result<Self> {
        let name = name.into();
        let font = FontArc::try_from_vec(data.clone())
            .map_err(|e| DocsmithError::Asset(format!("Failed to parse font {}: {}", name, e)))?;
        let units_per_em = font.units_per_em().unwrap_or(1000.0);
        Ok(Self {
            name,
            data,
            font,
            units_per_em,
        })
    }

    /// Load a font file, reusing an already parsed copy of the same path.
    pub fn load(path: &Path) -> Result<Arc<Self>> {
        let cache = FONT_CACHE.get_or_init(|| Mutex::new(HashMap::new()));
        if let Some(font) = cache.lock().ok().and_then(|c| c.get(path).cloned()) {
            return Ok(font);
        }

        let data = std::fs::read(path).map_err(|e| {
            DocsmithError::Asset(format!("Failed to read font {}: {}", path.display(), e))
        })?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("EmbeddedFont")
            .replace(' ', "");
        let font = Arc::new(Self::from_bytes(name, data)?);
        log::debug!("Loaded font {} ({} bytes)", path.display(), font.data.len());

        if let Ok(mut c) = cache.lock() {
            c.insert(path.to_path_buf(), font.clone());
        }
        Ok(font)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Glyph index for `ch` (0 = missing glyph).
    pub fn glyph_id(&self, ch: char) -> u16 {
        self.font.glyph_id(ch).0
    }

    fn to_thousandths(&self, units: f32) -> f32 {
        units * 1000.0 / self.units_per_em
    }

    /// Advance width of a glyph in 1/1000 em.
    pub fn glyph_advance(&self, glyph: u16) -> f32 {
        self.to_thousandths(self.font.h_advance_unscaled(GlyphId(glyph)))
    }

    /// Advance width of `ch` in 1/1000 em.
    pub fn advance(&self, ch: char) -> f32 {
        self.glyph_advance(self.glyph_id(ch))
    }

    pub fn ascender(&self) -> f32 {
        self.to_thousandths(self.font.ascent_unscaled())
    }

    pub fn descender(&self) -> f32 {
        self.to_thousandths(self.font.descent_unscaled())
    }

    /// Ascent to descent plus line gap, in 1/1000 em.
    pub fn line_height(&self) -> f32 {
        self.to_thousandths(
            self.font.ascent_unscaled() - self.font.descent_unscaled()
                + self.font.line_gap_unscaled(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_asset_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TrueTypeFont::load(&dir.path().join("Nope-Regular.ttf")).unwrap_err();
        assert!(matches!(err, DocsmithError::Asset(msg) if msg.contains("Nope-Regular.ttf")));
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        let err = TrueTypeFont::from_bytes("Broken", vec![0, 1, 2, 3]).unwrap_err();
        assert!(matches!(err, DocsmithError::Asset(_)));
    }

    #[test]
    fn test_invalid_file_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Fake-Bold.ttf");
        std::fs::write(&path, b"not a font").unwrap();
        assert!(TrueTypeFont::load(&path).is_err());
    }
}
