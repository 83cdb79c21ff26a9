//! # Render Configuration
//!
//! Process-level settings that are not part of any store's document
//! settings: where font assets live, which families the templates embed and
//! what to record as the PDF creator.
//!
//! The crate ships DejaVu Sans in `assets/fonts`. It covers Latin, Cyrillic
//! and Arabic (including the presentation forms shaping produces), so it
//! backs both the Latin fallback and the Arabic template unless another
//! family is configured.
//!
//! ## Usage
//!
//! ```
//! use docsmith::config::{FontFamily, RenderConfig};
//!
//! let config = RenderConfig::default()
//!     .with_font_dir("/srv/docsmith/fonts")
//!     .with_arabic_family(FontFamily::new("Amiri-Regular.ttf", "Amiri-Bold.ttf"));
//! assert!(config.font_dir.ends_with("fonts"));
//! assert_eq!(config.arabic_family.bold, "Amiri-Bold.ttf");
//! ```

use std::path::{Path, PathBuf};

/// Environment variable overriding the font directory.
pub const FONT_DIR_ENV: &str = "DOCSMITH_FONT_DIR";

/// Font directory bundled with the crate.
pub const DEFAULT_FONT_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/fonts");

/// Regular and bold TrueType files of one family, relative to the font
/// directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFamily {
    pub regular: String,
    pub bold: String,
}

impl FontFamily {
    pub fn new(regular: impl Into<String>, bold: impl Into<String>) -> Self {
        Self {
            regular: regular.into(),
            bold: bold.into(),
        }
    }

    /// DejaVu Sans, shipped in `assets/fonts`.
    pub fn bundled() -> Self {
        Self::new("DejaVuSans.ttf", "DejaVuSans-Bold.ttf")
    }
}

impl Default for FontFamily {
    fn default() -> Self {
        Self::bundled()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Directory holding TrueType font files.
    pub font_dir: PathBuf,
    /// Embedded by Latin layouts when text falls outside WinAnsi.
    pub latin_family: FontFamily,
    /// Embedded by the Arabic layout.
    pub arabic_family: FontFamily,
    /// Value of the PDF `Creator` entry.
    pub creator: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_dir: PathBuf::from(DEFAULT_FONT_DIR),
            latin_family: FontFamily::bundled(),
            arabic_family: FontFamily::bundled(),
            creator: format!("docsmith {}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl RenderConfig {
    /// Defaults, with the font directory taken from `DOCSMITH_FONT_DIR` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(dir) = std::env::var_os(FONT_DIR_ENV).filter(|d| !d.is_empty()) {
            config.font_dir = PathBuf::from(dir);
        }
        config
    }

    pub fn with_font_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.font_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_latin_family(mut self, family: FontFamily) -> Self {
        self.latin_family = family;
        self
    }

    pub fn with_arabic_family(mut self, family: FontFamily) -> Self {
        self.arabic_family = family;
        self
    }

    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = creator.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert!(config.font_dir.ends_with("assets/fonts"));
        assert_eq!(config.arabic_family, FontFamily::bundled());
        assert!(config.creator.starts_with("docsmith"));
    }

    #[test]
    fn test_bundled_fonts_exist() {
        let config = RenderConfig::default();
        let family = FontFamily::bundled();
        assert!(config.font_dir.join(&family.regular).is_file());
        assert!(config.font_dir.join(&family.bold).is_file());
    }

    #[test]
    fn test_builders() {
        let config = RenderConfig::default()
            .with_font_dir("/tmp/fonts")
            .with_latin_family(FontFamily::new("Plex-Regular.ttf", "Plex-Bold.ttf"))
            .with_creator("Acme Shop");
        assert_eq!(config.font_dir, PathBuf::from("/tmp/fonts"));
        assert_eq!(config.latin_family.regular, "Plex-Regular.ttf");
        assert_eq!(config.creator, "Acme Shop");
    }
}
