//! Standard PDF fonts (Helvetica family).
//!
//! Every PDF viewer ships these, so documents using them need no font
//! assets. Advance widths come from the Adobe AFM files and are expressed in
//! 1/1000 em, like all PDF glyph metrics.

/// One of the built-in PDF base fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
}

/// Helvetica advance widths for U+0020..=U+007E.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Helvetica-Bold advance widths for U+0020..=U+007E.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    333, 333, 584, 584, 584, 611, 975, // ':'..'@'
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    333, 278, 333, 584, 556, 333, // '['..'`'
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // 'a'..'m'
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // 'n'..'z'
    389, 280, 389, 584, // '{'..'~'
];

/// Width used for characters outside the ASCII table.
const FALLBACK_WIDTH: u16 = 556;

/// Windows-1252 code points that differ from Latin-1.
const WIN_ANSI_EXTRAS: &[(char, u8)] = &[
    ('€', 0x80),
    ('‚', 0x82),
    ('„', 0x84),
    ('…', 0x85),
    ('‘', 0x91),
    ('’', 0x92),
    ('“', 0x93),
    ('”', 0x94),
    ('•', 0x95),
    ('–', 0x96),
    ('—', 0x97),
    ('™', 0x99),
];

impl StandardFont {
    /// PDF `BaseFont` name.
    pub fn base_font(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Advance width of `ch` in 1/1000 em.
    pub fn advance(&self, ch: char) -> f32 {
        let table = match self {
            StandardFont::Helvetica => &HELVETICA_WIDTHS,
            StandardFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        };
        let code = ch as u32;
        let width = if (0x20..=0x7E).contains(&code) {
            table[(code - 0x20) as usize]
        } else if ch == '\u{00A0}' {
            table[0]
        } else {
            FALLBACK_WIDTH
        };
        width as f32
    }

    pub fn ascender(&self) -> f32 {
        718.0
    }

    pub fn descender(&self) -> f32 {
        -207.0
    }

    /// Font bounding box height; used as the line pitch.
    pub fn line_height(&self) -> f32 {
        match self {
            StandardFont::Helvetica => 931.0 + 225.0,
            StandardFont::HelveticaBold => 962.0 + 228.0,
        }
    }

    /// WinAnsi byte for `ch`, if the encoding has one.
    pub fn encode_char(ch: char) -> Option<u8> {
        let code = ch as u32;
        if code < 0x80 || (0xA0..=0xFF).contains(&code) {
            Some(code as u8)
        } else {
            WIN_ANSI_EXTRAS
                .iter()
                .find(|(c, _)| *c == ch)
                .map(|(_, b)| *b)
        }
    }

    /// Whether every character of `text` has a WinAnsi code.
    pub fn can_encode(text: &str) -> bool {
        text.chars().all(|ch| Self::encode_char(ch).is_some())
    }

    /// Encode text as WinAnsi bytes; `None` if any character has no code.
    pub fn encode(text: &str) -> Option<Vec<u8>> {
        text.chars().map(Self::encode_char).collect()
    }
}
