//! # Text Direction
//!
//! Detects Arabic-script text and turns logical strings into the visual
//! glyph order a page expects.
//!
//! Direction is decided per field, not per document: an Arabic invoice still
//! prints its amounts left to right, and a Latin item name inside it keeps
//! left alignment.

use ar_reshaper::{ArabicReshaper, ReshaperConfig};
use unicode_bidi::BidiInfo;

/// Arabic-script blocks: Arabic, Arabic Supplement, Arabic Extended-A,
/// Presentation Forms-A and Presentation Forms-B.
const RTL_RANGES: &[(char, char)] = &[
    ('\u{0600}', '\u{06FF}'),
    ('\u{0750}', '\u{077F}'),
    ('\u{08A0}', '\u{08FF}'),
    ('\u{FB50}', '\u{FDFF}'),
    ('\u{FE70}', '\u{FEFF}'),
];

/// How a right-to-left line is put into visual order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunOrder {
    /// Unicode bidirectional algorithm.
    #[default]
    Bidi,
    /// Every character reversed after shaping. Parts of the line that were
    /// stored reversed, like [`format_date_rtl`](crate::money::format_date_rtl),
    /// come out readable.
    Reversed,
}

/// Direction of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

fn is_rtl_char(ch: char) -> bool {
    RTL_RANGES.iter().any(|&(lo, hi)| ch >= lo && ch <= hi)
}

/// True if any character of `text` belongs to an Arabic-script block.
pub fn is_right_to_left(text: &str) -> bool {
    text.chars().any(is_rtl_char)
}

/// Direction of a single field.
pub fn direction_of(text: &str) -> Direction {
    if is_right_to_left(text) {
        Direction::Rtl
    } else {
        Direction::Ltr
    }
}

thread_local! {
    static RESHAPER: ArabicReshaper = ArabicReshaper::new(ReshaperConfig::default());
}

/// Convert a logical-order line into left-to-right visual order.
///
/// Arabic letters are replaced by their contextual presentation forms
/// (initial/medial/final/isolated) and the line is reordered with the
/// Unicode bidirectional algorithm. Lines without RTL characters come back
/// unchanged. The input must be a single line.
pub fn visual_order(line: &str) -> String {
    if !is_right_to_left(line) {
        return line.to_string();
    }

    let shaped = RESHAPER.with(|r| r.reshape(line));
    let reordered = {
        let info = BidiInfo::new(&shaped, None);
        info.paragraphs
            .first()
            .map(|para| info.reorder_line(para, para.range.clone()).into_owned())
    };
    reordered.unwrap_or(shaped)
}

/// Shape `line` and reverse it as a whole. Lines without RTL characters
/// come back unchanged.
pub fn reversed_run(line: &str) -> String {
    if !is_right_to_left(line) {
        return line.to_string();
    }
    RESHAPER.with(|r| r.reshape(line)).chars().rev().collect()
}

/// Visual order of `line` under `order`.
pub fn visual_line(line: &str, order: RunOrder) -> String {
    match order {
        RunOrder::Bidi => visual_order(line),
        RunOrder::Reversed => reversed_run(line),
    }
}
