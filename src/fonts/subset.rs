//! Glyph subsetting for embedded TrueType fonts.
//!
//! Glyph ids stay stable: outlines the document never draws are emptied and
//! tables a PDF viewer does not read are dropped, so text keeps its original
//! ids under an identity `CIDToGIDMap`.

use std::collections::BTreeSet;
use ttf_parser::{RawFace, Tag};

use crate::error::{DocsmithError, Result};

/// Tables copied into the subset, in tag order.
const KEPT_TABLES: [&[u8; 4]; 9] = [
    b"cvt ", b"fpgm", b"glyf", b"head", b"hhea", b"hmtx", b"loca", b"maxp", b"prep",
];

// Composite glyph component flags
const ARG_1_AND_2_ARE_WORDS: u16 = 0x0001;
const WE_HAVE_A_SCALE: u16 = 0x0008;
const MORE_COMPONENTS: u16 = 0x0020;
const WE_HAVE_AN_X_AND_Y_SCALE: u16 = 0x0040;
const WE_HAVE_A_TWO_BY_TWO: u16 = 0x0080;

const HEAD_MIN_LEN: usize = 54;
const CHECKSUM_ADJUSTMENT: usize = 8;
const INDEX_TO_LOC_FORMAT: usize = 50;

fn malformed(what: &str) -> DocsmithError {
    DocsmithError::Asset(format!("Malformed font: {}", what))
}

fn read_u16(data: &[u8], at: usize) -> Result<u16> {
    data.get(at..at + 2)
        .map(|b| u16::from_be_bytes([b[0], b[1]]))
        .ok_or_else(|| malformed("truncated table"))
}

fn read_u32(data: &[u8], at: usize) -> Result<u32> {
    data.get(at..at + 4)
        .map(|b| u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
        .ok_or_else(|| malformed("truncated table"))
}

fn table<'a>(face: &RawFace<'a>, tag: &[u8; 4]) -> Option<&'a [u8]> {
    face.table(Tag::from_bytes(tag))
}

/// `num_glyphs + 1` byte offsets into `glyf`.
fn glyph_offsets(loca: &[u8], long: bool, num_glyphs: usize) -> Result<Vec<usize>> {
    (0..=num_glyphs)
        .map(|i| {
            if long {
                read_u32(loca, i * 4).map(|o| o as usize)
            } else {
                read_u16(loca, i * 2).map(|o| o as usize * 2)
            }
        })
        .collect()
}

/// Outline bytes of glyph `gid`; `gid` must be below the glyph count.
fn outline<'a>(glyf: &'a [u8], offsets: &[usize], gid: usize) -> Result<&'a [u8]> {
    glyf.get(offsets[gid]..offsets[gid + 1])
        .ok_or_else(|| malformed("glyph outside glyf table"))
}

/// Glyph ids a composite glyph is built from; empty for simple glyphs.
fn components(glyph: &[u8]) -> Result<Vec<u16>> {
    if glyph.is_empty() || (read_u16(glyph, 0)? as i16) >= 0 {
        return Ok(Vec::new());
    }

    let mut ids = Vec::new();
    let mut at = 10;
    loop {
        let flags = read_u16(glyph, at)?;
        ids.push(read_u16(glyph, at + 2)?);
        at += 4;
        at += if flags & ARG_1_AND_2_ARE_WORDS != 0 { 4 } else { 2 };
        if flags & WE_HAVE_A_SCALE != 0 {
            at += 2;
        } else if flags & WE_HAVE_AN_X_AND_Y_SCALE != 0 {
            at += 4;
        } else if flags & WE_HAVE_A_TWO_BY_TWO != 0 {
            at += 8;
        }
        if flags & MORE_COMPONENTS == 0 {
            return Ok(ids);
        }
    }
}

fn checksum(data: &[u8]) -> u32 {
    data.chunks(4).fold(0u32, |sum, chunk| {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum.wrapping_add(u32::from_be_bytes(word))
    })
}

fn pad4(buffer: &mut Vec<u8>) {
    buffer.resize(buffer.len().next_multiple_of(4), 0);
}

/// Build a copy of a TrueType font holding only the outlines of `glyphs`
/// and of the components they reference. Glyph 0 is always kept.
///
/// Fails for fonts without `glyf` outlines; callers embed those whole.
pub fn subset_font(data: &[u8], glyphs: impl IntoIterator<Item = u16>) -> Result<Vec<u8>> {
    let face = RawFace::parse(data, 0)
        .map_err(|e| DocsmithError::Asset(format!("Failed to parse font: {}", e)))?;
    let head = table(&face, b"head").ok_or_else(|| malformed("no head table"))?;
    let maxp = table(&face, b"maxp").ok_or_else(|| malformed("no maxp table"))?;
    let loca = table(&face, b"loca").ok_or_else(|| malformed("no loca table"))?;
    let glyf = table(&face, b"glyf").ok_or_else(|| malformed("no glyf table"))?;
    if head.len() < HEAD_MIN_LEN {
        return Err(malformed("short head table"));
    }

    let long = read_u16(head, INDEX_TO_LOC_FORMAT)? != 0;
    let num_glyphs = read_u16(maxp, 4)? as usize;
    let offsets = glyph_offsets(loca, long, num_glyphs)?;

    let mut keep = BTreeSet::new();
    let mut pending: Vec<u16> = std::iter::once(0).chain(glyphs).collect();
    while let Some(gid) = pending.pop() {
        if gid as usize >= num_glyphs || !keep.insert(gid) {
            continue;
        }
        pending.extend(components(outline(glyf, &offsets, gid as usize)?)?);
    }

    let mut new_glyf = Vec::new();
    let mut new_loca = Vec::with_capacity((num_glyphs + 1) * 4);
    for gid in 0..num_glyphs {
        new_loca.extend_from_slice(&(new_glyf.len() as u32).to_be_bytes());
        if keep.contains(&(gid as u16)) {
            new_glyf.extend_from_slice(outline(glyf, &offsets, gid)?);
            pad4(&mut new_glyf);
        }
    }
    new_loca.extend_from_slice(&(new_glyf.len() as u32).to_be_bytes());

    let mut new_head = head.to_vec();
    new_head[CHECKSUM_ADJUSTMENT..CHECKSUM_ADJUSTMENT + 4].fill(0);
    new_head[INDEX_TO_LOC_FORMAT..INDEX_TO_LOC_FORMAT + 2].copy_from_slice(&1u16.to_be_bytes());

    let tables: Vec<(&[u8; 4], &[u8])> = KEPT_TABLES
        .iter()
        .filter_map(|&tag| {
            let body = match tag {
                b"glyf" => Some(new_glyf.as_slice()),
                b"loca" => Some(new_loca.as_slice()),
                b"head" => Some(new_head.as_slice()),
                _ => table(&face, tag),
            };
            body.map(|body| (tag, body))
        })
        .collect();

    let count = tables.len() as u16;
    let entry_selector = 15 - count.leading_zeros() as u16;
    let search_range = (1u16 << entry_selector) * 16;

    let mut out = Vec::new();
    out.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    out.extend_from_slice(&count.to_be_bytes());
    out.extend_from_slice(&search_range.to_be_bytes());
    out.extend_from_slice(&entry_selector.to_be_bytes());
    out.extend_from_slice(&(count * 16 - search_range).to_be_bytes());

    let mut offset = 12 + 16 * tables.len();
    for (tag, body) in &tables {
        out.extend_from_slice(*tag);
        out.extend_from_slice(&checksum(body).to_be_bytes());
        out.extend_from_slice(&(offset as u32).to_be_bytes());
        out.extend_from_slice(&(body.len() as u32).to_be_bytes());
        offset += body.len().next_multiple_of(4);
    }

    let mut head_offset = 0;
    for (tag, body) in &tables {
        if *tag == b"head" {
            head_offset = out.len();
        }
        out.extend_from_slice(body);
        pad4(&mut out);
    }

    let adjustment = 0xB1B0_AFBAu32.wrapping_sub(checksum(&out));
    out[head_offset + CHECKSUM_ADJUSTMENT..head_offset + CHECKSUM_ADJUSTMENT + 4]
        .copy_from_slice(&adjustment.to_be_bytes());

    log::debug!(
        "Subset font to {} of {} glyphs ({} -> {} bytes)",
        keep.len(),
        num_glyphs,
        data.len(),
        out.len()
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ab_glyph::{Font, FontArc, GlyphId};

    fn dejavu() -> Vec<u8> {
        std::fs::read(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/fonts/DejaVuSans.ttf")).unwrap()
    }

    #[test]
    fn test_subset_keeps_used_outlines_only() {
        let data = dejavu();
        let full = FontArc::try_from_vec(data.clone()).unwrap();
        let a = full.glyph_id('A');
        let b = full.glyph_id('B');
        assert!(full.outline(b).is_some());

        let subset = subset_font(&data, [a.0]).unwrap();
        assert!(subset.len() * 5 < data.len());

        let font = FontArc::try_from_vec(subset).unwrap();
        assert!(font.outline(a).is_some());
        assert!(font.outline(b).is_none());
        assert_eq!(font.h_advance_unscaled(a), full.h_advance_unscaled(a));
        assert_eq!(font.h_advance_unscaled(b), full.h_advance_unscaled(b));
    }

    #[test]
    fn test_out_of_range_glyph_ignored() {
        let subset = subset_font(&dejavu(), [u16::MAX]).unwrap();
        let font = FontArc::try_from_vec(subset).unwrap();
        assert!(font.outline(GlyphId(u16::MAX)).is_none());
    }

    #[test]
    fn test_composite_components() {
        let mut glyph = vec![0xFF, 0xFF, 0, 0, 0, 0, 0, 0, 0, 0];
        // word args, more components
        glyph.extend_from_slice(&[0x00, 0x21, 0x00, 0x05, 0, 0, 0, 0]);
        // byte args, with scale
        glyph.extend_from_slice(&[0x00, 0x08, 0x00, 0x07, 0, 0, 0x40, 0x00]);
        assert_eq!(components(&glyph).unwrap(), vec![5, 7]);

        let simple = [0x00, 0x01, 0, 0, 0, 0, 0, 0, 0, 0];
        assert!(components(&simple).unwrap().is_empty());
    }

    #[test]
    fn test_truncated_composite_is_error() {
        let glyph = [0xFF, 0xFF, 0, 0, 0, 0, 0, 0, 0, 0, 0x00, 0x20];
        assert!(components(&glyph).is_err());
    }

    #[test]
    fn test_not_a_font() {
        let err = subset_font(b"not a font at all", [1]).unwrap_err();
        assert!(matches!(err, DocsmithError::Asset(_)));
    }
}
