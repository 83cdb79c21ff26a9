//! # Code Generation
//!
//! Converts an IR program into a PDF with lopdf, one page object per IR page.
//!
//! Standard fonts are referenced by name and their text written as WinAnsi
//! literal strings. TrueType fonts are embedded as `Type0`/`CIDFontType2`
//! with `Identity-H` encoding: text becomes big-endian glyph ids, and a
//! `ToUnicode` map keeps it searchable and copyable. The font file is subset
//! to the glyphs the document draws. Pages share one resource dictionary.
//! Page content streams are left uncompressed; font files and images are
//! deflated.

use flate2::{Compression, write::ZlibEncoder};
use lopdf::{
    Dictionary, Document, Object, ObjectId, Stream, StringFormat,
    content::{Content, Operation},
    dictionary,
};
use std::collections::BTreeMap;
use std::io::Write;

use super::ops::{ImageData, Op, Program};
use crate::error::{DocsmithError, Result};
use crate::fonts::{FontFace, FontSet, StandardFont, TrueTypeFont, Weight, subset_font};

/// Document information dictionary entries.
#[derive(Debug, Clone, Default)]
pub struct PdfInfo {
    pub title: String,
    pub creator: String,
}

/// Glyphs drawn with one font face: glyph id → character.
type GlyphUsage = BTreeMap<u16, char>;

fn resource_name(weight: Weight) -> &'static str {
    match weight {
        Weight::Regular => "F1",
        Weight::Bold => "F2",
    }
}

/// Round to 1/100 pt so output stays stable and compact.
fn pt(value: f32) -> Object {
    ((value * 100.0).round() / 100.0).into()
}

fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

fn encode_text(face: &FontFace, text: &str, usage: &mut GlyphUsage) -> Result<Object> {
    match face {
        FontFace::Standard(font) => StandardFont::encode(text)
            .map(|bytes| Object::String(bytes, StringFormat::Literal))
            .ok_or_else(|| {
                DocsmithError::Asset(format!("{} cannot encode {:?}", font.base_font(), text))
            }),
        FontFace::TrueType(font) => {
            let mut bytes = Vec::with_capacity(text.len() * 2);
            for ch in text.chars() {
                let glyph = font.glyph_id(ch);
                if glyph == 0 {
                    log::debug!("No glyph for {:?} in {}", ch, font.name());
                }
                usage.entry(glyph).or_insert(ch);
                bytes.extend_from_slice(&glyph.to_be_bytes());
            }
            Ok(Object::String(bytes, StringFormat::Hexadecimal))
        }
    }
}

impl Program {
    /// Compile the program to PDF bytes.
    ///
    /// The output carries no timestamps or random ids, so the same program
    /// always produces the same bytes.
    pub fn to_pdf(&self, fonts: &FontSet, info: &PdfInfo) -> Result<Vec<u8>> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let mut glyphs: BTreeMap<Weight, GlyphUsage> = BTreeMap::new();
        let mut xobjects = Dictionary::new();
        let mut contents = Vec::with_capacity(self.pages.len());
        for ops in &self.pages {
            let operations = self.page_operations(ops, fonts, &mut doc, &mut glyphs, &mut xobjects)?;
            let content = Content { operations };
            contents.push(doc.add_object(Stream::new(dictionary! {}, content.encode()?)));
        }

        let mut font_resources = Dictionary::new();
        for (weight, usage) in &glyphs {
            let font_id = match fonts.face(*weight) {
                FontFace::Standard(font) => doc.add_object(dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type1",
                    "BaseFont" => font.base_font(),
                    "Encoding" => "WinAnsiEncoding",
                }),
                FontFace::TrueType(font) => embed_truetype(&mut doc, font, usage)?,
            };
            font_resources.set(resource_name(*weight), font_id);
        }

        let mut resources = dictionary! { "Font" => font_resources };
        if !xobjects.is_empty() {
            resources.set("XObject", xobjects);
        }
        let resources_id = doc.add_object(resources);

        let media_box = vec![pt(0.0), pt(0.0), pt(self.page.width), pt(self.page.height)];
        let kids: Vec<Object> = contents
            .into_iter()
            .map(|content_id| {
                Object::Reference(doc.add_object(dictionary! {
                    "Type" => "Page",
                    "Parent" => pages_id,
                    "MediaBox" => media_box.clone(),
                    "Contents" => content_id,
                    "Resources" => resources_id,
                }))
            })
            .collect();
        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(info.title.as_str()),
            "Creator" => Object::string_literal(info.creator.as_str()),
            "Producer" => Object::string_literal(concat!("docsmith ", env!("CARGO_PKG_VERSION"))),
        });
        doc.trailer.set("Info", info_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        log::debug!(
            "Generated PDF: {} ops on {} pages, {} bytes",
            self.len(),
            self.page_count(),
            buffer.len()
        );
        Ok(buffer)
    }

    /// Content operations of one page. Fonts and images it uses are
    /// recorded for the shared resource dictionary.
    fn page_operations(
        &self,
        ops: &[Op],
        fonts: &FontSet,
        doc: &mut Document,
        glyphs: &mut BTreeMap<Weight, GlyphUsage>,
        xobjects: &mut Dictionary,
    ) -> Result<Vec<Operation>> {
        let page_height = self.page.height;
        let mut operations = Vec::new();

        for op in ops {
            match op {
                Op::Text {
                    x,
                    y,
                    size,
                    weight,
                    color,
                    text,
                } => {
                    let usage = glyphs.entry(*weight).or_default();
                    let encoded = encode_text(fonts.face(*weight), text, usage)?;
                    let [r, g, b] = color.components();
                    operations.push(Operation::new("BT", vec![]));
                    operations.push(Operation::new(
                        "Tf",
                        vec![resource_name(*weight).into(), pt(*size)],
                    ));
                    operations.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
                    operations.push(Operation::new("Td", vec![pt(*x), pt(page_height - y)]));
                    operations.push(Operation::new("Tj", vec![encoded]));
                    operations.push(Operation::new("ET", vec![]));
                }
                Op::Line {
                    from,
                    to,
                    width,
                    color,
                } => {
                    let [r, g, b] = color.components();
                    operations.push(Operation::new("q", vec![]));
                    operations.push(Operation::new("RG", vec![r.into(), g.into(), b.into()]));
                    operations.push(Operation::new("w", vec![pt(*width)]));
                    operations.push(Operation::new("m", vec![pt(from.0), pt(page_height - from.1)]));
                    operations.push(Operation::new("l", vec![pt(to.0), pt(page_height - to.1)]));
                    operations.push(Operation::new("S", vec![]));
                    operations.push(Operation::new("Q", vec![]));
                }
                Op::Image {
                    x,
                    y,
                    width,
                    height,
                    data,
                } => {
                    let name = format!("Im{}", xobjects.len() + 1);
                    let image_id = embed_image(doc, data)?;
                    xobjects.set(name.as_bytes().to_vec(), image_id);
                    operations.push(Operation::new("q", vec![]));
                    operations.push(Operation::new(
                        "cm",
                        vec![
                            pt(*width),
                            0.into(),
                            0.into(),
                            pt(*height),
                            pt(*x),
                            pt(page_height - y - height),
                        ],
                    ));
                    operations.push(Operation::new("Do", vec![Object::Name(name.into_bytes())]));
                    operations.push(Operation::new("Q", vec![]));
                }
            }
        }

        Ok(operations)
    }
}

fn embed_image(doc: &mut Document, image: &ImageData) -> Result<ObjectId> {
    let mut dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => image.width as i64,
        "Height" => image.height as i64,
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8,
        "Filter" => "FlateDecode",
    };
    if let Some(alpha) = &image.alpha {
        let mask_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => image.width as i64,
                "Height" => image.height as i64,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
                "Filter" => "FlateDecode",
            },
            deflate(alpha)?,
        ));
        dict.set("SMask", mask_id);
    }
    Ok(doc.add_object(Stream::new(dict, deflate(&image.rgb)?)))
}

fn embed_truetype(doc: &mut Document, font: &TrueTypeFont, usage: &GlyphUsage) -> Result<ObjectId> {
    let base_font = Object::Name(font.name().as_bytes().to_vec());
    let ascent = font.ascender().round() as i64;
    let descent = font.descender().round() as i64;

    let program = match subset_font(font.data(), usage.keys().copied()) {
        Ok(program) => program,
        Err(e) => {
            log::debug!("Embedding all of {}: {}", font.name(), e);
            font.data().to_vec()
        }
    };
    let file_id = doc.add_object(Stream::new(
        dictionary! {
            "Length1" => program.len() as i64,
            "Filter" => "FlateDecode",
        },
        deflate(&program)?,
    ));
    let descriptor_id = doc.add_object(dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => base_font.clone(),
        "Flags" => 4,
        "FontBBox" => vec![
            Object::Integer(0),
            Object::Integer(descent),
            Object::Integer(1000),
            Object::Integer(ascent),
        ],
        "ItalicAngle" => 0,
        "Ascent" => ascent,
        "Descent" => descent,
        "CapHeight" => ascent,
        "StemV" => 80,
        "FontFile2" => file_id,
    });

    let mut widths = Vec::with_capacity(usage.len() * 2);
    for &glyph in usage.keys() {
        widths.push(Object::Integer(glyph as i64));
        widths.push(Object::Array(vec![Object::Integer(
            font.glyph_advance(glyph).round() as i64,
        )]));
    }

    let descendant_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "CIDFontType2",
        "BaseFont" => base_font.clone(),
        "CIDSystemInfo" => dictionary! {
            "Registry" => Object::string_literal("Adobe"),
            "Ordering" => Object::string_literal("Identity"),
            "Supplement" => 0,
        },
        "FontDescriptor" => descriptor_id,
        "DW" => 1000,
        "W" => widths,
        "CIDToGIDMap" => "Identity",
    });

    let to_unicode_id = doc.add_object(Stream::new(
        dictionary! {},
        to_unicode_cmap(usage).into_bytes(),
    ));

    Ok(doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "BaseFont" => base_font,
        "Encoding" => "Identity-H",
        "DescendantFonts" => vec![Object::Reference(descendant_id)],
        "ToUnicode" => to_unicode_id,
    }))
}

/// `ToUnicode` CMap mapping two-byte glyph ids back to UTF-16.
fn to_unicode_cmap(usage: &GlyphUsage) -> String {
    let mut cmap = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n",
    );

    let mapped: Vec<(u16, char)> = usage
        .iter()
        .filter(|(glyph, _)| **glyph != 0)
        .map(|(glyph, ch)| (*glyph, *ch))
        .collect();

    // bfchar sections hold at most 100 entries
    for chunk in mapped.chunks(100) {
        cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
        for (glyph, ch) in chunk {
            let mut units = [0u16; 2];
            let hex: String = ch
                .encode_utf16(&mut units)
                .iter()
                .map(|u| format!("{:04X}", u))
                .collect();
            cmap.push_str(&format!("<{:04X}> <{}>\n", glyph, hex));
        }
        cmap.push_str("endbfchar\n");
    }

    cmap.push_str("endcmap\nCMapName currentdict /CMap defineresource pop\nend\nend\n");
    cmap
}
