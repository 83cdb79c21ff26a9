//! Page geometry of the Latin-script layouts.
//!
//! The full-size presets match a Letter page with a 50pt visual left edge;
//! the compact preset scales the same structure down to an A6 label.
//! Offsets are relative to the cursor a section receives.

use crate::canvas::PageSetup;
use crate::ir::PageSize;
use crate::layout::RuleSpan;

/// Fixed positions and sizes for one page format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub page: PageSetup,
    pub rule: RuleSpan,
    /// Left edge of content.
    pub left: f32,
    /// Vertical position of the first section.
    pub start: f32,

    /// Company name and document title size.
    pub title_size: f32,
    /// Everything else.
    pub body_size: f32,
    /// Pitch between stacked single lines.
    pub line: f32,

    pub company_width: f32,
    /// Box start of the right-aligned store block.
    pub store_block_x: f32,
    pub address_x: f32,
    pub address_width: f32,
    pub header_padding: f32,
    /// Largest logo box (width, height).
    pub logo_fit: (f32, f32),

    pub title_offset: f32,
    pub info_rule_offset: f32,
    pub info_top_offset: f32,
    /// Column of the number/date values.
    pub value_x: f32,
    pub info_end_offset: f32,

    /// Second (shipping) address column.
    pub second_column_x: f32,
    pub column_width: f32,
    pub section_spacing: f32,

    pub table_offset: f32,
    pub row_pitch: f32,
    pub row_rule_offset: f32,
    pub description_x: f32,
}

impl Geometry {
    /// US Letter with the default 72pt margin bounding text boxes.
    pub const LETTER: Geometry = Geometry {
        page: PageSetup::new(PageSize::LETTER, 72.0).with_vertical_margin(50.0),
        rule: RuleSpan::CONTENT,
        left: 50.0,
        start: 50.0,

        title_size: 20.0,
        body_size: 10.0,
        line: 15.0,

        company_width: 250.0,
        store_block_x: 200.0,
        address_x: 390.0,
        address_width: 150.0,
        header_padding: 3.0,
        logo_fit: (100.0, 50.0),

        title_offset: 40.0,
        info_rule_offset: 65.0,
        info_top_offset: 80.0,
        value_x: 150.0,
        info_end_offset: 115.0,

        second_column_x: 300.0,
        column_width: 150.0,
        section_spacing: 15.0,

        table_offset: 30.0,
        row_pitch: 30.0,
        row_rule_offset: 20.0,
        description_x: 150.0,
    };

    /// A6 label.
    pub const A6: Geometry = Geometry {
        page: PageSetup::new(PageSize::A6, 15.0).with_vertical_margin(20.0),
        rule: RuleSpan {
            from: 15.0,
            to: 282.0,
        },
        left: 15.0,
        start: 20.0,

        title_size: 13.0,
        body_size: 7.0,
        line: 10.0,

        company_width: 130.0,
        store_block_x: 100.0,
        address_x: 182.0,
        address_width: 100.0,
        header_padding: 2.0,
        logo_fit: (60.0, 30.0),

        title_offset: 20.0,
        info_rule_offset: 38.0,
        info_top_offset: 46.0,
        value_x: 90.0,
        info_end_offset: 70.0,

        second_column_x: 150.0,
        column_width: 120.0,
        section_spacing: 10.0,

        table_offset: 20.0,
        row_pitch: 20.0,
        row_rule_offset: 13.0,
        description_x: 90.0,
    };
}
