//! Packing slip layouts.
//!
//! Both sizes share the Latin header, info and customer sections; only the
//! geometry differs.

mod table;

pub use table::packing_slip_table;

use super::geometry::Geometry;
use super::parts::{PACKING_SLIP_LABELS, customer_info, document_info, header};
use super::{RenderInput, Template, Validation, render_latin, validate_store_address};
use crate::canvas::{Canvas, Cursor};
use crate::error::Result;
use crate::model::DocumentSettings;

const TITLE: &str = "Packing slip";

/// Letter page.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicPackingSlip;

/// A6 label.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicSmallPackingSlip;

pub(crate) fn draw(canvas: &mut impl Canvas, input: &RenderInput<'_>, g: &Geometry) -> Cursor {
    let address = input.settings.address();
    let mut y = header(canvas, g.start, &address, g);
    y = document_info(canvas, y, &PACKING_SLIP_LABELS, input.document, g);
    y = customer_info(canvas, y, input.order, g);
    packing_slip_table(canvas, y, input.order, g)
}

fn render_with(input: &RenderInput<'_>, g: &Geometry) -> Result<Vec<u8>> {
    render_latin(input, g.page, TITLE, |canvas| draw(canvas, input, g))
}

impl Template for BasicPackingSlip {
    fn validate(&self, settings: &DocumentSettings) -> Validation {
        validate_store_address(settings)
    }

    fn render(&self, input: &RenderInput<'_>) -> Result<Vec<u8>> {
        render_with(input, &Geometry::LETTER)
    }
}

impl Template for BasicSmallPackingSlip {
    fn validate(&self, settings: &DocumentSettings) -> Validation {
        validate_store_address(settings)
    }

    fn render(&self, input: &RenderInput<'_>) -> Result<Vec<u8>> {
        render_with(input, &Geometry::A6)
    }
}
