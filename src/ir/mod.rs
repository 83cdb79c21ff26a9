//! # Intermediate Representation (IR)
//!
//! Drawing operations sit between the section renderers and PDF bytes:
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────┐
//! │  Sections   │ ──► │     IR      │ ──► │ Codegen  │
//! │ (via Canvas)│     │ (page ops)  │     │  (PDF)   │
//! └─────────────┘     └─────────────┘     └──────────┘
//! ```
//!
//! Keeping the ops inspectable lets tests assert on what a section drew
//! (positions, text, weights) without parsing PDF output. A [`Program`] holds
//! one op list per page; codegen writes each as its own PDF page.
//!
//! ## Example
//!
//! ```
//! use docsmith::fonts::{FontSet, Weight};
//! use docsmith::ir::{Color, Op, PageSize, PdfInfo, Program};
//!
//! let mut program = Program::new(PageSize::LETTER);
//! program.push(Op::Text {
//!     x: 50.0,
//!     y: 60.0,
//!     size: 20.0,
//!     weight: Weight::Regular,
//!     color: Color::TEXT,
//!     text: "Invoice".into(),
//! });
//!
//! let pdf = program.to_pdf(&FontSet::helvetica(), &PdfInfo::default()).unwrap();
//! assert!(pdf.starts_with(b"%PDF"));
//! ```

mod codegen;
mod ops;

pub use codegen::PdfInfo;
pub use ops::*;
