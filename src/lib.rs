//! # Docsmith - Invoice and Packing Slip PDFs
//!
//! Docsmith lays out commercial documents for an online store from order
//! data and store settings, and writes them as PDF. It provides:
//!
//! - **Templates**: Basic, Basic-with-logo and Arabic invoices; Letter and
//!   A6 packing slips
//! - **Text layout**: real font metrics, word wrap, right-to-left shaping
//!   for Arabic, and tables that continue over as many pages as they need
//! - **Fonts**: standard Helvetica for WinAnsi text, bundled DejaVu Sans
//!   embedded and subset for everything else
//! - **Formatting**: currency-aware amounts in minor units, document dates
//!   and display numbers
//! - **Dispatch**: settings validation per template before anything renders
//!
//! ## Quick Start
//!
//! ```no_run
//! use docsmith::{
//!     config::RenderConfig,
//!     generator::generate_invoice,
//!     model::{DocumentSettings, InvoiceData, Order, StoreDetail},
//!     templates::resolve_kind,
//! };
//!
//! let settings: DocumentSettings = serde_json::from_str(&std::fs::read_to_string("settings.json")?)?;
//! let order: Order = serde_json::from_str(&std::fs::read_to_string("order.json")?)?;
//! let invoice: InvoiceData = serde_json::from_str(&std::fs::read_to_string("invoice.json")?)?;
//!
//! // Stored template, unless a preview asks for another one
//! let kind = resolve_kind(None, settings.invoice_template);
//!
//! let pdf = generate_invoice(
//!     kind,
//!     &settings,
//!     &invoice,
//!     &order,
//!     &StoreDetail::default(),
//!     &RenderConfig::from_env(),
//! )?;
//! std::fs::write("invoice.pdf", pdf)?;
//!
//! # Ok::<(), docsmith::error::DocsmithError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`generator`] | Template dispatch and validation |
//! | [`templates`] | Document layouts and their sections |
//! | [`canvas`] | Text measurement and drawing surface |
//! | [`layout`] | Rules and table columns |
//! | [`ir`] | Recorded drawing ops and PDF output |
//! | [`fonts`] | Standard and TrueType font metrics, glyph subsetting |
//! | [`bidi`] | Right-to-left detection and visual ordering |
//! | [`money`] | Amount and date formatting |
//! | [`numbering`] | Document display numbers |
//! | [`resolve`] | Store logo fetching |
//! | [`model`] | Settings, order and document inputs |
//! | [`config`] | Font directory and PDF metadata |
//! | [`error`] | Error types |

pub mod bidi;
pub mod canvas;
pub mod config;
pub mod error;
pub mod fonts;
pub mod generator;
pub mod ir;
pub mod layout;
pub mod model;
pub mod money;
pub mod numbering;
pub mod resolve;
pub mod templates;

// Re-exports for convenience
pub use config::RenderConfig;
pub use error::{DocsmithError, Result};
pub use generator::{DocumentType, generate_invoice, generate_packing_slip};
pub use templates::{InvoiceTemplateKind, PackingSlipTemplateKind};
