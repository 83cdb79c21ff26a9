//! # Document Inputs
//!
//! Plain data types the engine reads. All derive `Serialize + Deserialize`
//! so the same types are built in Rust or loaded from the JSON that the
//! configuration store and commerce platform hand over.

mod document;
mod order;
mod settings;

pub use document::{DocumentHeading, InvoiceData, PackingSlipData, StoreDetail};
pub use order::{Address, Amount, LineItem, Order};
pub use settings::{DocumentSettings, StoreAddress};
