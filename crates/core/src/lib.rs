//! `invoicecalc-core` — pipeline foundation building blocks.
//!
//! This crate contains the types every pipeline stage speaks (no IO, no async
//! runtime): the four-state load result and the failure taxonomy.

pub mod error;
pub mod load_result;

pub use error::{InvoiceError, InvoiceResult};
pub use load_result::LoadResult;
