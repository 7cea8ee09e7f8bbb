//! Invoice aggregation module.
//!
//! This crate contains the invoice model as it arrives from the remote source
//! and the rules that turn it into display-ready totals, implemented purely as
//! deterministic logic (no IO, no HTTP, no async).

pub mod calculator;
pub mod format;
pub mod invoice;

pub use calculator::{
    DEFAULT_CURRENCY_VALUE, InvoiceCalculator, InvoiceProcessor, MIN_PRICE_CENTS, MIN_QUANTITY,
    NO_INVOICES_MESSAGE,
};
pub use format::{DEFAULT_SHORT_ID_LENGTH, format_currency, format_invoice_date, short_id, short_id_with_len};
pub use invoice::{Invoice, InvoiceCollection, LineItem, ProcessedInvoice, ProcessedInvoiceSet};
