//! Invoice aggregation engine.
//!
//! Turns raw invoices into validated totals and display fields. Pure and
//! synchronous: no IO, no shared mutable state, deterministic iteration order.

use std::sync::Arc;

use invoicecalc_core::{InvoiceError, InvoiceResult};

use crate::format::{format_currency, format_invoice_date, short_id};
use crate::invoice::{Invoice, LineItem, ProcessedInvoice, ProcessedInvoiceSet};

/// Empty-state message used when a fetch returns no invoices.
pub const NO_INVOICES_MESSAGE: &str = "No invoices found";

/// Formatted zero amount.
pub const DEFAULT_CURRENCY_VALUE: &str = "$0.00";

/// Billable floor for quantities; anything lower is billed as one unit.
pub const MIN_QUANTITY: i64 = 1;

/// Price floor; negative prices contribute nothing.
pub const MIN_PRICE_CENTS: i64 = 0;

/// Aggregation seam used by the orchestration stage.
///
/// Implementations must be pure. A returned error is treated as an internal
/// fault of the engine, never as a property of the fetch.
pub trait InvoiceProcessor: Send + Sync {
    fn process(&self, invoices: Vec<Invoice>) -> InvoiceResult<ProcessedInvoiceSet>;
}

/// Default aggregation engine.
///
/// Amounts are `i64` minor units with checked arithmetic; an overflow is the
/// only way aggregation can fail.
#[derive(Debug, Default, Clone, Copy)]
pub struct InvoiceCalculator;

impl InvoiceCalculator {
    pub fn new() -> Self {
        Self
    }

    /// `max(quantity, 1) * max(price, 0)`; never negative.
    pub fn line_item_total(&self, item: &LineItem) -> InvoiceResult<i64> {
        let quantity = item.quantity.max(MIN_QUANTITY);
        let price = item.price_in_cents.max(MIN_PRICE_CENTS);

        quantity.checked_mul(price).ok_or_else(|| {
            InvoiceError::aggregation(format!("line item {} amount overflow", item.id))
        })
    }

    /// Sum of line totals, left to right.
    pub fn invoice_total(&self, invoice: &Invoice) -> InvoiceResult<i64> {
        invoice.items.iter().try_fold(0i64, |total, item| {
            let line = self.line_item_total(item)?;
            total.checked_add(line).ok_or_else(|| {
                InvoiceError::aggregation(format!("invoice {} total overflow", invoice.id))
            })
        })
    }

    /// Sum of invoice totals.
    pub fn grand_total(&self, invoices: &[Invoice]) -> InvoiceResult<i64> {
        invoices.iter().try_fold(0i64, |total, invoice| {
            let invoice_total = self.invoice_total(invoice)?;
            checked_grand_total(total, invoice_total)
        })
    }

    /// Project every invoice onto its display form, preserving input order.
    pub fn process_invoices(&self, invoices: Vec<Invoice>) -> InvoiceResult<Vec<ProcessedInvoice>> {
        invoices
            .into_iter()
            .map(|invoice| {
                let total = self.invoice_total(&invoice)?;
                Ok(ProcessedInvoice {
                    total_cents: total,
                    formatted_total: format_currency(total),
                    formatted_date: format_invoice_date(&invoice.date),
                    short_id: short_id(&invoice.id),
                    invoice: Arc::new(invoice),
                })
            })
            .collect()
    }

    /// Build the processed set for one fetch.
    ///
    /// An empty input yields the explicit empty state rather than a zero-row
    /// success.
    pub fn aggregate(&self, invoices: Vec<Invoice>) -> InvoiceResult<ProcessedInvoiceSet> {
        if invoices.is_empty() {
            return Ok(ProcessedInvoiceSet::empty());
        }

        let processed = self.process_invoices(invoices)?;
        let grand_total = processed
            .iter()
            .try_fold(0i64, |total, invoice| checked_grand_total(total, invoice.total_cents))?;

        tracing::debug!(
            invoices = processed.len(),
            grand_total_cents = grand_total,
            "aggregated invoices"
        );

        Ok(ProcessedInvoiceSet {
            invoices: processed,
            grand_total_cents: grand_total,
            formatted_grand_total: format_currency(grand_total),
            is_empty: false,
            empty_message: None,
        })
    }
}

fn checked_grand_total(total: i64, invoice_total: i64) -> InvoiceResult<i64> {
    total
        .checked_add(invoice_total)
        .ok_or_else(|| InvoiceError::aggregation("grand total overflow"))
}

impl InvoiceProcessor for InvoiceCalculator {
    fn process(&self, invoices: Vec<Invoice>) -> InvoiceResult<ProcessedInvoiceSet> {
        self.aggregate(invoices)
    }
}
