use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::calculator::NO_INVOICES_MESSAGE;
use crate::format::format_currency;

/// Invoice line as delivered by the remote source.
///
/// Prices and quantities are taken verbatim and may be zero or negative;
/// the calculator clamps them, the model does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub name: String,
    /// Price in smallest currency unit (e.g., cents).
    #[serde(rename = "priceinCents")]
    pub price_in_cents: i64,
    pub quantity: i64,
}

/// Invoice as delivered by the remote source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    /// ISO-8601 local timestamp, e.g. `2022-10-01T10:22:32`.
    pub date: String,
    pub description: Option<String>,
    pub items: Vec<LineItem>,
}

/// One fetch worth of invoices (`{ "items": [...] }` on the wire).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceCollection {
    pub items: Vec<Invoice>,
}

impl InvoiceCollection {
    pub fn new(items: Vec<Invoice>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Display projection of a single invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedInvoice {
    /// Source invoice, shared and never mutated.
    pub invoice: Arc<Invoice>,
    pub total_cents: i64,
    pub formatted_total: String,
    pub formatted_date: String,
    pub short_id: String,
}

/// Output of one aggregation run.
///
/// Invariant: `is_empty` is true iff the source collection was empty, in which
/// case `invoices` is empty and the grand total is zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedInvoiceSet {
    pub invoices: Vec<ProcessedInvoice>,
    pub grand_total_cents: i64,
    pub formatted_grand_total: String,
    pub is_empty: bool,
    pub empty_message: Option<String>,
}

impl ProcessedInvoiceSet {
    /// Empty-state set with the default "no invoices" message.
    pub fn empty() -> Self {
        Self::empty_with_message(NO_INVOICES_MESSAGE)
    }

    pub fn empty_with_message(message: impl Into<String>) -> Self {
        Self {
            invoices: Vec::new(),
            grand_total_cents: 0,
            formatted_grand_total: format_currency(0),
            is_empty: true,
            empty_message: Some(message.into()),
        }
    }

    pub fn len(&self) -> usize {
        self.invoices.len()
    }
}
