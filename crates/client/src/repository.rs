//! Invoice repository: one fetch as a `Loading` → terminal sequence.

use std::sync::Arc;

use futures::stream::{self, BoxStream, StreamExt};
use invoicecalc_core::{InvoiceError, LoadResult};
use invoicecalc_invoicing::InvoiceCollection;

use crate::remote::RemoteInvoiceSource;

/// Observable access to invoice collections.
pub trait InvoiceRepository: Send + Sync {
    /// Exactly two elements: `Loading`, then `Success` or `Error`.
    ///
    /// The stream never fails; every fetch failure arrives as an `Error` value.
    fn observe_invoices(&self) -> BoxStream<'static, LoadResult<InvoiceCollection>>;
}

/// Repository over a [`RemoteInvoiceSource`].
pub struct RemoteInvoiceRepository {
    source: Arc<dyn RemoteInvoiceSource>,
}

impl RemoteInvoiceRepository {
    pub fn new(source: Arc<dyn RemoteInvoiceSource>) -> Self {
        Self { source }
    }
}

impl InvoiceRepository for RemoteInvoiceRepository {
    fn observe_invoices(&self) -> BoxStream<'static, LoadResult<InvoiceCollection>> {
        let source = Arc::clone(&self.source);

        let terminal = stream::once(async move {
            match source.fetch().await {
                Ok(collection) => {
                    tracing::debug!(invoices = collection.len(), "invoice fetch succeeded");
                    LoadResult::success(collection)
                }
                Err(err) => {
                    tracing::warn!(error = %err, "invoice fetch failed");
                    LoadResult::error(failure_message(&err))
                }
            }
        });

        stream::once(async { LoadResult::loading() })
            .chain(terminal)
            .boxed()
    }
}

/// Message surfaced for a failed fetch.
pub fn failure_message(err: &InvoiceError) -> String {
    match err {
        InvoiceError::Transport(cause) => format!("Network error: {cause}"),
        InvoiceError::EmptyBody(message) => message.clone(),
        other => other
            .description()
            .unwrap_or_else(|| "Unknown error".to_string()),
    }
}
