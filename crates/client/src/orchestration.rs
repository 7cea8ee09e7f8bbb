//! Fetch-then-process orchestration.
//!
//! Maps each repository element onto a processed element one-to-one, in
//! order. Aggregation faults are captured here and never escape the stream.

use std::sync::Arc;

use futures::stream::{BoxStream, StreamExt};
use invoicecalc_core::LoadResult;
use invoicecalc_invoicing::{InvoiceCollection, InvoiceProcessor, ProcessedInvoiceSet};

use crate::repository::InvoiceRepository;

/// Use case producing processed invoice sets from the repository stream.
#[derive(Clone)]
pub struct GetProcessedInvoices {
    repository: Arc<dyn InvoiceRepository>,
    processor: Arc<dyn InvoiceProcessor>,
}

impl GetProcessedInvoices {
    pub fn new(repository: Arc<dyn InvoiceRepository>, processor: Arc<dyn InvoiceProcessor>) -> Self {
        Self {
            repository,
            processor,
        }
    }

    /// One processed element per repository element.
    pub fn execute(&self) -> BoxStream<'static, LoadResult<ProcessedInvoiceSet>> {
        let processor = Arc::clone(&self.processor);
        self.repository
            .observe_invoices()
            .map(move |result| process_result(processor.as_ref(), result))
            .boxed()
    }
}

fn process_result(
    processor: &dyn InvoiceProcessor,
    result: LoadResult<InvoiceCollection>,
) -> LoadResult<ProcessedInvoiceSet> {
    match result {
        LoadResult::Loading => LoadResult::Loading,
        LoadResult::Success(collection) => match processor.process(collection.items) {
            Ok(set) => LoadResult::Success(set),
            Err(fault) => {
                tracing::error!(error = %fault, "invoice aggregation failed");
                LoadResult::error(format!("Failed to process invoices: {fault}"))
            }
        },
        LoadResult::Empty { message, .. } => {
            LoadResult::Success(ProcessedInvoiceSet::empty_with_message(message))
        }
        LoadResult::Error { message, .. } => LoadResult::error(message),
    }
}
