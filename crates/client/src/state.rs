//! Presentation state for the invoice list.
//!
//! The store owns a single writer task that folds the processed stream into a
//! [`UiState`]. Readers take snapshots or subscribe to changes; they never
//! mutate state except through [`InvoiceStateStore::clear_error`].

use std::sync::Arc;

use futures::stream::BoxStream;
use invoicecalc_core::LoadResult;
use invoicecalc_invoicing::{DEFAULT_CURRENCY_VALUE, ProcessedInvoice, ProcessedInvoiceSet};
use serde::Serialize;
use tokio::sync::{Notify, watch};
use tokio::task::JoinHandle;

use crate::orchestration::GetProcessedInvoices;
use crate::subscription::collect_latest;

/// Snapshot rendered by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UiState {
    pub is_loading: bool,
    pub is_empty: bool,
    pub invoices: Vec<ProcessedInvoice>,
    pub grand_total: String,
    pub error: Option<String>,
    pub empty_message: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            is_loading: false,
            is_empty: false,
            invoices: Vec::new(),
            grand_total: DEFAULT_CURRENCY_VALUE.to_string(),
            error: None,
            empty_message: None,
        }
    }
}

impl UiState {
    /// Next state after observing `result`.
    ///
    /// `Loading` and `Error` keep the previously shown invoices and totals.
    pub fn reduce(&self, result: LoadResult<ProcessedInvoiceSet>) -> UiState {
        match result {
            LoadResult::Loading => UiState {
                is_loading: true,
                error: None,
                ..self.clone()
            },
            LoadResult::Success(set) => UiState {
                is_loading: false,
                is_empty: set.is_empty,
                invoices: set.invoices,
                grand_total: set.formatted_grand_total,
                error: None,
                empty_message: set.empty_message,
            },
            LoadResult::Empty { message, .. } => UiState {
                is_loading: false,
                is_empty: true,
                invoices: Vec::new(),
                grand_total: DEFAULT_CURRENCY_VALUE.to_string(),
                error: None,
                empty_message: Some(message),
            },
            LoadResult::Error { message, .. } => UiState {
                is_loading: false,
                error: Some(message),
                ..self.clone()
            },
        }
    }
}

/// Owner of the [`UiState`] and of the task feeding it.
///
/// Dropping the store aborts the task, which cancels any in-flight fetch.
pub struct InvoiceStateStore {
    state: Arc<watch::Sender<UiState>>,
    shutdown: Arc<Notify>,
    task: Option<JoinHandle<()>>,
}

impl InvoiceStateStore {
    /// Start observing `use_case`. Must be called inside a tokio runtime.
    pub fn new(use_case: &GetProcessedInvoices) -> Self {
        Self::from_stream(use_case.execute())
    }

    pub fn from_stream(results: BoxStream<'static, LoadResult<ProcessedInvoiceSet>>) -> Self {
        let (tx, _) = watch::channel(UiState::default());
        let state = Arc::new(tx);
        let shutdown = Arc::new(Notify::new());

        let writer = Arc::clone(&state);
        let task = tokio::spawn(collect_latest(results, Arc::clone(&shutdown), move |result| {
            let writer = Arc::clone(&writer);
            async move {
                let kind = result.kind();
                writer.send_modify(|current| *current = current.reduce(result));
                tracing::debug!(result = kind, "ui state updated");
            }
        }));

        Self {
            state,
            shutdown,
            task: Some(task),
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> UiState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.state.subscribe()
    }

    /// Reset `error` to `None`, leaving every other field unchanged.
    pub fn clear_error(&self) {
        self.state.send_if_modified(|current| current.error.take().is_some());
    }

    /// Stop the writer task and wait for it to finish.
    pub async fn shutdown(mut self) {
        self.shutdown.notify_one();
        self.join().await;
    }

    /// Wait until the stream is exhausted and return the final state.
    ///
    /// Dropping the returned future drops the store, which aborts the task.
    pub async fn run_to_completion(mut self) -> UiState {
        self.join().await;
        self.state()
    }

    /// Await the writer task. The handle stays owned until the task has
    /// finished so that `Drop` can still abort it if this future is dropped.
    async fn join(&mut self) {
        if let Some(task) = self.task.as_mut() {
            if let Err(err) = task.await {
                tracing::warn!(error = %err, "invoice state task ended abnormally");
            }
            self.task = None;
        }
    }
}

impl Drop for InvoiceStateStore {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
