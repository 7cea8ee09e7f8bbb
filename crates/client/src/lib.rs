//! `invoicecalc-client`
//!
//! **Responsibility:** the asynchronous half of the invoice pipeline.
//!
//! This crate provides:
//! - Remote access to the invoice endpoint, with typed failure classification
//! - A repository that turns one fetch into a `Loading` → terminal sequence
//! - Orchestration of repository output through the aggregation engine
//! - A single-writer UI state store with collect-latest subscription
//!
//! Rendering is not part of this crate: hosts read [`UiState`] snapshots and
//! call [`InvoiceStateStore::clear_error`], nothing else.

pub mod config;
pub mod orchestration;
pub mod remote;
pub mod repository;
pub mod state;
pub mod subscription;

pub use config::ClientConfig;
pub use orchestration::GetProcessedInvoices;
pub use remote::{HttpInvoiceSource, RemoteInvoiceSource};
pub use repository::{InvoiceRepository, RemoteInvoiceRepository};
pub use state::{InvoiceStateStore, UiState};
pub use subscription::collect_latest;
