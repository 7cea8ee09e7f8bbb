use std::sync::Arc;

use anyhow::Context;
use invoicecalc_client::{
    ClientConfig, GetProcessedInvoices, HttpInvoiceSource, InvoiceStateStore,
    RemoteInvoiceRepository,
};
use invoicecalc_invoicing::InvoiceCalculator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    invoicecalc_observability::init();

    let config = ClientConfig::from_env();
    tracing::info!(url = %config.invoice_url(), "loading invoices");

    let source = HttpInvoiceSource::new(&config).context("failed to build HTTP client")?;
    let repository = RemoteInvoiceRepository::new(Arc::new(source));
    let use_case = GetProcessedInvoices::new(Arc::new(repository), Arc::new(InvoiceCalculator::new()));
    let store = InvoiceStateStore::new(&use_case);

    let state = tokio::select! {
        state = store.run_to_completion() => state,
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for ctrl-c")?;
            tracing::info!("interrupted; cancelling fetch");
            return Ok(());
        }
    };

    match &state.error {
        Some(error) => tracing::warn!(%error, "invoice load failed"),
        None => tracing::info!(
            invoices = state.invoices.len(),
            grand_total = %state.grand_total,
            empty = state.is_empty,
            "invoices loaded"
        ),
    }

    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}
