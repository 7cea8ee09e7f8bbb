use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use futures::StreamExt;
use invoicecalc_client::{
    ClientConfig, GetProcessedInvoices, HttpInvoiceSource, InvoiceRepository, InvoiceStateStore,
    RemoteInvoiceRepository, RemoteInvoiceSource,
};
use invoicecalc_core::{InvoiceError, LoadResult};
use invoicecalc_invoicing::{InvoiceCalculator, NO_INVOICES_MESSAGE};

const FIXTURE: &str = include_str!("fixtures/invoices.json");

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let app = Router::new()
            .route("/invoices.json", get(|| async { json(FIXTURE) }))
            .route("/invoices_empty.json", get(|| async { json(r#"{"items":[]}"#) }))
            .route("/null.json", get(|| async { json("null") }))
            .route("/blank.json", get(|| async { json("") }))
            .route("/garbage.json", get(|| async { json("{not json") }))
            .route(
                "/broken.json",
                get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
            )
            .route(
                "/slow.json",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    json(FIXTURE)
                }),
            );

        // Same pipeline as prod, but the endpoint is bound to an ephemeral port.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}/", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn config(&self, endpoint: &str) -> ClientConfig {
        ClientConfig::default()
            .with_base_url(self.base_url.clone())
            .with_endpoint(endpoint)
            .with_timeout(Duration::from_secs(5))
    }

    fn source(&self, endpoint: &str) -> HttpInvoiceSource {
        HttpInvoiceSource::new(&self.config(endpoint)).unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn json(body: &'static str) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], body)
}

fn store_for(source: HttpInvoiceSource) -> InvoiceStateStore {
    let repository = RemoteInvoiceRepository::new(Arc::new(source));
    let use_case =
        GetProcessedInvoices::new(Arc::new(repository), Arc::new(InvoiceCalculator::new()));
    InvoiceStateStore::new(&use_case)
}

#[tokio::test]
async fn fetch_decodes_fixture() {
    let srv = TestServer::spawn().await;

    let collection = srv.source("invoices.json").fetch().await.unwrap();

    assert_eq!(collection.len(), 3);
    assert_eq!(collection.items[1].description, None);
    assert_eq!(collection.items[1].items[1].price_in_cents, -300);
}

#[tokio::test]
async fn fetch_classifies_failures() {
    let srv = TestServer::spawn().await;

    assert_eq!(
        srv.source("missing.json").fetch().await.unwrap_err(),
        InvoiceError::protocol(404, "Not Found")
    );
    assert_eq!(
        srv.source("broken.json").fetch().await.unwrap_err(),
        InvoiceError::protocol(500, "Internal Server Error")
    );
    assert_eq!(
        srv.source("null.json").fetch().await.unwrap_err(),
        InvoiceError::empty_body("Response body is null")
    );
    assert_eq!(
        srv.source("blank.json").fetch().await.unwrap_err(),
        InvoiceError::empty_body("Response body is null")
    );
    assert!(matches!(
        srv.source("garbage.json").fetch().await.unwrap_err(),
        InvoiceError::EmptyBody(msg) if msg.starts_with("Response body could not be decoded")
    ));
}

#[tokio::test]
async fn request_timeout_is_a_transport_failure() {
    let srv = TestServer::spawn().await;
    let config = srv
        .config("slow.json")
        .with_timeout(Duration::from_millis(100));

    let err = HttpInvoiceSource::new(&config)
        .unwrap()
        .fetch()
        .await
        .unwrap_err();

    assert!(matches!(err, InvoiceError::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn repository_reports_refused_connection_as_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ClientConfig::default()
        .with_base_url(format!("http://{}", addr))
        .with_timeout(Duration::from_secs(2));
    let repository = RemoteInvoiceRepository::new(Arc::new(HttpInvoiceSource::new(&config).unwrap()));

    let results: Vec<_> = repository.observe_invoices().collect().await;

    assert_eq!(results.len(), 2);
    assert!(results[0].is_loading());
    let message = results[1].error_message().expect("error element");
    assert!(message.starts_with("Network error: "), "got {message}");
}

#[tokio::test]
async fn store_shows_processed_fixture() {
    let srv = TestServer::spawn().await;

    let state = store_for(srv.source("invoices.json"))
        .run_to_completion()
        .await;

    assert!(!state.is_loading);
    assert!(!state.is_empty);
    assert_eq!(state.error, None);
    assert_eq!(state.grand_total, "$70.99");

    let rows: Vec<_> = state
        .invoices
        .iter()
        .map(|i| {
            (
                i.short_id.as_str(),
                i.formatted_date.as_str(),
                i.formatted_total.as_str(),
            )
        })
        .collect();
    assert_eq!(
        rows,
        vec![
            ("f143404a", "Oct 01, 2022", "$16.00"),
            ("4d1cf6a1", "Oct 02, 2022", "$54.99"),
            ("inv-3", "not-a-date", "$0.00"),
        ]
    );
}

#[tokio::test]
async fn store_shows_empty_state_for_empty_document() {
    let srv = TestServer::spawn().await;

    let state = store_for(srv.source("invoices_empty.json"))
        .run_to_completion()
        .await;

    assert!(state.is_empty);
    assert!(state.invoices.is_empty());
    assert_eq!(state.grand_total, "$0.00");
    assert_eq!(state.empty_message.as_deref(), Some(NO_INVOICES_MESSAGE));
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn store_surfaces_http_error_and_allows_clearing_it() {
    let srv = TestServer::spawn().await;
    let store = store_for(srv.source("broken.json"));

    let mut rx = store.subscribe();
    rx.wait_for(|s| s.error.is_some()).await.unwrap();

    let state = store.state();
    assert!(!state.is_loading);
    assert_eq!(state.error.as_deref(), Some("HTTP 500 Internal Server Error"));
    assert!(state.invoices.is_empty());

    store.clear_error();
    assert_eq!(store.state().error, None);
    store.shutdown().await;
}

#[tokio::test]
async fn shutdown_during_slow_fetch_returns_promptly() {
    let srv = TestServer::spawn().await;
    let store = store_for(srv.source("slow.json"));

    let mut rx = store.subscribe();
    rx.wait_for(|s| s.is_loading).await.unwrap();

    tokio::time::timeout(Duration::from_secs(1), store.shutdown())
        .await
        .expect("shutdown waited for the fetch");
}

#[tokio::test]
async fn processed_stream_emits_loading_then_success() {
    let srv = TestServer::spawn().await;
    let repository = RemoteInvoiceRepository::new(Arc::new(srv.source("invoices.json")));
    let use_case =
        GetProcessedInvoices::new(Arc::new(repository), Arc::new(InvoiceCalculator::new()));

    let results: Vec<_> = use_case.execute().collect().await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0], LoadResult::Loading);
    let set = results[1].as_success().expect("success");
    assert_eq!(set.grand_total_cents, 7099);
    assert_eq!(set.formatted_grand_total, "$70.99");
}
