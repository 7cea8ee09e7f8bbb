//! Remote access to the invoice endpoint.
//!
//! Transport and decoding live here; callers only see an
//! [`InvoiceCollection`] or one of three classified failures
//! (transport, protocol status, empty body). No retries.

use async_trait::async_trait;
use invoicecalc_core::{InvoiceError, InvoiceResult};
use invoicecalc_invoicing::InvoiceCollection;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};

use crate::config::ClientConfig;

/// Message used when a successful response carries no payload.
pub const EMPTY_BODY_MESSAGE: &str = "Response body is null";

/// Source of raw invoice collections.
#[async_trait]
pub trait RemoteInvoiceSource: Send + Sync {
    /// Fetch the current invoice collection once.
    async fn fetch(&self) -> InvoiceResult<InvoiceCollection>;
}

/// [`RemoteInvoiceSource`] backed by a single HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpInvoiceSource {
    http: Client,
    url: String,
}

impl HttpInvoiceSource {
    pub fn new(config: &ClientConfig) -> InvoiceResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );

        let http = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| InvoiceError::transport(e.to_string()))?;

        Ok(Self {
            http,
            url: config.invoice_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RemoteInvoiceSource for HttpInvoiceSource {
    async fn fetch(&self) -> InvoiceResult<InvoiceCollection> {
        tracing::debug!(url = %self.url, "fetching invoices");

        let resp = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| InvoiceError::transport(e.to_string()))?;

        let status = resp.status();
        tracing::debug!(url = %self.url, status = status.as_u16(), "invoice endpoint responded");

        if !status.is_success() {
            return Err(InvoiceError::protocol(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Status"),
            ));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| InvoiceError::transport(e.to_string()))?;

        decode_collection(&body)
    }
}

/// Decode a response body; a blank body, `null` or undecodable JSON all count
/// as "no payload".
pub fn decode_collection(body: &[u8]) -> InvoiceResult<InvoiceCollection> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(InvoiceError::empty_body(EMPTY_BODY_MESSAGE));
    }

    match serde_json::from_slice::<Option<InvoiceCollection>>(body) {
        Ok(Some(collection)) => Ok(collection),
        Ok(None) => Err(InvoiceError::empty_body(EMPTY_BODY_MESSAGE)),
        Err(e) => Err(InvoiceError::empty_body(format!(
            "Response body could not be decoded: {e}"
        ))),
    }
}
