//! Remote endpoint configuration.

use std::time::Duration;

/// Host serving the invoice documents.
pub const DEFAULT_BASE_URL: &str = "https://storage.googleapis.com/xmm-homework/";

/// Document with the full invoice list.
pub const INVOICE_ENDPOINT: &str = "invoices.json";

/// Document with an empty invoice list (useful to exercise the empty state).
pub const EMPTY_INVOICES_ENDPOINT: &str = "invoices_empty.json";

/// Connect and request timeout applied by the HTTP client.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

pub const BASE_URL_ENV: &str = "INVOICECALC_BASE_URL";
pub const INVOICE_ENDPOINT_ENV: &str = "INVOICECALC_INVOICE_ENDPOINT";
pub const TIMEOUT_SECS_ENV: &str = "INVOICECALC_TIMEOUT_SECS";

/// Where and how the HTTP source fetches invoices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub invoice_endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            invoice_endpoint: INVOICE_ENDPOINT.to_string(),
            connect_timeout: DEFAULT_TIMEOUT,
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Build from `INVOICECALC_*` environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            config.base_url = base_url.trim().to_string();
        }

        if let Some(endpoint) = lookup(INVOICE_ENDPOINT_ENV).filter(|v| !v.trim().is_empty()) {
            config.invoice_endpoint = endpoint.trim().to_string();
        }

        if let Some(raw) = lookup(TIMEOUT_SECS_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => {
                    config.connect_timeout = Duration::from_secs(secs);
                    config.request_timeout = Duration::from_secs(secs);
                }
                _ => tracing::warn!(
                    value = %raw,
                    "{} is not a positive number of seconds; using default",
                    TIMEOUT_SECS_ENV
                ),
            }
        }

        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.invoice_endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self.request_timeout = timeout;
        self
    }

    /// Full invoice URL; base and endpoint are joined with exactly one `/`.
    pub fn invoice_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.invoice_endpoint.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_invoice_document() {
        let config = ClientConfig::default();
        assert_eq!(
            config.invoice_url(),
            "https://storage.googleapis.com/xmm-homework/invoices.json"
        );
        assert_eq!(config.request_timeout, Duration::from_secs(60));
    }

    #[test]
    fn env_overrides_are_applied() {
        let config = ClientConfig::from_lookup(lookup(&[
            (BASE_URL_ENV, "http://localhost:9000"),
            (INVOICE_ENDPOINT_ENV, EMPTY_INVOICES_ENDPOINT),
            (TIMEOUT_SECS_ENV, "5"),
        ]));

        assert_eq!(config.invoice_url(), "http://localhost:9000/invoices_empty.json");
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn invalid_timeout_falls_back_to_default() {
        let config = ClientConfig::from_lookup(lookup(&[(TIMEOUT_SECS_ENV, "0")]));
        assert_eq!(config.request_timeout, DEFAULT_TIMEOUT);

        let config = ClientConfig::from_lookup(lookup(&[(TIMEOUT_SECS_ENV, "soon")]));
        assert_eq!(config.connect_timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn url_join_tolerates_slashes() {
        let config = ClientConfig::default()
            .with_base_url("http://host/api")
            .with_endpoint("/invoices.json");
        assert_eq!(config.invoice_url(), "http://host/api/invoices.json");
    }
}
