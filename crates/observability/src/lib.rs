//! Tracing/logging setup shared by every binary in the workspace.

/// Initialize process-wide logging, picking the output format from
/// `INVOICECALC_LOG_FORMAT` (`json` or `pretty`, default `json`).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::from_env());
}

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use self::tracing::LogFormat;
