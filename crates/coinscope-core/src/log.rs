//! Logging side channel.
//!
//! The pipeline reports through an injected [`LogSink`] instead of a global
//! logger. Sink methods return nothing, so a sink can never fail a fetch or
//! an extraction.

use crate::error::FailureReport;

pub trait LogSink: Send + Sync {
    /// A page was fetched with status 200.
    fn page_fetched(&self, url: &str);

    /// A page answered 404.
    fn page_not_found(&self, url: &str);

    /// A detail lookup resolved to a currency the site does not know.
    fn currency_not_found(&self, name: &str);

    /// Any other failure, with its serializable report.
    fn failure(&self, report: &FailureReport);
}

/// Emits `tracing` events under the `coinscope` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn page_fetched(&self, url: &str) {
        tracing::info!(target: "coinscope", url, "get data from {url}");
    }

    fn page_not_found(&self, url: &str) {
        tracing::warn!(target: "coinscope", url, "page not found {url}");
    }

    fn currency_not_found(&self, name: &str) {
        tracing::warn!(target: "coinscope", name, "crypto currency {name} not exists");
    }

    fn failure(&self, report: &FailureReport) {
        let detail = serde_json::to_string(report).unwrap_or_else(|_| report.to_string());
        tracing::error!(
            target: "coinscope",
            code = report.code,
            location = report.location.as_deref().unwrap_or(""),
            detail = %detail,
            "{}",
            report.message
        );
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogSink;

impl LogSink for NoopLogSink {
    fn page_fetched(&self, _url: &str) {}

    fn page_not_found(&self, _url: &str) {}

    fn currency_not_found(&self, _name: &str) {}

    fn failure(&self, _report: &FailureReport) {}
}
