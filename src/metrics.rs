//! Ingestion counters.
//!
//! Recorded unconditionally; they only go anywhere once `init_metrics` has
//! installed the Prometheus recorder. Ingestion is a short-lived batch job, so
//! there is no HTTP listener: the CLI renders a snapshot to a file instead.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::{Once, OnceLock};
use tracing::{info, warn};

static INIT: Once = Once::new();
static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub const PAGES_REQUESTED: &str = "ingest_pages_requested_total";
pub const REQUEST_FAILURES: &str = "ingest_request_failures_total";
pub const RECIPES_FETCHED: &str = "ingest_recipes_fetched_total";
pub const PAGES_SCRAPED: &str = "ingest_pages_scraped_total";
pub const ROWS_PARSED: &str = "ingest_rows_parsed_total";
pub const ROWS_EXPORTED: &str = "ingest_rows_exported_total";

/// Install the global recorder. Idempotent.
pub fn init_metrics() {
    INIT.call_once(|| match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = HANDLE.set(handle);
            info!("Metrics recorder installed");
        }
        Err(e) => warn!("Metrics recorder install failed: {}", e),
    });
}

/// Render the current snapshot in Prometheus text format
pub fn render() -> Option<String> {
    HANDLE.get().map(|handle| handle.render())
}

pub struct IngestMetrics;

impl IngestMetrics {
    pub fn record_page_requested(source: &'static str) {
        ::metrics::counter!(PAGES_REQUESTED, "source" => source).increment(1);
    }

    pub fn record_request_failure(source: &'static str) {
        ::metrics::counter!(REQUEST_FAILURES, "source" => source).increment(1);
    }

    pub fn record_recipes_fetched(source: &'static str, count: usize) {
        ::metrics::counter!(RECIPES_FETCHED, "source" => source).increment(count as u64);
    }

    pub fn record_page_scraped(source: &'static str, rows: usize) {
        ::metrics::counter!(PAGES_SCRAPED, "source" => source).increment(1);
        ::metrics::counter!(ROWS_PARSED, "source" => source).increment(rows as u64);
    }

    pub fn record_rows_exported(source: &'static str, rows: usize) {
        ::metrics::counter!(ROWS_EXPORTED, "source" => source).increment(rows as u64);
    }
}
