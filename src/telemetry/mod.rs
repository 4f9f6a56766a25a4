//! Telemetry initialization: metrics and structured logging

use metrics::{describe_counter, describe_gauge, describe_histogram, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialise logging and the Prometheus recorder.
///
/// Returns `Some(PrometheusHandle)` when metrics are enabled so the HTTP
/// server can expose a `/metrics` endpoint. Honors `LOG_FORMAT=json` for
/// log-aggregator environments and `METRICS_ENABLED=false` to opt out.
pub fn init() -> Option<PrometheusHandle> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "storefront_core=debug,tower_http=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    let is_json = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if is_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().flatten_event(true))
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    let metrics_enabled = std::env::var("METRICS_ENABLED")
        .map(|v| v != "false")
        .unwrap_or(true);

    if metrics_enabled {
        let handle = install_prometheus_recorder();
        describe_metrics();
        Some(handle)
    } else {
        None
    }
}

/// Install the Prometheus recorder and return a handle for rendering metrics.
fn install_prometheus_recorder() -> PrometheusHandle {
    // Common Prometheus latency buckets plus sub-millisecond ones for fast endpoints.
    let buckets = vec![
        0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
    ];

    PrometheusBuilder::new()
        .set_buckets(&buckets)
        .expect("failed to set histogram buckets")
        .install_recorder()
        .expect("failed to install Prometheus recorder")
}

/// Register metric descriptions so Prometheus output includes HELP/TYPE
/// lines from startup, not just after first use.
fn describe_metrics() {
    describe_counter!(
        "storefront_http_requests_total",
        "Total number of HTTP requests"
    );
    describe_histogram!(
        "storefront_http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_gauge!(
        "storefront_http_requests_in_flight",
        "Number of HTTP requests currently being processed"
    );

    gauge!("storefront_http_requests_in_flight").set(0.0);
}
