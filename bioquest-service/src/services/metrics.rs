//! Prometheus metrics for bioquest-service.
//!
//! HTTP request metrics come from the `metrics` facade (recorded by
//! `service_core::middleware::metrics`); upstream call metrics live in a
//! dedicated prometheus registry.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};
use std::sync::OnceLock;
use std::time::Duration;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
pub static PROMETHEUS_REGISTRY: OnceLock<Registry> = OnceLock::new();
pub static UPSTREAM_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static UPSTREAM_REQUEST_DURATION_SECONDS: OnceLock<HistogramVec> = OnceLock::new();

/// Initialize all metrics. Call once at startup.
pub fn init_metrics() -> anyhow::Result<()> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("failed to install Prometheus recorder: {}", e))?;

    if METRICS_HANDLE.set(handle).is_err() {
        anyhow::bail!("metrics already initialized");
    }

    let registry = Registry::new();

    let upstream_requests = IntCounterVec::new(
        Opts::new(
            "upstream_requests_total",
            "Third-party API calls by provider and outcome",
        ),
        &["provider", "outcome"],
    )?;

    let upstream_duration = HistogramVec::new(
        HistogramOpts::new(
            "upstream_request_duration_seconds",
            "Third-party API call latency in seconds",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["provider"],
    )?;

    registry.register(Box::new(upstream_requests.clone()))?;
    registry.register(Box::new(upstream_duration.clone()))?;

    let _ = PROMETHEUS_REGISTRY.set(registry);
    let _ = UPSTREAM_REQUESTS_TOTAL.set(upstream_requests);
    let _ = UPSTREAM_REQUEST_DURATION_SECONDS.set(upstream_duration);

    Ok(())
}

pub fn get_metrics() -> String {
    let mut output = METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string());

    if let Some(registry) = PROMETHEUS_REGISTRY.get() {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let metric_families = registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer).ok();
        if let Ok(custom_metrics) = String::from_utf8(buffer) {
            output.push_str(&custom_metrics);
        }
    }

    output
}

/// No-op until `init_metrics` has run.
pub fn record_upstream_call(provider: &str, outcome: &str, elapsed: Duration) {
    if let Some(counter) = UPSTREAM_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[provider, outcome]).inc();
    }
    if let Some(histogram) = UPSTREAM_REQUEST_DURATION_SECONDS.get() {
        histogram
            .with_label_values(&[provider])
            .observe(elapsed.as_secs_f64());
    }
}
