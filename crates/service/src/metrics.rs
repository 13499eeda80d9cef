use std::time::Duration;

use once_cell::sync::Lazy;
use prometheus::{register_histogram_vec, Encoder, HistogramVec, TextEncoder};

// Prometheus metrics (default registry)
pub static SERVICE_CALL_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "product_api_service_call_duration_seconds",
        "Service call latency in seconds, by operation and outcome",
        &["operation", "outcome"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("register service_call_duration")
});

pub fn record_call(operation: &str, ok: bool, took: Duration) {
    let outcome = if ok { "ok" } else { "error" };
    SERVICE_CALL_DURATION
        .with_label_values(&[operation, outcome])
        .observe(took.as_secs_f64());
}

/// Render the default registry in the text exposition format.
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
