use std::time::Duration;

use metrics::{counter, histogram};

pub fn record_pinning_upload(status: &str, duration: Duration, bytes: usize) {
    counter!(
        "pq_pinning_uploads_total",
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        "pq_pinning_upload_duration_seconds",
        "status" => status.to_string()
    )
    .record(duration.as_secs_f64());
    histogram!("pq_pinning_upload_bytes").record(bytes as f64);
}

pub fn record_gateway_fetch(gateway: &str, status: &str) {
    counter!(
        "pq_pinning_gateway_fetch_total",
        "gateway" => gateway.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}
