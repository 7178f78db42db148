//! Tracing subscriber and Prometheus exporter setup.

mod config;

use std::net::SocketAddr;

pub(crate) use config::{LogFormat, LoggerConfig, TelemetryConfig, TelemetryMetricsConfig};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber, then the metrics exporter when enabled.
///
/// `RUST_LOG` wins over the configured level.
pub(crate) fn initialize(logger_config: &LoggerConfig, telemetry_config: &TelemetryConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logger_config.level));
    let registry = tracing_subscriber::registry().with(filter);

    match logger_config.format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_target(true).with_thread_ids(false))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true).flatten_event(true))
            .init(),
    }

    let metrics = &telemetry_config.metrics;
    if !metrics.enabled {
        tracing::debug!("Prometheus metrics exporter disabled");
        return;
    }

    match install_metrics_exporter(&metrics.bind_address) {
        Ok(bind_address) => tracing::info!(
            bind_address = %bind_address,
            "Prometheus metrics exporter enabled"
        ),
        Err(error) => tracing::warn!(
            bind_address = %metrics.bind_address,
            error = %error,
            "Metrics exporter not started"
        ),
    }
}

#[derive(Debug, thiserror::Error)]
enum MetricsExporterError {
    #[error("invalid bind address: {0}")]
    BindAddress(#[from] std::net::AddrParseError),
    #[error(transparent)]
    Build(#[from] BuildError),
}

fn install_metrics_exporter(bind_address: &str) -> Result<SocketAddr, MetricsExporterError> {
    let bind_address: SocketAddr = bind_address.parse()?;
    PrometheusBuilder::new()
        .with_http_listener(bind_address)
        .install()?;
    Ok(bind_address)
}
