//! Logging setup.
//!
//! Console logging is always on. If OTEL_EXPORTER_OTLP_ENDPOINT is set and the
//! collector answers, traces and logs are exported to it as well.

use opentelemetry::trace::TracerProvider;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use std::env;
use std::error::Error;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_SERVICE_NAME: &str = "cookbook-server";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Quick TCP check to see if the collector is up (resolve hostname first)
fn collector_reachable(endpoint: &str) -> bool {
    let host_port = endpoint
        .trim_start_matches("http://")
        .trim_start_matches("https://")
        .trim_end_matches('/');

    host_port
        .to_socket_addrs()
        .ok()
        .and_then(|mut addrs| addrs.next())
        .map(|addr| TcpStream::connect_timeout(&addr, Duration::from_millis(100)).is_ok())
        .unwrap_or(false)
}

fn build_providers(
    endpoint: &str,
    service_name: &str,
) -> Result<(SdkTracerProvider, SdkLoggerProvider), Box<dyn Error + Send + Sync>> {
    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(service_name.to_string())
        .build();

    let trace_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let trace_provider = SdkTracerProvider::builder()
        .with_batch_exporter(trace_exporter)
        .with_resource(resource.clone())
        .build();

    let log_exporter = opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let log_provider = SdkLoggerProvider::builder()
        .with_batch_exporter(log_exporter)
        .with_resource(resource)
        .build();

    Ok((trace_provider, log_provider))
}

fn init_console_only() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub fn init_telemetry() {
    let Some(endpoint) = env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok() else {
        init_console_only();
        tracing::debug!("OTEL_EXPORTER_OTLP_ENDPOINT not set, using console logging only");
        return;
    };

    if !collector_reachable(&endpoint) {
        init_console_only();
        tracing::info!(
            "OpenTelemetry endpoint {} not reachable, using console logging only",
            endpoint
        );
        return;
    }

    let service_name =
        env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| DEFAULT_SERVICE_NAME.to_string());

    match build_providers(&endpoint, &service_name) {
        Ok((trace_provider, log_provider)) => {
            let tracer = trace_provider.tracer(DEFAULT_SERVICE_NAME);
            opentelemetry::global::set_tracer_provider(trace_provider);

            tracing_subscriber::registry()
                .with(env_filter())
                .with(tracing_subscriber::fmt::layer())
                .with(tracing_opentelemetry::layer().with_tracer(tracer))
                .with(OpenTelemetryTracingBridge::new(&log_provider))
                .init();

            tracing::info!(
                "OpenTelemetry enabled, exporting traces and logs to {} as {}",
                endpoint,
                service_name
            );
        }
        Err(e) => {
            init_console_only();
            tracing::warn!("Failed to set up OpenTelemetry export to {}: {}", endpoint, e);
        }
    }
}
