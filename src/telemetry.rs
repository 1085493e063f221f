//! src/telemetry.rs
use crate::configuration::TelemetrySettings;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Installs the global subscriber: human-readable events on stderr, filtered
/// by `RUST_LOG` (default `info`). Spans are also exported over OTLP when an
/// endpoint is configured; the returned provider must then be shut down
/// before exit to flush them.
pub fn init_tracing(
    service_name: &'static str,
    settings: &TelemetrySettings,
) -> anyhow::Result<Option<SdkTracerProvider>> {
    let tracer_provider = match &settings.otlp_endpoint {
        Some(endpoint) => Some(
            SdkTracerProvider::builder()
                .with_resource(
                    opentelemetry_sdk::Resource::builder()
                        .with_service_name(service_name)
                        .build(),
                )
                .with_batch_exporter(
                    opentelemetry_otlp::SpanExporter::builder()
                        .with_tonic()
                        .with_endpoint(endpoint.clone())
                        .build()?,
                )
                .build(),
        ),
        None => None,
    };

    let otel_layer = tracer_provider.as_ref().map(|provider| {
        opentelemetry::global::set_tracer_provider(provider.clone());
        tracing_opentelemetry::layer().with_tracer(provider.tracer(service_name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_thread_ids(true)
                .with_target(false),
        )
        .with(otel_layer)
        .try_init()?;

    Ok(tracer_provider)
}
