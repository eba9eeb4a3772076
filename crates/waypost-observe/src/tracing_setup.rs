//! Tracing subscriber initialization with structured logging and optional
//! OpenTelemetry trace export.
//!
//! `init_tracing` returns an [`OtelGuard`]; hold it for the life of the
//! process so buffered spans are flushed on drop.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Owns the OTel tracer provider (if any) and shuts it down on drop,
/// flushing pending spans before process exit.
pub struct OtelGuard {
    provider: Option<SdkTracerProvider>,
}

impl Drop for OtelGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(e) = provider.shutdown() {
                eprintln!("Warning: OTel tracer provider shutdown error: {e}");
            }
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// Always installs a structured `fmt` layer with target visibility and span
/// close timing, filtered by `RUST_LOG`. When `enable_otel` is true, tracing
/// spans are additionally bridged to OpenTelemetry through a stdout exporter
/// (suitable for local development; swap the exporter for OTLP in
/// production).
///
/// # Errors
///
/// Returns an error if a global subscriber has already been set.
pub fn init_tracing(enable_otel: bool) -> Result<OtelGuard, Box<dyn std::error::Error>> {
    let registry = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_span_events(FmtSpan::CLOSE),
        );

    if !enable_otel {
        registry.try_init()?;
        return Ok(OtelGuard { provider: None });
    }

    let provider = SdkTracerProvider::builder()
        .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
        .build();
    let tracer = provider.tracer("waypost");

    registry
        .with(tracing_opentelemetry::layer().with_tracer(tracer))
        .try_init()?;
    opentelemetry::global::set_tracer_provider(provider.clone());

    Ok(OtelGuard {
        provider: Some(provider),
    })
}
