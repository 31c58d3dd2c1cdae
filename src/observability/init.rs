//! Tracing subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service and instrumentation scope name reported in every trace.
pub const SERVICE_NAME: &str = "PatientRegistry";

/// Trace file name inside the plugin data directory.
pub const TRACE_FILE_NAME: &str = "patient-registry-otlp.json";

const DEFAULT_TRACE_LEVEL: &str = "info";

/// Installs the global subscriber with file-based OTLP export.
///
/// Observability is optional: if the data directory cannot be created or a
/// subscriber is already installed, the plugin runs without tracing. Returns
/// whether this call installed the subscriber.
///
/// An invalid `trace_level` directive falls back to `"info"`.
pub fn init_tracing(config: &Config) -> bool {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_TRACE_LEVEL);
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACE_LEVEL));

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return false;
    }

    let resource = Resource::new(vec![
        opentelemetry::KeyValue::new("service.name", SERVICE_NAME),
        opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        opentelemetry::KeyValue::new("api.base_url", config.client.base_url().to_string()),
    ]);

    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init()
        .is_ok()
}
