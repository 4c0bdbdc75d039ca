//! Tracing subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name reported as `service.name` and used for the tracer.
const SERVICE_NAME: &str = "notekeeper";

/// Trace file name inside the plugin data directory.
const TRACE_FILE: &str = "notekeeper-otlp.json";

/// Installs the global subscriber: an `EnvFilter` built from
/// `config.trace_level` and an OpenTelemetry layer exporting to
/// `<data dir>/notekeeper-otlp.json`.
///
/// Does nothing if the data directory cannot be created, and is a no-op on
/// every call after the first one that succeeded.
///
/// # Example
///
/// ```rust
/// use notekeeper::observability::init_tracing;
/// use notekeeper::Config;
///
/// let config = Config {
///     trace_level: "debug".to_string(),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// ```
pub fn init_tracing(config: &Config) {
    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let filter = EnvFilter::try_new(&config.trace_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        SERVICE_NAME,
    )]);
    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE), resource);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME)))
        .try_init();
}
