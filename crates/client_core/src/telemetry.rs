//! Tracing init for the client (pretty dev logs by default).
//!
//! Also routes `log` macro output from the core crates through the same
//! subscriber. Safe to call more than once; later calls are no-ops.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Install the global subscriber. The `LOG_LEVEL` environment variable
/// takes an `EnvFilter` directive string; the default is `info`.
pub fn init_telemetry(dev_pretty: bool) {
    let filter = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = if dev_pretty {
        fmt::layer().pretty().boxed()
    } else {
        fmt::layer().boxed()
    };
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
    tracing::debug!(dev_pretty, "telemetry initialized");
}
