//! Telemetry logic.
//! Support tracing and logging for embedders without their own subscriber.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Install a global `fmt` subscriber driven by `RUST_LOG`.
///
/// Fails silently if a subscriber is already set, so a host application
/// keeps its own telemetry pipeline.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init();
}
