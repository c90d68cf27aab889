//! Tracing Integration
//!
//! Configures the tracing subscriber for the price stream core.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log filter (default: `price_stream=info`)

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// Safe to call more than once; subsequent calls are no-ops.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("price_stream=info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
