//! Process-wide tracing setup shared by the helper binaries.
//!
//! Diagnostics go to stderr so stdout stays reserved for query output that
//! callers may pipe or parse. `RUST_LOG` takes precedence when set.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("assetdeck=info"));
    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}
