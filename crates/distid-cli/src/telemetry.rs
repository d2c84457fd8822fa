//! Log output for the `distid` binary.
//!
//! Generator diagnostics arrive as `tracing` events. They are formatted with
//! a timestamp and written to stderr, keeping stdout for the IDs themselves.
//! Filtering comes from `RUST_LOG` and defaults to `info`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}
