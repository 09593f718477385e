//! # Tide Pool Finder Entry Point
//!
//! Checks every configured location once and prints which ones have a low
//! tide during daylight hours today. Diagnostics go to stderr; findings go
//! to stdout. Skipped locations do not change the exit code.

// Test modules
#[cfg(test)]
mod tests;

use chrono::Local;
use std::io::{self, Write};
use tide_pool_lib::{config::Config, finder::TidePoolFinder};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a compact stderr logger, overridable through `RUST_LOG`.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tide_pool_lib=info,tide_pool_finder=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::load();
    let finder = TidePoolFinder::new(config)?;
    info!(locations = finder.locations().len(), "Checking tide pools");

    // Locations are scanned one at a time, so a single thread is enough
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let today = Local::now().date_naive();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    rt.block_on(finder.run(today, &mut out))?;
    out.flush()?;

    Ok(())
}
