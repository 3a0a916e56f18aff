//! One-shot startup timing: prints an absolute monotonic clock reading taken
//! as soon as `main` runs, followed by the placeholder tuple that closes the
//! measurement record. The launching harness subtracts its own reading of the
//! same clock to get the startup time.
//!
//! Usage: cargo run --release --bin startup

use std::io::{self, Write};

use anyhow::{Context, Result};
use pfannkuchen::runner::{monotonic_seconds, startup_report};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let reading = monotonic_seconds().context("reading the monotonic clock")?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    debug!(reading, "startup measured");

    let mut out = io::stdout().lock();
    writeln!(out, "{}", startup_report(reading)).context("writing startup report")?;
    out.flush().context("flushing stdout")?;
    Ok(())
}
