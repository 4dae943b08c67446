use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingSettings;

const DEFAULT_FILTER: &str = "rondo=info";

/// Install the global subscriber when a log file is configured.
///
/// The terminal belongs to the TUI, so without a file nothing is installed
/// and `tracing` macros are no-ops.
pub fn init(settings: &LoggingSettings) -> Result<()> {
    let Some(path) = &settings.file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let fallback = settings.filter.as_deref().unwrap_or(DEFAULT_FILTER);
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("Failed to install log subscriber")?;
    Ok(())
}
