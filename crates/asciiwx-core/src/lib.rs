//! Shared plumbing for asciiwx: configuration, the application error type
//! and logging setup.

pub mod config;
pub mod error;

pub use config::{Config, LocationConfig, RefreshConfig, ValidationResult};
pub use error::AppError;

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize tracing with output to stderr.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(env_filter()).init();

    tracing::info!("asciiwx core initialized");
    Ok(())
}

/// Initialize tracing with output appended to `asciiwx.log` under `dir`.
///
/// The panel owns the terminal while it runs, so the interactive binary
/// logs to a file instead of stderr. The returned guard flushes buffered
/// log lines; hold it until the process exits.
pub fn init_to_file(dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir).context("Failed to create log directory")?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("asciiwx.log"))
        .context("Failed to open log file")?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .init();

    tracing::info!("asciiwx core initialized");
    Ok(guard)
}
