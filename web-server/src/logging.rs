//! Logging setup
//!
//! Console output (skipped in production) plus two plain-text log files in
//! the configured log directory: `combined.log` with everything the filter
//! lets through and `error.log` with errors only.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use case_report::ReportConfig;
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

pub const COMBINED_LOG: &str = "combined.log";
pub const ERROR_LOG: &str = "error.log";

/// Filter used when `RUST_LOG` is unset
pub fn default_filter(log_level: &str) -> String {
    format!("{log_level},tower_http=info")
}

pub fn open_log_file(dir: &Path, name: &str) -> anyhow::Result<File> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let path = dir.join(name);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

pub fn init(config: &ReportConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter(&config.log_level)))
        .context("Invalid log filter")?;

    let combined = Arc::new(open_log_file(&config.log_dir, COMBINED_LOG)?);
    let errors = Arc::new(open_log_file(&config.log_dir, ERROR_LOG)?);

    let console = (!config.is_production()).then(|| fmt::layer());

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(fmt::layer().with_ansi(false).with_writer(combined))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(errors)
                .with_filter(LevelFilter::ERROR),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}
