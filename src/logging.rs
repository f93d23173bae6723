use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::Rotation;

/// Prefix of the rotating diagnostic log files
pub const LOG_PREFIX: &str = "studylog";

/// Route `tracing` output to a daily-rotating file under `log_dir`.
/// Nothing is written to the terminal: both shells draw on it.
pub fn enable_logging(log_dir: &Path, level: LevelFilter) -> Result<()> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let appender = tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(5)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix("log")
        .build(log_dir)?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(format!(
            "{}={level}",
            env!("CARGO_PKG_NAME").replace('-', "_"),
        )))
        .with_ansi(false)
        .with_writer(appender)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;
    Ok(())
}
