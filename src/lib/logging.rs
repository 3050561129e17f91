use std::path::Path;
use std::sync::Arc;
use std::{fs, io};

use anyhow::{Context, Result};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Three sinks: stdout at INFO+, stderr at WARN+, and an optional append-mode
/// file at DEBUG+ when a log file is configured. Parent directories of the
/// log file are created first. Initialized once per process, never torn down.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let timer = ChronoLocal::new(TIMESTAMP_FORMAT.to_string());

    let stdout_layer = fmt::layer()
        .with_timer(timer.clone())
        .with_target(false)
        .with_writer(io::stdout)
        .with_filter(LevelFilter::INFO);

    let stderr_layer = fmt::layer()
        .with_timer(timer.clone())
        .with_target(false)
        .with_writer(io::stderr)
        .with_filter(LevelFilter::WARN);

    let file_layer = match log_file {
        Some(path) => Some(
            fmt::layer()
                .with_timer(timer)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Arc::new(open_log_file(path)?))
                .with_filter(LevelFilter::DEBUG),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("logging already initialized")?;

    Ok(())
}

fn open_log_file(path: &Path) -> Result<fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("cannot create log directory {}", parent.display()))?;
    }

    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))
}
