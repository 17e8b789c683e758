//! Logging setup
//!
//! Human-readable timestamped lines go to the console and, through a
//! non-blocking appender, to a per-environment file named
//! `deployment_monitor_<environment>.log` inside the log directory.
//! The returned `WorkerGuard` must stay alive for the life of the process
//! or buffered file output is lost on exit.

use std::path::Path;

use anyhow::{Context, Result};
use fleetwatch_core::domain::environment::Environment;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initializes the console and file logging layers
pub fn init_logging(log_dir: &Path, environment: Environment) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let file_appender = rolling::never(
        log_dir,
        format!("deployment_monitor_{}.log", environment.as_str()),
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer();
    let file_layer = fmt::layer().with_ansi(false).with_writer(non_blocking);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fleetwatch_monitor=info,fleetwatch_client=info".into());

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}
