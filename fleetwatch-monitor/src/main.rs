//! Fleetwatch Monitor
//!
//! Observes a fleet deployment by polling the log files the deployment
//! process leaves behind, and reports aggregate status to a chat webhook.
//!
//! Architecture:
//! - Configuration: webhook settings from a YAML file, the rest from the CLI
//! - Services: snapshot aggregation and webhook notification
//! - Scheduler: the polling loop with change detection and exit conditions
//!
//! The monitor classifies each `deployment_*.log` file as completed,
//! failed, or in progress, and notifies the webhook when the completed or
//! failed counts move.

mod config;
mod logging;
mod scheduler;
mod service;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use fleetwatch_core::domain::environment::Environment;
use tokio::sync::broadcast;
use tracing::info;

use crate::config::MonitorConfig;
use crate::scheduler::DeploymentMonitor;
use crate::service::{Notifier, StatusAggregator};

#[derive(Parser)]
#[command(name = "fleetwatch-monitor")]
#[command(about = "Monitor fleet deployment status from log files", long_about = None)]
struct Cli {
    /// Target environment
    #[arg(value_enum)]
    environment: Environment,

    /// Configuration file path
    #[arg(short, long, default_value = "monitor_config.yml")]
    config: PathBuf,

    /// Polling interval in seconds
    #[arg(short, long, default_value_t = 30)]
    interval: u64,

    /// Total monitoring duration in seconds
    #[arg(short, long, default_value_t = 3600)]
    duration: u64,

    /// Directory containing the deployment log files
    #[arg(long, env = "FLEETWATCH_LOG_DIR", default_value = "logs")]
    log_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs flush on exit
    let _guard = logging::init_logging(&cli.log_dir, cli.environment)?;

    info!("Starting deployment monitoring for {}", cli.environment);

    // A missing or malformed configuration file is fatal
    let config = MonitorConfig::from_file(&cli.config)?;

    let aggregator = StatusAggregator::new(&cli.log_dir);
    let notifier = Notifier::new(&config, cli.environment);
    let monitor = DeploymentMonitor::new(
        aggregator,
        notifier,
        Duration::from_secs(cli.interval),
        Duration::from_secs(cli.duration),
    );

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(());
        }
    });

    monitor.run(shutdown_rx).await;

    Ok(())
}
