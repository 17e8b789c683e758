//! Deployment monitor loop
//!
//! Drives the polling cadence: take a snapshot, compare against the last
//! one, log and notify on meaningful transitions, then sleep. The loop
//! exits when the deployment completes, the monitoring window elapses, or
//! a shutdown signal arrives; a final notification goes out on any exit.

use std::time::Duration;

use fleetwatch_core::domain::snapshot::Snapshot;
use tokio::sync::broadcast;
use tokio::time::{self, Instant};
use tracing::{debug, error, info};

use crate::service::{Delivery, Notifier, StatusAggregator};

/// Terminal state of a monitoring run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorOutcome {
    /// No log file remained in progress and at least one host was seen
    Complete,
    /// A shutdown signal interrupted the loop
    Stopped,
    /// The configured duration elapsed first
    TimedOut,
}

impl std::fmt::Display for MonitorOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MonitorOutcome::Complete => write!(f, "complete"),
            MonitorOutcome::Stopped => write!(f, "stopped"),
            MonitorOutcome::TimedOut => write!(f, "timed out"),
        }
    }
}

/// Polls deployment status and reports transitions until a terminal state
pub struct DeploymentMonitor {
    aggregator: StatusAggregator,
    notifier: Notifier,
    interval: Duration,
    duration: Duration,
}

impl DeploymentMonitor {
    /// Creates a monitor with the given polling interval and total window
    pub fn new(
        aggregator: StatusAggregator,
        notifier: Notifier,
        interval: Duration,
        duration: Duration,
    ) -> Self {
        Self {
            aggregator,
            notifier,
            interval,
            duration,
        }
    }

    /// Runs the monitoring loop until a terminal condition is reached
    ///
    /// Snapshot errors are logged and the loop continues on the next cycle;
    /// only the timeout, completion, and shutdown conditions end the run.
    /// Both checks happen at the iteration boundary, so the elapsed time at
    /// exit overshoots the window by at most one interval.
    pub async fn run(&self, mut shutdown: broadcast::Receiver<()>) -> MonitorOutcome {
        info!(
            "Starting deployment monitoring (interval: {:?}, duration: {:?})",
            self.interval, self.duration
        );

        let start = Instant::now();
        let mut last_snapshot: Option<Snapshot> = None;

        let outcome = loop {
            if start.elapsed() >= self.duration {
                info!("Monitoring window elapsed");
                break MonitorOutcome::TimedOut;
            }

            match self.aggregator.snapshot() {
                Ok(snapshot) => {
                    self.report_transitions(&snapshot, last_snapshot.as_ref())
                        .await;

                    let complete = snapshot.is_complete();
                    // Replaced every cycle, whether or not anything fired
                    last_snapshot = Some(snapshot);

                    if complete {
                        info!("Deployment monitoring complete");
                        break MonitorOutcome::Complete;
                    }
                }
                Err(e) => error!("Error during monitoring cycle: {:#}", e),
            }

            tokio::select! {
                _ = time::sleep(self.interval) => {}
                _ = shutdown.recv() => {
                    info!("Monitoring interrupted");
                    break MonitorOutcome::Stopped;
                }
            }
        };

        // Final status notification, sent regardless of change
        if let Some(snapshot) = &last_snapshot {
            self.deliver(snapshot).await;
        }

        info!("Deployment monitoring ended ({})", outcome);
        outcome
    }

    /// Logs a changed snapshot and notifies when the counts moved
    async fn report_transitions(&self, snapshot: &Snapshot, prev: Option<&Snapshot>) {
        if prev.is_some_and(|prev| !snapshot.differs_from(prev)) {
            return;
        }

        info!(
            "Status update: {}/{} completed, {} failed, {} in progress",
            snapshot.completed, snapshot.total_hosts, snapshot.failed, snapshot.in_progress
        );

        // First snapshot only establishes the baseline
        if let Some(prev) = prev
            && snapshot.counts_differ_from(prev)
        {
            self.deliver(snapshot).await;
        }
    }

    /// Best-effort delivery; failures are logged, never retried this cycle
    async fn deliver(&self, snapshot: &Snapshot) {
        match self.notifier.notify(snapshot).await {
            Ok(Delivery::Sent) => {}
            Ok(Delivery::Skipped) => debug!("Webhook disabled, notification skipped"),
            Err(e) => error!("Failed to send webhook notification: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MonitorConfig;
    use fleetwatch_core::domain::environment::Environment;
    use std::fs;
    use tempfile::TempDir;

    fn quiet_notifier() -> Notifier {
        Notifier::new(&MonitorConfig::default(), Environment::Dev)
    }

    fn monitor_over(dir: &TempDir, interval: Duration, duration: Duration) -> DeploymentMonitor {
        DeploymentMonitor::new(
            StatusAggregator::new(dir.path()),
            quiet_notifier(),
            interval,
            duration,
        )
    }

    #[tokio::test]
    async fn test_completes_when_all_hosts_finished() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("deployment_web1.log"), "Host: web1\nSUCCESS").unwrap();
        fs::write(dir.path().join("deployment_web2.log"), "Host: web2\nFAILED").unwrap();

        let monitor = monitor_over(&dir, Duration::from_millis(10), Duration::from_secs(5));
        let (_tx, rx) = broadcast::channel(1);

        assert_eq!(monitor.run(rx).await, MonitorOutcome::Complete);
    }

    #[tokio::test]
    async fn test_empty_directory_times_out() {
        let dir = TempDir::new().unwrap();
        let interval = Duration::from_millis(10);
        let duration = Duration::from_millis(60);
        let monitor = monitor_over(&dir, interval, duration);
        let (_tx, rx) = broadcast::channel(1);

        let started = Instant::now();
        assert_eq!(monitor.run(rx).await, MonitorOutcome::TimedOut);
        // Overshoot is bounded by one polling interval (plus scheduling slack)
        assert!(started.elapsed() < duration + interval + Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_in_progress_deployment_does_not_complete() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("deployment_web1.log"), "Host: web1\nworking").unwrap();

        let monitor = monitor_over(&dir, Duration::from_millis(10), Duration::from_millis(60));
        let (_tx, rx) = broadcast::channel(1);

        assert_eq!(monitor.run(rx).await, MonitorOutcome::TimedOut);
    }

    #[tokio::test]
    async fn test_shutdown_signal_stops_the_loop() {
        let dir = TempDir::new().unwrap();

        let monitor = monitor_over(&dir, Duration::from_secs(30), Duration::from_secs(3600));
        let (tx, rx) = broadcast::channel(1);

        let handle = tokio::spawn(async move { monitor.run(rx).await });

        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(()).unwrap();

        assert_eq!(handle.await.unwrap(), MonitorOutcome::Stopped);
    }

    #[tokio::test]
    async fn test_unreadable_directory_keeps_looping() {
        // A file where the directory should be forces a read_dir error
        let dir = TempDir::new().unwrap();
        let bogus = dir.path().join("not_a_dir");
        fs::write(&bogus, "plain file").unwrap();

        let monitor = DeploymentMonitor::new(
            StatusAggregator::new(&bogus),
            quiet_notifier(),
            Duration::from_millis(10),
            Duration::from_millis(60),
        );
        let (_tx, rx) = broadcast::channel(1);

        // Cycle errors are absorbed; the run still ends by timeout
        assert_eq!(monitor.run(rx).await, MonitorOutcome::TimedOut);
    }
}
