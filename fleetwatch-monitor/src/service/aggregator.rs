//! Status aggregator
//!
//! Scans a directory of per-host deployment log files and builds a
//! [`Snapshot`] by classifying each file on its content markers. A file
//! counts as completed when it contains `SUCCESS`, failed when it contains
//! `FAILED`, and in-progress otherwise. Host names are pulled from lines
//! of the form `Host: <name>`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fleetwatch_core::domain::snapshot::{HostRecord, HostStatus, Snapshot};
use tracing::{debug, error};

/// Marker written by a deployment run that finished cleanly
const SUCCESS_MARKER: &str = "SUCCESS";

/// Marker written by a deployment run that gave up
const FAILED_MARKER: &str = "FAILED";

/// Prefix of a host-identity line; the host name follows it
const HOST_PREFIX: &str = "Host: ";

/// Builds status snapshots from a deployment log directory
pub struct StatusAggregator {
    log_dir: PathBuf,
}

impl StatusAggregator {
    /// Creates an aggregator over the given log directory
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
        }
    }

    /// Takes a fresh snapshot of the deployment status
    ///
    /// Per-file read errors are logged and the file is skipped; the scan
    /// always yields a (possibly partial) snapshot. A missing log directory
    /// is an empty deployment, not an error. Only a failure to enumerate an
    /// existing directory is returned to the caller.
    pub fn snapshot(&self) -> Result<Snapshot> {
        let mut snapshot = Snapshot::default();

        let entries = match fs::read_dir(&self.log_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Log directory {} does not exist yet", self.log_dir.display());
                return Ok(snapshot);
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("failed to read log directory {}", self.log_dir.display())
                });
            }
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| is_deployment_log(path))
            .collect();
        // Deterministic processing order so the last file wins ties
        paths.sort();

        for path in &paths {
            match fs::read_to_string(path) {
                Ok(contents) => classify_file(&contents, &mut snapshot),
                Err(e) => error!("Error reading log file {}: {}", path.display(), e),
            }
        }

        snapshot.total_hosts = snapshot.hosts.len();

        debug!(
            "Scanned {} log file(s): {} completed, {} failed, {} in progress",
            paths.len(),
            snapshot.completed,
            snapshot.failed,
            snapshot.in_progress
        );

        Ok(snapshot)
    }
}

/// Whether a path looks like a per-host deployment log
///
/// The monitor writes its own log as `deployment_monitor_<env>.log` in the
/// same directory; counting that file would leave one entry permanently
/// in progress, so it is excluded here.
fn is_deployment_log(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.starts_with("deployment_")
        && name.ends_with(".log")
        && !name.starts_with("deployment_monitor")
}

/// Classifies one log file's contents into the snapshot
///
/// The success marker takes precedence over the failure marker. Counters
/// increment once per file; every `Host: ` line upserts a host entry.
/// The host mapping knows only completed and failed: hosts from files
/// without a success marker are recorded as failed even while the file is
/// still counted in progress.
fn classify_file(contents: &str, snapshot: &mut Snapshot) {
    let succeeded = contents.contains(SUCCESS_MARKER);

    if succeeded {
        snapshot.completed += 1;
    } else if contents.contains(FAILED_MARKER) {
        snapshot.failed += 1;
    } else {
        snapshot.in_progress += 1;
    }

    let status = if succeeded {
        HostStatus::Completed
    } else {
        HostStatus::Failed
    };

    for line in contents.lines() {
        if let Some((_, rest)) = line.split_once(HOST_PREFIX) {
            let host = rest.trim();
            if !host.is_empty() {
                snapshot
                    .hosts
                    .insert(host.to_string(), HostRecord::observed(status));
            }
        }
    }
}
