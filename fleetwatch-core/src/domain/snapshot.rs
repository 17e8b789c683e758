//! Deployment status snapshot
//!
//! A snapshot is one point-in-time aggregate view of deployment status
//! across all known hosts. Snapshots are built fresh on every polling
//! cycle and never mutated afterwards; the monitor loop keeps only the
//! most recent one for change detection.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Last-known classification of a single host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostStatus {
    Completed,
    Failed,
}

impl std::fmt::Display for HostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostStatus::Completed => write!(f, "completed"),
            HostStatus::Failed => write!(f, "failed"),
        }
    }
}

/// A host's classification and the time it was observed
///
/// Owned exclusively by the snapshot's host map and overwritten (not
/// merged) whenever a later log file mentions the same host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostRecord {
    pub status: HostStatus,
    pub timestamp: DateTime<Utc>,
}

impl HostRecord {
    /// Creates a record observed right now
    pub fn observed(status: HostStatus) -> Self {
        Self {
            status,
            timestamp: Utc::now(),
        }
    }
}

/// Aggregate view of all observed hosts at one instant
///
/// The per-file counters (`completed`, `failed`, `in_progress`) count log
/// files, while `hosts` deduplicates by host name, so the counters do not
/// necessarily sum to `total_hosts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Distinct hosts seen across all log files
    pub total_hosts: usize,

    /// Log files containing a success marker
    pub completed: usize,

    /// Log files containing a failure marker (and no success marker)
    pub failed: usize,

    /// Log files with neither marker yet
    pub in_progress: usize,

    /// Last-known record per host name
    pub hosts: BTreeMap<String, HostRecord>,
}

impl Snapshot {
    /// Number of log files that contributed to the per-file counters
    pub fn files_scanned(&self) -> usize {
        self.completed + self.failed + self.in_progress
    }

    /// Whether the deployment has finished
    ///
    /// Requires at least one host to have been seen so that an empty log
    /// directory does not read as instant completion.
    pub fn is_complete(&self) -> bool {
        self.in_progress == 0 && self.total_hosts > 0
    }

    /// Change detection against the previous cycle's snapshot
    ///
    /// Compares the four counters plus each host's name and status.
    /// Per-host timestamps are deliberately excluded: they are captured
    /// fresh at classification time, so including them would report a
    /// change on every single cycle.
    pub fn differs_from(&self, prev: &Snapshot) -> bool {
        if self.total_hosts != prev.total_hosts
            || self.completed != prev.completed
            || self.failed != prev.failed
            || self.in_progress != prev.in_progress
            || self.hosts.len() != prev.hosts.len()
        {
            return true;
        }

        self.hosts.iter().any(|(name, record)| {
            prev.hosts
                .get(name)
                .is_none_or(|p| p.status != record.status)
        })
    }

    /// Whether the completed or failed counter moved since `prev`
    ///
    /// This is the "significant change" test that gates webhook delivery.
    pub fn counts_differ_from(&self, prev: &Snapshot) -> bool {
        self.completed != prev.completed || self.failed != prev.failed
    }
}
