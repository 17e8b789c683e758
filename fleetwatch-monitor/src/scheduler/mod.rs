//! Scheduler layer for the monitor
//!
//! This layer owns the polling loop that repeatedly snapshots deployment
//! status and decides when to notify and when to stop.

pub mod monitor;

pub use monitor::{DeploymentMonitor, MonitorOutcome};
