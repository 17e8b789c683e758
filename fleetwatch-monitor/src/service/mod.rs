//! Service layer
//!
//! Services contain the monitor's business logic: snapshot aggregation
//! from log files and webhook notification delivery. The scheduler drives
//! them once per polling cycle.

mod aggregator;
mod notifier;

pub use aggregator::StatusAggregator;
pub use notifier::{Delivery, Notifier, NotifyError, build_payload};
