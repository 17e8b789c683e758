//! Core domain types
//!
//! This module contains the core domain structures used across Fleetwatch
//! components. These types represent the fundamental entities shared between
//! the aggregator (which builds them) and the notifier (which reports them).

pub mod environment;
pub mod snapshot;
