//! Fleetwatch Core
//!
//! Core types and abstractions for the Fleetwatch deployment monitor.
//!
//! This crate contains:
//! - Domain types: Core business entities (Snapshot, HostRecord, Environment)
//! - DTOs: Data transfer objects for the webhook notification payload

pub mod domain;
pub mod dto;
