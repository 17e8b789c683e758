//! Data Transfer Objects for outbound communication
//!
//! This module contains the wire-format types Fleetwatch sends to external
//! systems. They mirror the chat-webhook attachment schema rather than the
//! internal domain model.

pub mod notification;
