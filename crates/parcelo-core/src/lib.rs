// SPDX-FileCopyrightText: 2026 Parcelo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Parcelo courier toolkit.
//!
//! This crate provides the domain types, error taxonomy, and the explicit
//! order-status transition table used throughout the Parcelo workspace. The
//! tracking reconciler lives in `parcelo-tracking`, the backend client in
//! `parcelo-api`.

pub mod error;
pub mod transitions;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{ParceloError, TimestampError};
pub use transitions::{is_valid_transition, successors, validate_transition};
pub use types::{
    parse_timestamp, OrderId, OrderStatus, StaffId, TrackingRecord, TrackingStatus, WarehouseId,
};
