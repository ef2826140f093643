// SPDX-FileCopyrightText: 2026 Parcelo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Courier backend client for the Parcelo toolkit.
//!
//! [`CourierClient`] wraps the backend's JSON-over-HTTP endpoints: the
//! tracking-feed and roster fetches the list views render, and the status,
//! tracking, assignment, and package mutations the workflows fire. Status
//! mutations are validated against the order lifecycle in `parcelo-core`
//! before any request leaves the process.

pub mod client;
pub mod types;

pub use client::CourierClient;
pub use types::{
    AssignedCount, Driver, DriverLoad, PackageDimensions, PackageRegistration, ShippingQuote,
    ShippingQuoteRequest, StatusUpdate, TrackingEventRequest, TrackingUpdateRequest,
};
