// SPDX-FileCopyrightText: 2026 Parcelo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request and response types for the courier backend.
//!
//! Field names and casing follow the backend exactly, including its mixed
//! conventions: `/orders/{id}/status` takes camelCase `newStatus`,
//! `/tracking` takes snake_case, `/update-tracking` takes camelCase, and
//! assignment routes take PascalCase `StaffID`/`OrderID`. The serde renames
//! here are the single place that knowledge lives.

use parcelo_core::{OrderId, OrderStatus, StaffId, TrackingStatus, WarehouseId};
use serde::{Deserialize, Serialize};

/// A driver as returned by `GET /drivers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    #[serde(rename = "StaffID")]
    pub staff_id: StaffId,
    #[serde(
        rename = "Staff_name",
        alias = "name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(rename = "Phone", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Response of `GET /drivers/{id}/assigned-count`.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignedCount {
    /// Missing means zero, matching the original client's `count || 0`.
    #[serde(default)]
    pub count: Option<u64>,
}

/// A driver joined with their concurrently fetched assignment count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverLoad {
    #[serde(flatten)]
    pub driver: Driver,
    pub assigned_count: u64,
}

/// Body of `PUT /orders/{id}/status`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdateRequest {
    #[serde(rename = "newStatus")]
    pub new_status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_image: Option<String>,
}

/// A requested status mutation, validated against the transition table
/// before any request is issued.
#[derive(Debug, Clone)]
pub struct StatusUpdate {
    pub new_status: OrderStatus,
    /// Free-text notes, e.g. a delivery failure reason.
    pub notes: Option<String>,
    /// Proof-of-delivery photo reference captured by the device.
    pub proof_image: Option<String>,
}

impl StatusUpdate {
    pub fn new(new_status: OrderStatus) -> Self {
        Self {
            new_status,
            notes: None,
            proof_image: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_proof_image(mut self, proof_image: impl Into<String>) -> Self {
        self.proof_image = Some(proof_image.into());
        self
    }
}

/// Body of `POST /tracking` (a full tracking event with location fix).
#[derive(Debug, Clone, Serialize)]
pub struct TrackingEventRequest {
    pub order_id: OrderId,
    pub staff_id: StaffId,
    pub status: TrackingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// RFC 3339 event time.
    pub timestamp: String,
}

/// Body of `POST /update-tracking` (the backend's second tracking route).
#[derive(Debug, Clone, Serialize)]
pub struct TrackingUpdateRequest {
    #[serde(rename = "orderId")]
    pub order_id: OrderId,
    #[serde(rename = "staffId")]
    pub staff_id: StaffId,
    pub status: TrackingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body of `POST /orders/{id}/assign`.
#[derive(Debug, Clone, Serialize)]
pub struct AssignDriverRequest {
    #[serde(rename = "StaffID")]
    pub staff_id: StaffId,
}

/// Body of `POST /delivery-assignments`.
#[derive(Debug, Clone, Serialize)]
pub struct PickupAssignmentRequest {
    #[serde(rename = "OrderID")]
    pub order_id: OrderId,
    #[serde(rename = "StaffID")]
    pub staff_id: StaffId,
}

/// Parcel dimensions in centimeters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageDimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

/// Body of `POST /orders/{id}/package`, registering the physical parcel at
/// warehouse intake.
#[derive(Debug, Clone, Serialize)]
pub struct PackageRegistration {
    pub order_id: OrderId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<i64>,
    pub weight: f64,
    pub dimensions: PackageDimensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    pub current_warehouse_id: WarehouseId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ship_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_type: Option<String>,
}

/// Body of `POST /shipping/calculate`.
#[derive(Debug, Clone, Serialize)]
pub struct ShippingQuoteRequest {
    pub from: String,
    pub to: String,
    pub weight: f64,
    #[serde(rename = "itemValue", skip_serializing_if = "Option::is_none")]
    pub item_value: Option<f64>,
    #[serde(rename = "serviceName", skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
}

/// Response of `POST /shipping/calculate`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShippingQuote {
    pub total: f64,
    pub distance: f64,
    #[serde(rename = "regionType")]
    pub region_type: String,
}

/// Error body some backend routes return on failure.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Extract a human-readable message from an error response body, falling
/// back to the raw body when it is not the known JSON shape.
pub fn api_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed
            .message
            .or(parsed.error)
            .unwrap_or_else(|| body.to_string()),
        Err(_) => body.to_string(),
    }
}
