// SPDX-FileCopyrightText: 2026 Parcelo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types for the Parcelo courier toolkit.
//!
//! The wire model mirrors the courier backend's JSON field names
//! (`OrderID`, `assigned_at`/`Timestamp`, `Order_status`, ...) so that
//! records deserialize from every endpoint unchanged. Status labels on the
//! wire are the backend's Vietnamese strings; the enums here give them
//! closed, typed names while preserving unrecognized labels verbatim.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{Display, EnumString};

use crate::error::TimestampError;

/// Unique identifier for an order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct OrderId(pub i64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a staff member (driver or warehouse staff).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct StaffId(pub i64);

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a warehouse.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct WarehouseId(pub i64);

impl fmt::Display for WarehouseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coarse order lifecycle state.
///
/// Display/FromStr produce and accept the backend's wire labels, so
/// `OrderStatus::Completed.to_string()` is exactly what goes into a
/// `newStatus` request body. Labels the backend introduces that this enum
/// does not know yet survive as [`OrderStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, EnumString)]
pub enum OrderStatus {
    /// "Mới tạo" -- order registered, not yet at a warehouse.
    #[strum(serialize = "Mới tạo")]
    Created,
    /// "Đã tiếp nhận" -- received at the origin warehouse.
    #[strum(serialize = "Đã tiếp nhận")]
    Received,
    /// "Chờ chuyển kho" -- waiting for inter-warehouse transfer.
    #[strum(serialize = "Chờ chuyển kho")]
    PendingTransfer,
    /// "Cần lấy" -- assigned to a driver for pickup.
    #[strum(serialize = "Cần lấy")]
    AwaitingPickup,
    /// "Đang lấy" -- driver en route to the sender.
    #[strum(serialize = "Đang lấy")]
    PickingUp,
    /// "Đã lấy" -- parcel in the driver's possession.
    #[strum(serialize = "Đã lấy")]
    PickedUp,
    /// "Đang giao" -- out for delivery to the receiver.
    #[strum(serialize = "Đang giao")]
    OutForDelivery,
    /// "Hoàn thành" -- delivered.
    #[strum(serialize = "Hoàn thành")]
    Completed,
    /// "Thất bại" -- delivery attempt failed.
    #[strum(serialize = "Thất bại")]
    Failed,
    /// "Trả về kho" -- returned to the warehouse after failed delivery.
    #[strum(serialize = "Trả về kho")]
    Returned,
    /// Any label this enum does not know. Preserved verbatim.
    #[strum(default)]
    Other(String),
}

impl OrderStatus {
    /// Parse a wire label; unknown labels become [`OrderStatus::Other`].
    pub fn from_label(label: &str) -> Self {
        label
            .parse()
            .unwrap_or_else(|_| OrderStatus::Other(label.to_string()))
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(OrderStatus::from_label(&s))
    }
}

/// Finer-grained tracking sub-status attached to individual tracking rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, EnumString)]
pub enum TrackingStatus {
    /// "Cần lấy" -- pickup pending.
    #[strum(serialize = "Cần lấy")]
    AwaitingPickup,
    /// "Đang lấy" -- pickup in progress.
    #[strum(serialize = "Đang lấy")]
    PickingUp,
    /// "Đã lấy" -- picked up from the sender.
    #[strum(serialize = "Đã lấy")]
    PickedUp,
    /// "Lấy thất bại" -- pickup attempt failed.
    #[strum(serialize = "Lấy thất bại")]
    PickupFailed,
    /// "Đã giao cho kho" -- handed over to the warehouse.
    #[strum(serialize = "Đã giao cho kho")]
    DeliveredToWarehouse,
    /// "Đang vận chuyển" -- in transit between warehouses.
    #[strum(serialize = "Đang vận chuyển")]
    InTransit,
    /// Any label this enum does not know. Preserved verbatim.
    #[strum(default)]
    Other(String),
}

impl TrackingStatus {
    /// Parse a wire label; unknown labels become [`TrackingStatus::Other`].
    pub fn from_label(label: &str) -> Self {
        label
            .parse()
            .unwrap_or_else(|_| TrackingStatus::Other(label.to_string()))
    }
}

impl Serialize for TrackingStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TrackingStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(TrackingStatus::from_label(&s))
    }
}

/// One observed state of one order at one point in time.
///
/// The tracking feed is append-only: a single order accumulates one row per
/// status transition, so any list of these may contain several rows per
/// `OrderID`. Reconciliation into a canonical per-order view lives in
/// `parcelo-tracking`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingRecord {
    /// Order this row belongs to. Rows without one are dropped by dedup.
    #[serde(rename = "OrderID", default)]
    pub order_id: Option<OrderId>,

    /// Human-facing order code.
    #[serde(
        rename = "Order_code",
        alias = "order_code",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub order_code: Option<String>,

    /// The row's effective time, as received. Kept raw so an unparseable
    /// value degrades per the reconciler's rules instead of failing
    /// deserialization of the whole response.
    #[serde(rename = "assigned_at", alias = "Timestamp", default)]
    pub assigned_at: Option<String>,

    /// Coarse order lifecycle state at this point in time.
    #[serde(rename = "Order_status", default)]
    pub order_status: Option<OrderStatus>,

    /// Finer-grained tracking sub-status, where the endpoint provides one.
    #[serde(
        rename = "Tracking_status",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub tracking_status: Option<TrackingStatus>,

    /// Free-text notes (e.g. a failure reason).
    #[serde(
        rename = "Tracking_notes",
        alias = "notes",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub tracking_notes: Option<String>,

    // Payload passengers: rendered, never interpreted.
    #[serde(
        rename = "Receiver_name",
        alias = "receiver_name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub receiver_name: Option<String>,
    #[serde(
        rename = "Receiver_address",
        alias = "receiver_address",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub receiver_address: Option<String>,
    #[serde(
        rename = "Receiver_phone",
        alias = "receiver_phone",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub receiver_phone: Option<String>,
    #[serde(
        rename = "Sender_name",
        alias = "sender_name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sender_name: Option<String>,
    #[serde(
        rename = "Sender_address",
        alias = "sender_address",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sender_address: Option<String>,
    #[serde(rename = "Weight", default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(rename = "Ship_cost", default, skip_serializing_if = "Option::is_none")]
    pub ship_cost: Option<f64>,
    #[serde(
        rename = "Service_name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub service_name: Option<String>,
    #[serde(
        rename = "Warehouse_name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub warehouse_name: Option<String>,
}

impl TrackingRecord {
    /// The row's effective time parsed to UTC, if present and parseable.
    pub fn assigned_at_utc(&self) -> Option<DateTime<Utc>> {
        self.assigned_at
            .as_deref()
            .and_then(|raw| parse_timestamp(raw).ok())
    }
}

/// Parse a backend timestamp into UTC.
///
/// Accepts RFC 3339 (the documented format) and falls back to a naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]` with an optional space separator, which some
/// endpoints emit; naive values are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, TimestampError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }
    Err(TimestampError {
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_status_round_trips_wire_labels() {
        use std::str::FromStr;

        let known = [
            (OrderStatus::Created, "Mới tạo"),
            (OrderStatus::Received, "Đã tiếp nhận"),
            (OrderStatus::PendingTransfer, "Chờ chuyển kho"),
            (OrderStatus::AwaitingPickup, "Cần lấy"),
            (OrderStatus::PickingUp, "Đang lấy"),
            (OrderStatus::PickedUp, "Đã lấy"),
            (OrderStatus::OutForDelivery, "Đang giao"),
            (OrderStatus::Completed, "Hoàn thành"),
            (OrderStatus::Failed, "Thất bại"),
            (OrderStatus::Returned, "Trả về kho"),
        ];
        for (status, label) in known {
            assert_eq!(status.to_string(), label);
            assert_eq!(OrderStatus::from_str(label).unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_label_is_preserved() {
        let status: OrderStatus = serde_json::from_str("\"Đang kiểm hàng\"").unwrap();
        assert_eq!(status, OrderStatus::Other("Đang kiểm hàng".into()));
        assert_eq!(
            serde_json::to_string(&status).unwrap(),
            "\"Đang kiểm hàng\""
        );
    }

    #[test]
    fn record_deserializes_from_assigned_orders_row() {
        let json = r#"{
            "OrderID": 42,
            "Order_code": "DH042",
            "assigned_at": "2024-01-10T08:00:00Z",
            "Order_status": "Đang giao",
            "Receiver_name": "Nguyễn Văn A",
            "Receiver_address": "12 Lê Lợi, Q1",
            "Service_name": "Giao nhanh",
            "Weight": 1.5
        }"#;
        let record: TrackingRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.order_id, Some(OrderId(42)));
        assert_eq!(record.order_status, Some(OrderStatus::OutForDelivery));
        assert_eq!(
            record.assigned_at_utc().unwrap().to_rfc3339(),
            "2024-01-10T08:00:00+00:00"
        );
    }

    #[test]
    fn record_accepts_timestamp_alias_and_tracking_fields() {
        let json = r#"{
            "OrderID": 7,
            "Timestamp": "2024-02-01T10:30:00Z",
            "Order_status": "Mới tạo",
            "Tracking_status": "Đang lấy",
            "Tracking_notes": "Khách hẹn chiều"
        }"#;
        let record: TrackingRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.tracking_status, Some(TrackingStatus::PickingUp));
        assert!(record.assigned_at_utc().is_some());
    }

    #[test]
    fn parse_timestamp_accepts_rfc3339_and_naive() {
        assert!(parse_timestamp("2024-01-10T08:00:00Z").is_ok());
        assert!(parse_timestamp("2024-01-10T08:00:00+07:00").is_ok());
        assert!(parse_timestamp("2024-01-10T08:00:00").is_ok());
        assert!(parse_timestamp("2024-01-10 08:00:00.123").is_ok());
        assert!(parse_timestamp("hôm qua").is_err());
    }

    #[test]
    fn naive_timestamps_are_taken_as_utc() {
        let naive = parse_timestamp("2024-01-10T08:00:00").unwrap();
        let explicit = parse_timestamp("2024-01-10T08:00:00Z").unwrap();
        assert_eq!(naive, explicit);
    }
}
