// SPDX-FileCopyrightText: 2026 Parcelo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ordering and per-status summaries for rendered lists.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use parcelo_core::{OrderStatus, TrackingRecord};
use serde::Serialize;

/// Sort records most-recent-first by effective timestamp.
///
/// Stable: records with equal timestamps keep their relative order, and
/// records with no parseable timestamp sink to the end.
pub fn sort_descending_by_timestamp(records: &mut [TrackingRecord]) {
    records.sort_by_cached_key(|record| Reverse(record.assigned_at_utc()));
}

/// Counts of records per status label within one bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    /// Count per wire status label, deterministically ordered.
    pub counts: BTreeMap<String, usize>,
    /// Total records seen, including those without a status.
    pub total: usize,
}

impl StatusSummary {
    pub fn count_of(&self, status: &OrderStatus) -> usize {
        self.counts.get(&status.to_string()).copied().unwrap_or(0)
    }

    /// "Hoàn thành: N" for the history header.
    pub fn completed(&self) -> usize {
        self.count_of(&OrderStatus::Completed)
    }

    /// "Thất bại: N" for the history header.
    pub fn failed(&self) -> usize {
        self.count_of(&OrderStatus::Failed)
    }
}

/// Count canonical records per `Order_status` label.
pub fn summarize(records: &[TrackingRecord]) -> StatusSummary {
    let mut summary = StatusSummary::default();
    for record in records {
        summary.total += 1;
        if let Some(status) = &record.order_status {
            *summary.counts.entry(status.to_string()).or_default() += 1;
        }
    }
    summary
}

/// Count canonical records per `Tracking_status` label.
pub fn summarize_tracking(records: &[TrackingRecord]) -> StatusSummary {
    let mut summary = StatusSummary::default();
    for record in records {
        summary.total += 1;
        if let Some(status) = &record.tracking_status {
            *summary.counts.entry(status.to_string()).or_default() += 1;
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use parcelo_core::OrderId;

    fn record(order_id: i64, at: Option<&str>, status: OrderStatus) -> TrackingRecord {
        TrackingRecord {
            order_id: Some(OrderId(order_id)),
            order_code: None,
            assigned_at: at.map(str::to_string),
            order_status: Some(status),
            tracking_status: None,
            tracking_notes: None,
            receiver_name: None,
            receiver_address: None,
            receiver_phone: None,
            sender_name: None,
            sender_address: None,
            weight: None,
            ship_cost: None,
            service_name: None,
            warehouse_name: None,
        }
    }

    #[test]
    fn sorts_most_recent_first_with_broken_timestamps_last() {
        let mut records = vec![
            record(1, Some("2024-01-10T08:00:00Z"), OrderStatus::Completed),
            record(2, Some("không rõ"), OrderStatus::Completed),
            record(3, Some("2024-01-12T08:00:00Z"), OrderStatus::Completed),
            record(4, Some("2024-01-11T08:00:00Z"), OrderStatus::Completed),
        ];
        sort_descending_by_timestamp(&mut records);
        let ids: Vec<_> = records.iter().map(|r| r.order_id.unwrap().0).collect();
        assert_eq!(ids, vec![3, 4, 1, 2]);
    }

    #[test]
    fn sort_is_stable_for_equal_timestamps() {
        let mut records = vec![
            record(1, Some("2024-01-10T08:00:00Z"), OrderStatus::Completed),
            record(2, Some("2024-01-10T08:00:00Z"), OrderStatus::Completed),
            record(3, Some("2024-01-10T08:00:00Z"), OrderStatus::Completed),
        ];
        sort_descending_by_timestamp(&mut records);
        let ids: Vec<_> = records.iter().map(|r| r.order_id.unwrap().0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn summarize_counts_match_a_manual_tally() {
        // Ten rows over five orders, pre-reconciled to one per order.
        let raw = vec![
            record(1, Some("2024-01-01T08:00:00Z"), OrderStatus::OutForDelivery),
            record(1, Some("2024-01-02T08:00:00Z"), OrderStatus::Completed),
            record(2, Some("2024-01-01T08:00:00Z"), OrderStatus::OutForDelivery),
            record(2, Some("2024-01-03T08:00:00Z"), OrderStatus::Failed),
            record(3, Some("2024-01-04T08:00:00Z"), OrderStatus::Completed),
            record(3, Some("2024-01-01T08:00:00Z"), OrderStatus::OutForDelivery),
            record(4, Some("2024-01-05T08:00:00Z"), OrderStatus::Completed),
            record(4, Some("2024-01-01T08:00:00Z"), OrderStatus::Created),
            record(5, Some("2024-01-06T08:00:00Z"), OrderStatus::Failed),
            record(5, Some("2024-01-01T08:00:00Z"), OrderStatus::OutForDelivery),
        ];
        let canonical = crate::reduce_to_latest_per_order(raw).canonical;
        let summary = summarize(&canonical);
        assert_eq!(summary.completed(), 3);
        assert_eq!(summary.failed(), 2);
        assert_eq!(summary.total, 5);
    }

    #[test]
    fn records_without_status_count_only_toward_total() {
        let mut no_status = record(1, None, OrderStatus::Created);
        no_status.order_status = None;
        let summary = summarize(&[no_status]);
        assert_eq!(summary.total, 1);
        assert!(summary.counts.is_empty());
    }
}
