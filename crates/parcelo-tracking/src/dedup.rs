// SPDX-FileCopyrightText: 2026 Parcelo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-order deduplication of the append-only tracking feed.
//!
//! The backend returns one row per status transition, so a single order
//! shows up many times. [`reduce_to_latest_per_order`] collapses the feed to
//! the canonical row per `OrderID`: the one with the maximum effective
//! timestamp, ties resolved last-encountered-wins.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parcelo_core::{parse_timestamp, OrderId, TrackingRecord};
use tracing::warn;

/// A non-fatal anomaly observed while deduplicating a feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DedupWarning {
    /// The record at this input position had no `OrderID` and was dropped.
    MissingOrderId { index: usize },
    /// The record had no timestamp at all; it loses every comparison.
    MissingTimestamp { order_id: OrderId },
    /// The record's timestamp failed to parse; it loses every comparison.
    UnparseableTimestamp { order_id: OrderId, value: String },
}

/// Result of [`reduce_to_latest_per_order`]: the canonical records plus any
/// anomalies encountered. Anomalies are recoverable by construction and
/// never abort the reduction.
#[derive(Debug, Clone, PartialEq)]
pub struct DedupOutcome {
    /// Exactly one record per distinct `OrderID` of the input, in order of
    /// each order's first appearance.
    pub canonical: Vec<TrackingRecord>,
    /// Anomalies observed along the way.
    pub warnings: Vec<DedupWarning>,
}

/// Collapse a raw tracking feed to the latest record per order.
///
/// For each distinct `OrderID`, exactly one record is retained: the one
/// whose `assigned_at` parses to the maximum instant. A record whose
/// timestamp is missing or unparseable compares below every parseable one,
/// so it is only retained when no alternative exists for its order. Records
/// with no `OrderID` are dropped. Equal timestamps resolve to the record
/// encountered later in the input.
///
/// Single pass, O(n); output preserves first-appearance order. Idempotent.
pub fn reduce_to_latest_per_order(records: Vec<TrackingRecord>) -> DedupOutcome {
    let mut warnings = Vec::new();
    let mut slot_by_order: HashMap<OrderId, usize> = HashMap::new();
    let mut slots: Vec<(Option<DateTime<Utc>>, TrackingRecord)> = Vec::new();

    for (index, record) in records.into_iter().enumerate() {
        let Some(order_id) = record.order_id else {
            warn!(index, "tracking record without OrderID dropped");
            warnings.push(DedupWarning::MissingOrderId { index });
            continue;
        };

        let effective_at = match record.assigned_at.as_deref() {
            Some(raw) => match parse_timestamp(raw) {
                Ok(at) => Some(at),
                Err(err) => {
                    warn!(%order_id, value = %err.value, "unparseable tracking timestamp");
                    warnings.push(DedupWarning::UnparseableTimestamp {
                        order_id,
                        value: err.value,
                    });
                    None
                }
            },
            None => {
                warn!(%order_id, "tracking record without timestamp");
                warnings.push(DedupWarning::MissingTimestamp { order_id });
                None
            }
        };

        match slot_by_order.entry(order_id) {
            Entry::Occupied(slot) => {
                let existing = &mut slots[*slot.get()];
                // `None < Some(_)`, so timestamp-less records lose to any
                // parseable one; `>=` gives ties to the later record.
                if effective_at >= existing.0 {
                    *existing = (effective_at, record);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(slots.len());
                slots.push((effective_at, record));
            }
        }
    }

    DedupOutcome {
        canonical: slots.into_iter().map(|(_, record)| record).collect(),
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parcelo_core::OrderStatus;
    use proptest::prelude::*;

    fn record(order_id: Option<i64>, at: Option<&str>, status: OrderStatus) -> TrackingRecord {
        TrackingRecord {
            order_id: order_id.map(OrderId),
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
    fn latest_record_wins_per_order() {
        // The worked example: two rows for order 1, the 09:00 one survives.
        let outcome = reduce_to_latest_per_order(vec![
            record(Some(1), Some("2024-01-10T08:00:00Z"), OrderStatus::OutForDelivery),
            record(Some(1), Some("2024-01-10T09:00:00Z"), OrderStatus::Completed),
        ]);
        assert_eq!(outcome.canonical.len(), 1);
        assert_eq!(
            outcome.canonical[0].order_status,
            Some(OrderStatus::Completed)
        );
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn equal_timestamps_resolve_to_the_later_record() {
        let outcome = reduce_to_latest_per_order(vec![
            record(Some(1), Some("2024-01-10T08:00:00Z"), OrderStatus::PickingUp),
            record(Some(1), Some("2024-01-10T08:00:00Z"), OrderStatus::PickedUp),
        ]);
        assert_eq!(outcome.canonical[0].order_status, Some(OrderStatus::PickedUp));
    }

    #[test]
    fn output_preserves_first_appearance_order() {
        let outcome = reduce_to_latest_per_order(vec![
            record(Some(3), Some("2024-01-10T08:00:00Z"), OrderStatus::Created),
            record(Some(1), Some("2024-01-10T09:00:00Z"), OrderStatus::Created),
            record(Some(3), Some("2024-01-10T10:00:00Z"), OrderStatus::Received),
            record(Some(2), Some("2024-01-10T11:00:00Z"), OrderStatus::Created),
        ]);
        let ids: Vec<_> = outcome
            .canonical
            .iter()
            .map(|r| r.order_id.unwrap().0)
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn record_without_order_id_is_dropped_with_warning() {
        let outcome = reduce_to_latest_per_order(vec![
            record(None, Some("2024-01-10T08:00:00Z"), OrderStatus::Created),
            record(Some(1), Some("2024-01-10T08:00:00Z"), OrderStatus::Created),
        ]);
        assert_eq!(outcome.canonical.len(), 1);
        assert_eq!(outcome.warnings, vec![DedupWarning::MissingOrderId { index: 0 }]);
    }

    #[test]
    fn unparseable_timestamp_loses_to_any_parseable_one() {
        let outcome = reduce_to_latest_per_order(vec![
            record(Some(1), Some("not a date"), OrderStatus::Completed),
            record(Some(1), Some("2020-01-01T00:00:00Z"), OrderStatus::Created),
        ]);
        assert_eq!(outcome.canonical[0].order_status, Some(OrderStatus::Created));
        assert_eq!(
            outcome.warnings,
            vec![DedupWarning::UnparseableTimestamp {
                order_id: OrderId(1),
                value: "not a date".into(),
            }]
        );
    }

    #[test]
    fn unparseable_timestamp_is_kept_when_it_is_the_only_record() {
        let outcome = reduce_to_latest_per_order(vec![record(
            Some(1),
            Some("not a date"),
            OrderStatus::Created,
        )]);
        assert_eq!(outcome.canonical.len(), 1);
    }

    #[test]
    fn missing_timestamp_warns_and_loses_ties_to_later_missing() {
        let outcome = reduce_to_latest_per_order(vec![
            record(Some(1), None, OrderStatus::Created),
            record(Some(1), None, OrderStatus::Received),
        ]);
        assert_eq!(outcome.canonical[0].order_status, Some(OrderStatus::Received));
        assert_eq!(outcome.warnings.len(), 2);
    }

    prop_compose! {
        fn arb_record()(
            order_id in 0i64..6,
            hour in 0u32..24,
            completed in any::<bool>(),
        ) -> TrackingRecord {
            record(
                Some(order_id),
                Some(&format!("2024-01-10T{hour:02}:00:00Z")),
                if completed { OrderStatus::Completed } else { OrderStatus::Failed },
            )
        }
    }

    proptest! {
        #[test]
        fn one_canonical_record_per_distinct_order(records in prop::collection::vec(arb_record(), 0..40)) {
            let input_ids: std::collections::HashSet<_> =
                records.iter().filter_map(|r| r.order_id).collect();
            let outcome = reduce_to_latest_per_order(records);
            let output_ids: Vec<_> =
                outcome.canonical.iter().filter_map(|r| r.order_id).collect();
            let unique: std::collections::HashSet<_> = output_ids.iter().copied().collect();
            prop_assert_eq!(output_ids.len(), unique.len());
            prop_assert_eq!(unique, input_ids);
        }

        #[test]
        fn retained_timestamp_is_maximal(records in prop::collection::vec(arb_record(), 0..40)) {
            let outcome = reduce_to_latest_per_order(records.clone());
            for kept in &outcome.canonical {
                let kept_at = kept.assigned_at_utc();
                for other in records.iter().filter(|r| r.order_id == kept.order_id) {
                    prop_assert!(kept_at >= other.assigned_at_utc());
                }
            }
        }

        #[test]
        fn reduction_is_idempotent(records in prop::collection::vec(arb_record(), 0..40)) {
            let once = reduce_to_latest_per_order(records);
            let twice = reduce_to_latest_per_order(once.canonical.clone());
            prop_assert_eq!(once.canonical, twice.canonical);
            prop_assert!(twice.warnings.is_empty());
        }
    }
}
