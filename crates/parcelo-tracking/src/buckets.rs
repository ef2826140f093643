// SPDX-FileCopyrightText: 2026 Parcelo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bucket classification of canonical tracking records.
//!
//! A bucket is a named partition defined by a predicate over one record and
//! an explicit `now`. Buckets are evaluated independently: a record appears
//! in every bucket whose predicate holds, and [`classify`] never
//! deduplicates across buckets. Callers wanting disjoint buckets must
//! supply predicates whose semantics are disjoint.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use parcelo_core::{OrderStatus, TrackingRecord, TrackingStatus};

/// Bucket names used by the stock bucket sets.
pub const BUCKET_TODAY: &str = "today";
pub const BUCKET_PREVIOUS: &str = "previous";
pub const BUCKET_FAILED: &str = "failed";
pub const BUCKET_CURRENT_MONTH: &str = "current_month";
pub const BUCKET_PREVIOUS_MONTH: &str = "previous_month";
pub const BUCKET_PICKUP_PIPELINE: &str = "pickup_pipeline";

/// A predicate over one canonical record and a reference `now`.
///
/// Calendar predicates (`SameCalendarDay`, `CalendarMonth`, `HasTimestamp`)
/// operate on the record's parsed UTC timestamp and are false when it is
/// missing or unparseable; status predicates ignore the timestamp entirely.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// The record's timestamp parses at all.
    HasTimestamp,
    /// The record's timestamp falls on the same UTC calendar day as `now`.
    SameCalendarDay,
    /// The record's timestamp falls in the calendar month `offset_back`
    /// months before `now`'s (0 = this month, 1 = previous month), with
    /// year rollover: January minus one month is December of the previous
    /// year.
    CalendarMonth { offset_back: u32 },
    /// The record's order status equals the given one.
    StatusIs(OrderStatus),
    /// The record's order status is one of the given set.
    StatusIn(Vec<OrderStatus>),
    /// The record's tracking sub-status is one of the given set.
    TrackingStatusIn(Vec<TrackingStatus>),
    /// Negation.
    Not(Box<Predicate>),
    /// Conjunction over all members (true when empty).
    All(Vec<Predicate>),
    /// Disjunction over any member (false when empty).
    Any(Vec<Predicate>),
}

impl Predicate {
    /// Evaluate against one record. Pure in its inputs.
    pub fn evaluate(&self, record: &TrackingRecord, now: DateTime<Utc>) -> bool {
        match self {
            Predicate::HasTimestamp => record.assigned_at_utc().is_some(),
            Predicate::SameCalendarDay => record
                .assigned_at_utc()
                .is_some_and(|at| at.date_naive() == now.date_naive()),
            Predicate::CalendarMonth { offset_back } => {
                record.assigned_at_utc().is_some_and(|at| {
                    let (year, month) = month_back(now.year(), now.month(), *offset_back);
                    at.year() == year && at.month() == month
                })
            }
            Predicate::StatusIs(status) => record.order_status.as_ref() == Some(status),
            Predicate::StatusIn(set) => record
                .order_status
                .as_ref()
                .is_some_and(|status| set.contains(status)),
            Predicate::TrackingStatusIn(set) => record
                .tracking_status
                .as_ref()
                .is_some_and(|status| set.contains(status)),
            Predicate::Not(inner) => !inner.evaluate(record, now),
            Predicate::All(members) => members.iter().all(|p| p.evaluate(record, now)),
            Predicate::Any(members) => members.iter().any(|p| p.evaluate(record, now)),
        }
    }
}

/// Walk `offset` months back from year/month (1-12), rolling over years.
fn month_back(year: i32, month: u32, offset: u32) -> (i32, u32) {
    let total = i64::from(year) * 12 + i64::from(month) - 1 - i64::from(offset);
    (
        total.div_euclid(12) as i32,
        (total.rem_euclid(12) + 1) as u32,
    )
}

/// A named bucket: records satisfying `predicate` at classification time.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketSpec {
    pub name: String,
    pub predicate: Predicate,
}

impl BucketSpec {
    pub fn new(name: impl Into<String>, predicate: Predicate) -> Self {
        Self {
            name: name.into(),
            predicate,
        }
    }
}

/// Partition canonical records into the given buckets.
///
/// Every bucket name appears in the output, empty or not. Records are
/// cloned into each bucket they satisfy. Two specs with the same name merge
/// into one bucket.
pub fn classify(
    records: &[TrackingRecord],
    buckets: &[BucketSpec],
    now: DateTime<Utc>,
) -> BTreeMap<String, Vec<TrackingRecord>> {
    let mut out: BTreeMap<String, Vec<TrackingRecord>> = BTreeMap::new();
    for bucket in buckets {
        let matched = out.entry(bucket.name.clone()).or_default();
        matched.extend(
            records
                .iter()
                .filter(|record| bucket.predicate.evaluate(record, now))
                .cloned(),
        );
    }
    out
}

/// The driver delivery view: today's assignable orders, earlier ones, and
/// failed deliveries. "Active" here means not failed and not already out
/// for delivery, matching what the delivery list offers a start button for.
pub fn delivery_buckets() -> Vec<BucketSpec> {
    let active = Predicate::Not(Box::new(Predicate::StatusIn(vec![
        OrderStatus::Failed,
        OrderStatus::OutForDelivery,
    ])));
    vec![
        BucketSpec::new(
            BUCKET_TODAY,
            Predicate::All(vec![Predicate::SameCalendarDay, active.clone()]),
        ),
        BucketSpec::new(
            BUCKET_PREVIOUS,
            Predicate::All(vec![
                Predicate::HasTimestamp,
                Predicate::Not(Box::new(Predicate::SameCalendarDay)),
                active,
            ]),
        ),
        BucketSpec::new(BUCKET_FAILED, Predicate::StatusIs(OrderStatus::Failed)),
    ]
}

/// The order-history view: this calendar month and the previous one.
/// Callers filter the feed to closed orders (Completed|Failed) before
/// deduplication, as the history screen does.
pub fn history_buckets() -> Vec<BucketSpec> {
    vec![
        BucketSpec::new(
            BUCKET_CURRENT_MONTH,
            Predicate::CalendarMonth { offset_back: 0 },
        ),
        BucketSpec::new(
            BUCKET_PREVIOUS_MONTH,
            Predicate::CalendarMonth { offset_back: 1 },
        ),
    ]
}

/// The warehouse view of a driver's pickup pipeline: orders still in their
/// initial lifecycle state whose tracking sub-status shows pickup progress.
pub fn pickup_pipeline_bucket() -> BucketSpec {
    BucketSpec::new(
        BUCKET_PICKUP_PIPELINE,
        Predicate::All(vec![
            Predicate::StatusIs(OrderStatus::Created),
            Predicate::TrackingStatusIn(vec![
                TrackingStatus::AwaitingPickup,
                TrackingStatus::PickingUp,
                TrackingStatus::PickedUp,
                TrackingStatus::InTransit,
            ]),
        ]),
    )
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

    fn at(raw: &str) -> DateTime<Utc> {
        parcelo_core::parse_timestamp(raw).unwrap()
    }

    #[test]
    fn month_back_rolls_over_the_year() {
        assert_eq!(month_back(2024, 1, 1), (2023, 12));
        assert_eq!(month_back(2024, 1, 0), (2024, 1));
        assert_eq!(month_back(2024, 3, 5), (2023, 10));
        assert_eq!(month_back(2024, 12, 24), (2022, 12));
    }

    #[test]
    fn leap_day_lands_in_the_previous_month_bucket() {
        let now = at("2024-03-01T00:00:00Z");
        let leap = record(1, Some("2024-02-29T12:00:00Z"), OrderStatus::Completed);
        let buckets = classify(&[leap], &history_buckets(), now);
        assert_eq!(buckets[BUCKET_PREVIOUS_MONTH].len(), 1);
        assert!(buckets[BUCKET_CURRENT_MONTH].is_empty());
    }

    #[test]
    fn january_previous_month_is_december_of_previous_year() {
        let now = at("2024-01-15T00:00:00Z");
        let december = record(1, Some("2023-12-30T08:00:00Z"), OrderStatus::Completed);
        let buckets = classify(&[december], &history_buckets(), now);
        assert_eq!(buckets[BUCKET_PREVIOUS_MONTH].len(), 1);
    }

    #[test]
    fn buckets_are_independent_not_exclusive() {
        let now = at("2024-01-10T12:00:00Z");
        let specs = vec![
            BucketSpec::new("same_day", Predicate::SameCalendarDay),
            BucketSpec::new("completed", Predicate::StatusIs(OrderStatus::Completed)),
        ];
        let both = record(1, Some("2024-01-10T08:00:00Z"), OrderStatus::Completed);
        let buckets = classify(&[both], &specs, now);
        assert_eq!(buckets["same_day"].len(), 1);
        assert_eq!(buckets["completed"].len(), 1);
    }

    #[test]
    fn delivery_buckets_split_today_previous_failed() {
        let now = at("2024-01-10T12:00:00Z");
        let records = vec![
            record(1, Some("2024-01-10T08:00:00Z"), OrderStatus::PickedUp),
            record(2, Some("2024-01-09T08:00:00Z"), OrderStatus::PickedUp),
            record(3, Some("2024-01-10T09:00:00Z"), OrderStatus::Failed),
            // Out for delivery is excluded from both day buckets.
            record(4, Some("2024-01-10T10:00:00Z"), OrderStatus::OutForDelivery),
        ];
        let buckets = classify(&records, &delivery_buckets(), now);
        assert_eq!(buckets[BUCKET_TODAY].len(), 1);
        assert_eq!(buckets[BUCKET_TODAY][0].order_id, Some(OrderId(1)));
        assert_eq!(buckets[BUCKET_PREVIOUS].len(), 1);
        assert_eq!(buckets[BUCKET_PREVIOUS][0].order_id, Some(OrderId(2)));
        assert_eq!(buckets[BUCKET_FAILED].len(), 1);
        assert_eq!(buckets[BUCKET_FAILED][0].order_id, Some(OrderId(3)));
    }

    #[test]
    fn unparseable_timestamp_fails_calendar_but_not_status_predicates() {
        let now = at("2024-01-10T12:00:00Z");
        let broken = record(1, Some("hôm qua"), OrderStatus::Failed);
        assert!(!Predicate::SameCalendarDay.evaluate(&broken, now));
        assert!(!Predicate::CalendarMonth { offset_back: 0 }.evaluate(&broken, now));
        assert!(!Predicate::HasTimestamp.evaluate(&broken, now));
        assert!(Predicate::StatusIs(OrderStatus::Failed).evaluate(&broken, now));

        // And therefore lands in the failed bucket but neither day bucket.
        let buckets = classify(&[broken], &delivery_buckets(), now);
        assert_eq!(buckets[BUCKET_FAILED].len(), 1);
        assert!(buckets[BUCKET_TODAY].is_empty());
        assert!(buckets[BUCKET_PREVIOUS].is_empty());
    }

    #[test]
    fn pickup_pipeline_requires_both_status_and_sub_status() {
        let now = at("2024-01-10T12:00:00Z");
        let mut in_pipeline = record(1, Some("2024-01-10T08:00:00Z"), OrderStatus::Created);
        in_pipeline.tracking_status = Some(TrackingStatus::PickingUp);
        let wrong_status = record(2, Some("2024-01-10T08:00:00Z"), OrderStatus::OutForDelivery);
        let no_sub_status = record(3, Some("2024-01-10T08:00:00Z"), OrderStatus::Created);

        let buckets = classify(
            &[in_pipeline, wrong_status, no_sub_status],
            &[pickup_pipeline_bucket()],
            now,
        );
        assert_eq!(buckets[BUCKET_PICKUP_PIPELINE].len(), 1);
        assert_eq!(
            buckets[BUCKET_PICKUP_PIPELINE][0].order_id,
            Some(OrderId(1))
        );
    }

    #[test]
    fn every_bucket_name_is_present_even_when_empty() {
        let now = at("2024-01-10T12:00:00Z");
        let buckets = classify(&[], &delivery_buckets(), now);
        assert_eq!(buckets.len(), 3);
        assert!(buckets.values().all(Vec::is_empty));
    }
}
