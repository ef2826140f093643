// SPDX-FileCopyrightText: 2026 Parcelo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `parcelo history` -- the driver's closed-order history by month.
//!
//! Filters the feed to closed orders before reconciliation, exactly as the
//! history view always did: an order whose latest closed row is completed
//! counts as completed even if a newer open row exists.

use chrono::{DateTime, Utc};
use parcelo_api::CourierClient;
use parcelo_core::{OrderStatus, ParceloError, StaffId};
use parcelo_tracking::{
    classify, history_buckets, reduce_to_latest_per_order, sort_descending_by_timestamp,
    summarize, BUCKET_CURRENT_MONTH, BUCKET_PREVIOUS_MONTH,
};
use serde::Serialize;

use crate::render;

#[derive(Serialize)]
struct MonthView {
    completed: usize,
    failed: usize,
    orders: Vec<parcelo_core::TrackingRecord>,
}

pub async fn run(
    client: &CourierClient,
    staff: StaffId,
    now: DateTime<Utc>,
    json: bool,
) -> Result<(), ParceloError> {
    let feed = client.assigned_orders(staff).await?;
    let closed: Vec<_> = feed
        .into_iter()
        .filter(|record| {
            matches!(
                record.order_status,
                Some(OrderStatus::Completed) | Some(OrderStatus::Failed)
            )
        })
        .collect();
    let outcome = reduce_to_latest_per_order(closed);
    let mut buckets = classify(&outcome.canonical, &history_buckets(), now);
    for records in buckets.values_mut() {
        sort_descending_by_timestamp(records);
    }

    if json {
        let view: std::collections::BTreeMap<&String, MonthView> = buckets
            .iter()
            .map(|(name, records)| {
                let summary = summarize(records);
                (
                    name,
                    MonthView {
                        completed: summary.completed(),
                        failed: summary.failed(),
                        orders: records.clone(),
                    },
                )
            })
            .collect();
        return render::json(&view);
    }

    for name in [BUCKET_CURRENT_MONTH, BUCKET_PREVIOUS_MONTH] {
        if let Some(records) = buckets.get(name) {
            let summary = summarize(records);
            render::section(name, records.len());
            println!(
                "  Hoàn thành: {}  Thất bại: {}",
                summary.completed(),
                summary.failed()
            );
            for record in records {
                println!("{}", render::record_line(record));
            }
            println!();
        }
    }
    Ok(())
}
