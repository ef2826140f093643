// SPDX-FileCopyrightText: 2026 Parcelo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `parcelo assigned` -- the warehouse view of one driver's pickup pipeline:
//! orders still in their initial state whose tracking sub-status shows
//! pickup progress.

use chrono::{DateTime, Utc};
use parcelo_api::CourierClient;
use parcelo_core::{ParceloError, StaffId};
use parcelo_tracking::{
    classify, pickup_pipeline_bucket, reduce_to_latest_per_order, sort_descending_by_timestamp,
    summarize_tracking, BUCKET_PICKUP_PIPELINE,
};

use crate::render;

pub async fn run(
    client: &CourierClient,
    staff: StaffId,
    now: DateTime<Utc>,
    json: bool,
) -> Result<(), ParceloError> {
    let feed = client.assigned_orders(staff).await?;
    let outcome = reduce_to_latest_per_order(feed);
    let mut buckets = classify(&outcome.canonical, &[pickup_pipeline_bucket()], now);
    let records = buckets.entry(BUCKET_PICKUP_PIPELINE.to_string()).or_default();
    sort_descending_by_timestamp(records);

    if json {
        return render::json(&buckets);
    }

    let records = &buckets[BUCKET_PICKUP_PIPELINE];
    render::bucket(BUCKET_PICKUP_PIPELINE, records);
    let by_sub_status = summarize_tracking(records);
    for (label, count) in &by_sub_status.counts {
        println!("  {label}: {count}");
    }
    Ok(())
}
