// SPDX-FileCopyrightText: 2026 Parcelo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `parcelo deliveries` -- the driver's delivery list.
//!
//! Fetches the driver's tracking feed, reconciles it to one record per
//! order, and renders the today / previous / failed buckets the driver
//! works from.

use chrono::{DateTime, Utc};
use parcelo_api::CourierClient;
use parcelo_core::{ParceloError, StaffId};
use parcelo_tracking::{
    classify, delivery_buckets, reduce_to_latest_per_order, sort_descending_by_timestamp,
    BUCKET_FAILED, BUCKET_PREVIOUS, BUCKET_TODAY,
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
    let mut buckets = classify(&outcome.canonical, &delivery_buckets(), now);
    for records in buckets.values_mut() {
        sort_descending_by_timestamp(records);
    }

    if json {
        return render::json(&buckets);
    }

    for name in [BUCKET_TODAY, BUCKET_PREVIOUS, BUCKET_FAILED] {
        if let Some(records) = buckets.get(name) {
            render::bucket(name, records);
        }
    }
    Ok(())
}
