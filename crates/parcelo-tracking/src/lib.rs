// SPDX-FileCopyrightText: 2026 Parcelo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tracking-feed reconciliation for the Parcelo courier toolkit.
//!
//! The courier backend's tracking feed is append-only: one row per status
//! transition per order. Every list view needs the same reconciliation to
//! turn that feed into something renderable, and the original client
//! re-implemented it inline per screen with drifting tie-break behavior.
//! This crate is the single shared implementation:
//!
//! 1. [`reduce_to_latest_per_order`] -- one canonical record per order
//!    (max timestamp, documented last-wins tie-break, warnings for
//!    malformed rows).
//! 2. [`classify`] -- partition canonical records into named buckets via
//!    [`Predicate`] trees ("today", "previous month", "failed", ...).
//! 3. [`sort_descending_by_timestamp`] / [`summarize`] -- presentation
//!    order and per-status counts.
//!
//! Everything is a pure function over a snapshot of records plus an
//! explicit `now`; there is no caching, persistence, or hidden state.

pub mod buckets;
pub mod dedup;
pub mod summary;

pub use buckets::{
    classify, delivery_buckets, history_buckets, pickup_pipeline_bucket, BucketSpec, Predicate,
    BUCKET_CURRENT_MONTH, BUCKET_FAILED, BUCKET_PICKUP_PIPELINE, BUCKET_PREVIOUS,
    BUCKET_PREVIOUS_MONTH, BUCKET_TODAY,
};
pub use dedup::{reduce_to_latest_per_order, DedupOutcome, DedupWarning};
pub use summary::{
    sort_descending_by_timestamp, summarize, summarize_tracking, StatusSummary,
};
