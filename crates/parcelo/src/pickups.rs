// SPDX-FileCopyrightText: 2026 Parcelo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `parcelo pickups` -- orders waiting for pickup, plus the driver's
//! in-progress pickup if one exists.

use parcelo_api::CourierClient;
use parcelo_core::{ParceloError, StaffId, TrackingRecord};
use parcelo_tracking::sort_descending_by_timestamp;
use serde::Serialize;

use crate::render;

#[derive(Serialize)]
struct PickupView {
    active: Option<TrackingRecord>,
    waiting: Vec<TrackingRecord>,
}

pub async fn run(client: &CourierClient, staff: StaffId, json: bool) -> Result<(), ParceloError> {
    let active = client.active_pickup(staff).await?;
    let mut waiting = client.orders().await?;
    sort_descending_by_timestamp(&mut waiting);

    if json {
        return render::json(&PickupView { active, waiting });
    }

    match &active {
        Some(record) => {
            render::section("active pickup", 1);
            println!("{}", render::record_line(record));
            println!();
        }
        None => {
            render::section("active pickup", 0);
            println!("  (none)");
            println!();
        }
    }
    render::bucket("waiting for pickup", &waiting);
    Ok(())
}
