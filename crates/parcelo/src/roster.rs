// SPDX-FileCopyrightText: 2026 Parcelo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `parcelo roster` -- the driver roster with live assigned-order counts.
//!
//! Counts are fetched concurrently, one request per driver, and joined
//! before rendering; a failed lookup shows as zero rather than failing the
//! roster.

use colored::Colorize;
use parcelo_api::CourierClient;
use parcelo_core::ParceloError;

use crate::render;

pub async fn run(client: &CourierClient, json: bool) -> Result<(), ParceloError> {
    let drivers = client.drivers().await?;
    let loads = client.assigned_counts(&drivers).await;

    if json {
        return render::json(&loads);
    }

    println!("{:<8} {:<24} {}", "ID".bold(), "DRIVER".bold(), "ORDERS".bold());
    for load in &loads {
        println!(
            "{:<8} {:<24} {}",
            load.driver.staff_id.to_string(),
            load.driver.name.as_deref().unwrap_or("-"),
            load.assigned_count
        );
    }
    Ok(())
}
