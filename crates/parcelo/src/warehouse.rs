// SPDX-FileCopyrightText: 2026 Parcelo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `parcelo warehouse` -- the warehouse-side order lists.

use clap::ValueEnum;
use parcelo_api::CourierClient;
use parcelo_core::ParceloError;
use parcelo_tracking::sort_descending_by_timestamp;

use crate::render;

/// Which warehouse list to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WarehouseView {
    /// Freshly registered orders awaiting intake.
    New,
    /// Processed orders ready for driver assignment.
    Processed,
    /// Orders returned after failed delivery.
    Returned,
}

pub async fn run(
    client: &CourierClient,
    view: WarehouseView,
    json: bool,
) -> Result<(), ParceloError> {
    let mut orders = match view {
        WarehouseView::New => client.warehouse_new_orders().await?,
        WarehouseView::Processed => client.processed_orders().await?,
        WarehouseView::Returned => client.returned_orders().await?,
    };
    sort_descending_by_timestamp(&mut orders);

    if json {
        return render::json(&orders);
    }

    let title = match view {
        WarehouseView::New => "new orders",
        WarehouseView::Processed => "processed orders",
        WarehouseView::Returned => "returned orders",
    };
    render::bucket(title, &orders);
    Ok(())
}
