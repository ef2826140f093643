// SPDX-FileCopyrightText: 2026 Parcelo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `parcelo assign` / `status` / `track` -- the mutation commands.

use parcelo_api::{CourierClient, StatusUpdate, TrackingUpdateRequest};
use parcelo_core::{OrderId, OrderStatus, ParceloError, StaffId, TrackingStatus};
use parcelo_tracking::reduce_to_latest_per_order;

/// Assign an order to a driver, as a delivery or (with `pickup`) a pickup.
pub async fn assign(
    client: &CourierClient,
    order: OrderId,
    driver: StaffId,
    pickup: bool,
) -> Result<(), ParceloError> {
    if pickup {
        client.assign_pickup(order, driver).await?;
        println!("order {order} assigned to driver {driver} for pickup");
    } else {
        client.assign_to_driver(order, driver).await?;
        println!("order {order} assigned to driver {driver}");
    }
    Ok(())
}

/// Update an order's status.
///
/// The order's last known status is taken from the staff member's
/// reconciled feed, so an update that skips a lifecycle stage is refused
/// here, before any request reaches the backend.
pub async fn update_status(
    client: &CourierClient,
    order: OrderId,
    staff: StaffId,
    to: &str,
    notes: Option<String>,
    proof: Option<String>,
) -> Result<(), ParceloError> {
    let feed = client.assigned_orders(staff).await?;
    let outcome = reduce_to_latest_per_order(feed);
    let current = outcome
        .canonical
        .iter()
        .find(|record| record.order_id == Some(order))
        .and_then(|record| record.order_status.as_ref());

    let target = OrderStatus::from_label(to);
    let mut update = StatusUpdate::new(target.clone());
    if let Some(notes) = notes {
        update = update.with_notes(notes);
    }
    if let Some(proof) = proof {
        update = update.with_proof_image(proof);
    }

    client.update_order_status(order, current, update).await?;
    println!("order {order} -> {target}");
    Ok(())
}

/// Record a tracking event for an order.
pub async fn track(
    client: &CourierClient,
    order: OrderId,
    staff: StaffId,
    status: &str,
    notes: Option<String>,
) -> Result<(), ParceloError> {
    let status = TrackingStatus::from_label(status);
    client
        .update_tracking(&TrackingUpdateRequest {
            order_id: order,
            staff_id: staff,
            status: status.clone(),
            notes,
        })
        .await?;
    println!("order {order} tracking -> {status}");
    Ok(())
}
