// SPDX-FileCopyrightText: 2026 Parcelo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The order-status transition table.
//!
//! The backend does not enforce its own lifecycle; any client can in
//! principle fire any mutation. This module makes the lifecycle explicit so
//! the API client can refuse a mutation whose target is not a valid
//! successor of the order's last known status, with a typed error instead
//! of a silently issued request.
//!
//! ```text
//! Mới tạo -> Đã tiếp nhận -> Chờ chuyển kho -> Cần lấy -> Đang lấy
//!   -> Đã lấy -> Đang giao -> { Hoàn thành | Thất bại }
//! Thất bại -> { Đang giao (re-delivery) | Trả về kho }
//! ```

use crate::error::ParceloError;
use crate::types::OrderStatus;

const CREATED_NEXT: &[OrderStatus] = &[OrderStatus::Received];
const RECEIVED_NEXT: &[OrderStatus] = &[OrderStatus::PendingTransfer];
const PENDING_TRANSFER_NEXT: &[OrderStatus] = &[OrderStatus::AwaitingPickup];
const AWAITING_PICKUP_NEXT: &[OrderStatus] = &[OrderStatus::PickingUp];
const PICKING_UP_NEXT: &[OrderStatus] = &[OrderStatus::PickedUp];
const PICKED_UP_NEXT: &[OrderStatus] = &[OrderStatus::OutForDelivery];
const OUT_FOR_DELIVERY_NEXT: &[OrderStatus] = &[OrderStatus::Completed, OrderStatus::Failed];
const FAILED_NEXT: &[OrderStatus] = &[OrderStatus::OutForDelivery, OrderStatus::Returned];
const TERMINAL: &[OrderStatus] = &[];

/// Valid successor statuses of `from`.
///
/// Terminal statuses (`Completed`, `Returned`) and unrecognized labels have
/// no successors.
pub fn successors(from: &OrderStatus) -> &'static [OrderStatus] {
    match from {
        OrderStatus::Created => CREATED_NEXT,
        OrderStatus::Received => RECEIVED_NEXT,
        OrderStatus::PendingTransfer => PENDING_TRANSFER_NEXT,
        OrderStatus::AwaitingPickup => AWAITING_PICKUP_NEXT,
        OrderStatus::PickingUp => PICKING_UP_NEXT,
        OrderStatus::PickedUp => PICKED_UP_NEXT,
        OrderStatus::OutForDelivery => OUT_FOR_DELIVERY_NEXT,
        OrderStatus::Failed => FAILED_NEXT,
        OrderStatus::Completed | OrderStatus::Returned | OrderStatus::Other(_) => TERMINAL,
    }
}

/// Whether `from -> to` is an edge of the transition table.
pub fn is_valid_transition(from: &OrderStatus, to: &OrderStatus) -> bool {
    successors(from).contains(to)
}

/// Check a requested transition, returning a typed error on an invalid one.
pub fn validate_transition(from: &OrderStatus, to: &OrderStatus) -> Result<(), ParceloError> {
    if is_valid_transition(from, to) {
        Ok(())
    } else {
        Err(ParceloError::InvalidTransition {
            from: from.clone(),
            to: to.clone(),
        })
    }
}
