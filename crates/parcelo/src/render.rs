// SPDX-FileCopyrightText: 2026 Parcelo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal rendering helpers shared by the list commands.

use colored::Colorize;
use parcelo_core::{OrderStatus, ParceloError, TrackingRecord};

/// Print a bucket header like `TODAY (3)`.
pub fn section(title: &str, count: usize) {
    println!("{} ({count})", title.to_uppercase().bold());
}

/// One line per record: code, status, time, receiver, address.
pub fn record_line(record: &TrackingRecord) -> String {
    let code = record
        .order_code
        .clone()
        .or_else(|| record.order_id.map(|id| id.to_string()))
        .unwrap_or_else(|| "?".into());
    let status = record
        .order_status
        .as_ref()
        .map(OrderStatus::to_string)
        .unwrap_or_default();
    let when = record
        .assigned_at_utc()
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "--".into());

    let mut line = format!("  #{code}  {}  {when}", colorize_status(&status));
    if let Some(receiver) = &record.receiver_name {
        line.push_str(&format!("  {receiver}"));
    }
    if let Some(address) = &record.receiver_address {
        line.push_str(&format!(" — {address}"));
    }
    if let Some(notes) = &record.tracking_notes {
        line.push_str(&format!("  ({notes})"));
    }
    line
}

/// Print a whole bucket: header, lines, and a placeholder when empty.
pub fn bucket(title: &str, records: &[TrackingRecord]) {
    section(title, records.len());
    if records.is_empty() {
        println!("  (none)");
    } else {
        for record in records {
            println!("{}", record_line(record));
        }
    }
    println!();
}

/// Serialize any value as pretty JSON to stdout, for `--json` mode.
pub fn json<T: serde::Serialize>(value: &T) -> Result<(), ParceloError> {
    let out = serde_json::to_string_pretty(value)
        .map_err(|e| ParceloError::Internal(format!("failed to serialize output: {e}")))?;
    println!("{out}");
    Ok(())
}

fn colorize_status(status: &str) -> colored::ColoredString {
    match status {
        "Hoàn thành" => status.green(),
        "Thất bại" | "Trả về kho" => status.red(),
        "Đang giao" | "Đang lấy" => status.yellow(),
        _ => status.normal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parcelo_core::OrderId;

    #[test]
    fn record_line_prefers_code_and_includes_notes() {
        let record = TrackingRecord {
            order_id: Some(OrderId(9)),
            order_code: Some("DH009".into()),
            assigned_at: Some("2024-01-10T08:00:00Z".into()),
            order_status: Some(OrderStatus::Failed),
            tracking_status: None,
            tracking_notes: Some("Khách từ chối nhận".into()),
            receiver_name: Some("Lê C".into()),
            receiver_address: None,
            receiver_phone: None,
            sender_name: None,
            sender_address: None,
            weight: None,
            ship_cost: None,
            service_name: None,
            warehouse_name: None,
        };
        let line = record_line(&record);
        assert!(line.contains("#DH009"));
        assert!(line.contains("2024-01-10 08:00"));
        assert!(line.contains("Khách từ chối nhận"));
    }

    #[test]
    fn record_line_falls_back_to_order_id() {
        let record = TrackingRecord {
            order_id: Some(OrderId(9)),
            order_code: None,
            assigned_at: None,
            order_status: None,
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
        };
        let line = record_line(&record);
        assert!(line.contains("#9"));
        assert!(line.contains("--"));
    }
}
