// SPDX-FileCopyrightText: 2026 Parcelo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parcelo - courier operations from the terminal.
//!
//! This is the binary entry point: it loads and validates configuration,
//! initializes logging, builds one backend client, and dispatches to the
//! per-command modules.

use clap::{Parser, Subcommand};
use parcelo_api::CourierClient;
use parcelo_core::{OrderId, ParceloError, StaffId};
use tracing_subscriber::EnvFilter;

mod assigned;
mod deliveries;
mod history;
mod mutate;
mod pickups;
mod render;
mod roster;
mod warehouse;

/// Parcelo - courier operations from the terminal.
#[derive(Parser, Debug)]
#[command(name = "parcelo", version, about, long_about = None)]
struct Cli {
    /// Emit structured JSON instead of human-readable output.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Driver delivery list: today's, earlier, and failed orders.
    Deliveries {
        /// Staff ID; defaults to `staff.id` from config.
        #[arg(long)]
        staff: Option<i64>,
    },
    /// Driver order history: this month and the previous one.
    History {
        #[arg(long)]
        staff: Option<i64>,
    },
    /// Warehouse view of a driver's pickup pipeline.
    Assigned {
        #[arg(long)]
        staff: Option<i64>,
    },
    /// Orders waiting for pickup, plus the driver's active pickup.
    Pickups {
        #[arg(long)]
        staff: Option<i64>,
    },
    /// Warehouse order lists (new / processed / returned).
    Warehouse {
        /// Which list to show.
        #[arg(value_enum)]
        view: warehouse::WarehouseView,
    },
    /// Driver roster with live assigned-order counts.
    Roster,
    /// Assign an order to a driver (delivery, or pickup with --pickup).
    Assign {
        /// Order ID.
        order: i64,
        /// Driver to assign the order to.
        #[arg(long)]
        driver: i64,
        /// Assign as a pickup instead of a delivery.
        #[arg(long)]
        pickup: bool,
    },
    /// Update an order's status, validated against the order lifecycle.
    Status {
        /// Order ID.
        order: i64,
        /// Target status, as the backend label (e.g. "Hoàn thành").
        #[arg(long)]
        to: String,
        /// Free-text notes, e.g. a failure reason.
        #[arg(long)]
        notes: Option<String>,
        /// Proof-of-delivery image reference.
        #[arg(long)]
        proof: Option<String>,
        /// Staff whose feed holds the order's last known status.
        #[arg(long)]
        staff: Option<i64>,
    },
    /// Record a tracking event for an order.
    Track {
        /// Order ID.
        order: i64,
        /// Tracking status label (e.g. "Đã lấy").
        #[arg(long)]
        status: String,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        staff: Option<i64>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match parcelo_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            parcelo_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log.level);
    tracing::debug!(base_url = %config.api.base_url, "configuration loaded");

    let client = match CourierClient::new(&config.api) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("parcelo: {err}");
            std::process::exit(1);
        }
    };

    let now = chrono::Utc::now();
    let result = match cli.command {
        Commands::Deliveries { staff } => {
            match resolve_staff(staff, &config) {
                Ok(staff) => deliveries::run(&client, staff, now, cli.json).await,
                Err(err) => Err(err),
            }
        }
        Commands::History { staff } => match resolve_staff(staff, &config) {
            Ok(staff) => history::run(&client, staff, now, cli.json).await,
            Err(err) => Err(err),
        },
        Commands::Assigned { staff } => match resolve_staff(staff, &config) {
            Ok(staff) => assigned::run(&client, staff, now, cli.json).await,
            Err(err) => Err(err),
        },
        Commands::Pickups { staff } => match resolve_staff(staff, &config) {
            Ok(staff) => pickups::run(&client, staff, cli.json).await,
            Err(err) => Err(err),
        },
        Commands::Warehouse { view } => warehouse::run(&client, view, cli.json).await,
        Commands::Roster => roster::run(&client, cli.json).await,
        Commands::Assign {
            order,
            driver,
            pickup,
        } => mutate::assign(&client, OrderId(order), StaffId(driver), pickup).await,
        Commands::Status {
            order,
            to,
            notes,
            proof,
            staff,
        } => match resolve_staff(staff, &config) {
            Ok(staff) => {
                mutate::update_status(&client, OrderId(order), staff, &to, notes, proof).await
            }
            Err(err) => Err(err),
        },
        Commands::Track {
            order,
            status,
            notes,
            staff,
        } => match resolve_staff(staff, &config) {
            Ok(staff) => mutate::track(&client, OrderId(order), staff, &status, notes).await,
            Err(err) => Err(err),
        },
    };

    if let Err(err) = result {
        eprintln!("parcelo: {err}");
        std::process::exit(1);
    }
}

/// Resolve the acting staff member: `--staff` wins, then `staff.id` from
/// config.
fn resolve_staff(
    flag: Option<i64>,
    config: &parcelo_config::ParceloConfig,
) -> Result<StaffId, ParceloError> {
    flag.or(config.staff.id).map(StaffId).ok_or_else(|| {
        ParceloError::Config("no staff ID: pass --staff or set staff.id in parcelo.toml".into())
    })
}

/// Initialize the tracing subscriber from `RUST_LOG`, falling back to the
/// configured level.
fn init_tracing(level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
