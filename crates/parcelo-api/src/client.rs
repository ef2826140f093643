// SPDX-FileCopyrightText: 2026 Parcelo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the courier backend.
//!
//! Provides [`CourierClient`], which handles request construction, JSON
//! decoding, transient-error retry, and client-side validation of status
//! mutations against the order lifecycle.

use std::time::Duration;

use chrono::{DateTime, Utc};
use parcelo_config::ApiConfig;
use parcelo_core::{
    validate_transition, OrderId, OrderStatus, ParceloError, StaffId, TrackingRecord,
    TrackingStatus,
};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::types::{
    api_message, AssignDriverRequest, AssignedCount, Driver, DriverLoad, PackageRegistration,
    PickupAssignmentRequest, ShippingQuote, ShippingQuoteRequest, StatusUpdate,
    StatusUpdateRequest, TrackingEventRequest, TrackingUpdateRequest,
};

/// Delay before retrying a transient failure.
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// HTTP client for the courier backend.
///
/// The base URL comes from [`ApiConfig`]; nothing here hardcodes an
/// endpoint, so tests point the client at a local mock server through the
/// same constructor production uses. Transient errors (429, 500, 503) are
/// retried up to `max_retries` times with a fixed delay.
#[derive(Debug, Clone)]
pub struct CourierClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl CourierClient {
    /// Creates a client from the injected endpoint configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, ParceloError> {
        let mut headers = HeaderMap::new();
        headers.insert("accept", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ParceloError::Api {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    // --- Fetches -----------------------------------------------------------

    /// `GET /drivers/{id}/assigned-orders` -- the raw tracking feed for one
    /// driver. Callers reconcile it with `parcelo-tracking`.
    pub async fn assigned_orders(&self, staff: StaffId) -> Result<Vec<TrackingRecord>, ParceloError> {
        self.get_json(&format!("/drivers/{staff}/assigned-orders"))
            .await
    }

    /// `GET /orders` -- orders awaiting pickup.
    pub async fn orders(&self) -> Result<Vec<TrackingRecord>, ParceloError> {
        self.get_json("/orders").await
    }

    /// `GET /orders/processed` -- orders processed at the warehouse and
    /// ready for driver assignment.
    pub async fn processed_orders(&self) -> Result<Vec<TrackingRecord>, ParceloError> {
        self.get_json("/orders/processed").await
    }

    /// `GET /orders/returned` -- orders back at the warehouse after failed
    /// delivery.
    pub async fn returned_orders(&self) -> Result<Vec<TrackingRecord>, ParceloError> {
        self.get_json("/orders/returned").await
    }

    /// `GET /warehouse-new-orders` -- freshly registered orders.
    pub async fn warehouse_new_orders(&self) -> Result<Vec<TrackingRecord>, ParceloError> {
        self.get_json("/warehouse-new-orders").await
    }

    /// `GET /drivers` -- the driver roster.
    pub async fn drivers(&self) -> Result<Vec<Driver>, ParceloError> {
        self.get_json("/drivers").await
    }

    /// `GET /drivers/{id}/assigned-count`. A missing count means zero.
    pub async fn assigned_count(&self, staff: StaffId) -> Result<u64, ParceloError> {
        let response: AssignedCount = self
            .get_json(&format!("/drivers/{staff}/assigned-count"))
            .await?;
        Ok(response.count.unwrap_or(0))
    }

    /// `GET /driver-active-pickup?driverId={id}` -- the pickup the driver is
    /// currently working, if any.
    pub async fn active_pickup(&self, staff: StaffId) -> Result<Option<TrackingRecord>, ParceloError> {
        let request = self
            .client
            .get(self.url("/driver-active-pickup"))
            .query(&[("driverId", staff.0)]);
        let response = self.execute(request).await?;
        decode_json(response).await
    }

    /// Fetch each driver's assigned-order count concurrently and join
    /// before returning. A failed count degrades to zero with a warning
    /// rather than failing the whole roster.
    pub async fn assigned_counts(&self, drivers: &[Driver]) -> Vec<DriverLoad> {
        let lookups = drivers.iter().map(|driver| async move {
            let assigned_count = match self.assigned_count(driver.staff_id).await {
                Ok(count) => count,
                Err(err) => {
                    warn!(staff = %driver.staff_id, error = %err, "assigned-count fetch failed");
                    0
                }
            };
            DriverLoad {
                driver: driver.clone(),
                assigned_count,
            }
        });
        futures::future::join_all(lookups).await
    }

    // --- Mutations ---------------------------------------------------------

    /// `PUT /orders/{id}/status`, validated client-side first.
    ///
    /// `current` is the order's last known status, normally taken from the
    /// canonical record after reconciliation. A request whose target is not
    /// a valid successor of `current` is refused with
    /// [`ParceloError::InvalidTransition`] before any HTTP traffic; a
    /// missing `current` is refused as a missing precondition.
    pub async fn update_order_status(
        &self,
        order: OrderId,
        current: Option<&OrderStatus>,
        update: StatusUpdate,
    ) -> Result<(), ParceloError> {
        let Some(current) = current else {
            return Err(ParceloError::MissingPrecondition(format!(
                "no last known status for order {order}"
            )));
        };
        validate_transition(current, &update.new_status)?;

        let body = StatusUpdateRequest {
            new_status: update.new_status,
            notes: update.notes,
            proof_image: update.proof_image,
        };
        let request = self
            .client
            .put(self.url(&format!("/orders/{order}/status")))
            .json(&body);
        self.execute(request).await?;
        Ok(())
    }

    /// `POST /tracking` -- record a tracking event with a location fix.
    pub async fn post_tracking_event(
        &self,
        event: &TrackingEventRequest,
    ) -> Result<(), ParceloError> {
        let request = self.client.post(self.url("/tracking")).json(event);
        self.execute(request).await?;
        Ok(())
    }

    /// `POST /update-tracking` -- the backend's second tracking route, used
    /// by the pickup flow.
    pub async fn update_tracking(
        &self,
        update: &TrackingUpdateRequest,
    ) -> Result<(), ParceloError> {
        let request = self.client.post(self.url("/update-tracking")).json(update);
        self.execute(request).await?;
        Ok(())
    }

    /// `POST /orders/{id}/assign` -- assign an order to a driver.
    pub async fn assign_to_driver(&self, order: OrderId, staff: StaffId) -> Result<(), ParceloError> {
        let request = self
            .client
            .post(self.url(&format!("/orders/{order}/assign")))
            .json(&AssignDriverRequest { staff_id: staff });
        self.execute(request).await?;
        Ok(())
    }

    /// `POST /delivery-assignments` -- assign a pickup to a driver.
    pub async fn assign_pickup(&self, order: OrderId, staff: StaffId) -> Result<(), ParceloError> {
        let request = self
            .client
            .post(self.url("/delivery-assignments"))
            .json(&PickupAssignmentRequest {
                order_id: order,
                staff_id: staff,
            });
        self.execute(request).await?;
        Ok(())
    }

    /// The pickup handoff: record a "Đã giao cho kho" tracking event, then
    /// move the order out for delivery. The tracking event is posted first
    /// so the feed explains the status change.
    pub async fn deliver_to_warehouse(
        &self,
        order: OrderId,
        staff: StaffId,
        current: &OrderStatus,
        location: &str,
        now: DateTime<Utc>,
    ) -> Result<(), ParceloError> {
        self.post_tracking_event(&TrackingEventRequest {
            order_id: order,
            staff_id: staff,
            status: TrackingStatus::DeliveredToWarehouse,
            location: Some(location.to_string()),
            timestamp: now.to_rfc3339(),
        })
        .await?;
        self.update_order_status(
            order,
            Some(current),
            StatusUpdate::new(OrderStatus::OutForDelivery),
        )
        .await
    }

    /// `POST /orders/{id}/package` -- register the physical parcel at
    /// warehouse intake.
    pub async fn register_package(
        &self,
        registration: &PackageRegistration,
    ) -> Result<(), ParceloError> {
        let request = self
            .client
            .post(self.url(&format!("/orders/{}/package", registration.order_id)))
            .json(registration);
        self.execute(request).await?;
        Ok(())
    }

    /// `POST /shipping/calculate` -- quote the shipping fee for a parcel.
    pub async fn calculate_shipping(
        &self,
        quote: &ShippingQuoteRequest,
    ) -> Result<ShippingQuote, ParceloError> {
        let request = self.client.post(self.url("/shipping/calculate")).json(quote);
        let response = self.execute(request).await?;
        decode_json(response).await
    }

    // --- Plumbing ----------------------------------------------------------

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ParceloError> {
        let request = self.client.get(self.url(path));
        let response = self.execute(request).await?;
        decode_json(response).await
    }

    /// Send a request, retrying transient failures (429, 500, 503) up to
    /// `max_retries` times with a fixed delay.
    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ParceloError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying request after transient error");
                tokio::time::sleep(RETRY_DELAY).await;
            }

            let attempt_request = request.try_clone().ok_or_else(|| {
                ParceloError::Internal("request body is not cloneable for retry".into())
            })?;
            let response = attempt_request.send().await.map_err(|e| ParceloError::Api {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

            let status = response.status();
            debug!(status = %status, attempt, "response received");

            if status.is_success() {
                return Ok(response);
            }

            let body = response.text().await.unwrap_or_default();
            if is_transient_error(status) && attempt < self.max_retries {
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(api_error(status, &body));
                continue;
            }

            // Non-transient error or exhausted retries.
            return Err(api_error(status, &body));
        }

        Err(last_error.unwrap_or_else(|| ParceloError::Api {
            message: "request failed after retries".into(),
            source: None,
        }))
    }
}

async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ParceloError> {
    let body = response.text().await.map_err(|e| ParceloError::Api {
        message: format!("failed to read response body: {e}"),
        source: Some(Box::new(e)),
    })?;
    serde_json::from_str(&body).map_err(|e| ParceloError::Api {
        message: format!("failed to parse backend response: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Returns true for HTTP status codes that indicate transient errors worth
/// retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}

fn api_error(status: reqwest::StatusCode, body: &str) -> ParceloError {
    ParceloError::Api {
        message: format!("backend returned {status}: {}", api_message(body)),
        source: None,
    }
}
