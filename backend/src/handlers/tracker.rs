//! HTTP handlers for delivery tracker computation

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared::{FulfillmentSnapshot, OrderId};

use crate::{error::AppResult, services::tracker::DeliveryTrackerResponse, AppState};

/// Compute the delivery tracker for the order in the posted snapshot
pub async fn compute_delivery_tracker(
    State(state): State<AppState>,
    Json(snapshot): Json<FulfillmentSnapshot>,
) -> AppResult<Json<DeliveryTrackerResponse>> {
    let response = state.trackers.compute(&snapshot).await?;
    Ok(Json(response))
}

/// Drop the memoized tracker of an order
pub async fn invalidate_delivery_tracker(
    State(state): State<AppState>,
    Path(order_id): Path<OrderId>,
) -> AppResult<StatusCode> {
    state.trackers.invalidate(order_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
