//! Route definitions for the delivery tracker server

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/delivery-tracker", tracker_routes())
}

/// Delivery tracker routes
fn tracker_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::compute_delivery_tracker))
        .route("/:order_id", delete(handlers::invalidate_delivery_tracker))
}
