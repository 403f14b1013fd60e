use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use takabox_order::{Order, OrderRepository, OrderStatus};

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/orders", get(list_orders))
        .route("/v1/orders/{id}", get(get_order))
        .route("/v1/orders/{id}/status", put(update_status))
        .route("/v1/orders/track/{id}", get(track_order))
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct StatusUpdateRequest {
    status: OrderStatus,
}

/// Public tracking view. Deliberately excludes customer details; anyone
/// holding an order id can poll this.
#[derive(Debug, Serialize)]
struct TrackResponse {
    id: String,
    status: OrderStatus,
    tracking_code: Option<String>,
    consignment_id: Option<String>,
    created_at: DateTime<Utc>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /v1/orders
/// Full order list, newest first (admin).
async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = state.orders.list_orders().await?;
    Ok(Json(orders))
}

/// GET /v1/orders/:id
async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    let order = state
        .orders
        .get_order(&id)
        .await?
        .ok_or_else(|| ApiError::NotFoundError(format!("no order with id {id}")))?;
    Ok(Json(order))
}

/// PUT /v1/orders/:id/status
/// Moves an order along the fulfilment ladder. Illegal jumps (for example
/// DELIVERED back to PENDING) are refused with a conflict.
async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Json<Order>, ApiError> {
    let mut order = state
        .orders
        .get_order(&id)
        .await?
        .ok_or_else(|| ApiError::NotFoundError(format!("no order with id {id}")))?;

    if !order.status.can_transition_to(&req.status) {
        return Err(ApiError::ConflictError(format!(
            "cannot move order from {} to {}",
            order.status.as_str(),
            req.status.as_str()
        )));
    }

    order.update_status(req.status);
    state.orders.update_status(&order.id, &order.status).await?;
    tracing::info!(order_id = %order.id, status = %order.status.as_str(), "order status updated");
    Ok(Json(order))
}

/// GET /v1/orders/track/:id
/// Customer-facing tracking by order id.
async fn track_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TrackResponse>, ApiError> {
    let order = state
        .orders
        .get_order(&id)
        .await?
        .ok_or_else(|| ApiError::NotFoundError(format!("no order with id {id}")))?;

    Ok(Json(TrackResponse {
        id: order.id,
        status: order.status,
        tracking_code: order.tracking_code,
        consignment_id: order.consignment_id,
        created_at: order.created_at,
    }))
}
