use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use boostmax_core::OrderView;
use boostmax_order::OrderId;
use chrono::Utc;

use crate::{error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/orders", get(list_orders).post(submit_order))
        .route("/v1/orders/{id}", get(get_order))
}

/// POST /v1/orders
/// Submit the current selection as a new order
async fn submit_order(State(state): State<AppState>) -> Result<(StatusCode, Json<OrderView>), AppError> {
    let mut store = state.storefront.lock().await;
    let order = store.submit_order(Utc::now())?;
    Ok((StatusCode::CREATED, Json(OrderView::from(&order))))
}

/// GET /v1/orders
/// Order history, newest first
async fn list_orders(State(state): State<AppState>) -> Json<Vec<OrderView>> {
    let store = state.storefront.lock().await;
    Json(store.orders().iter().map(OrderView::from).collect())
}

/// GET /v1/orders/{id}
async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<OrderId>,
) -> Result<Json<OrderView>, AppError> {
    let store = state.storefront.lock().await;
    let order = store.order(&order_id)?;
    Ok(Json(OrderView::from(order)))
}
