use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use boostmax_core::StorefrontView;
use serde::Deserialize;

use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct SelectTierRequest {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct SetLinkRequest {
    pub link: String,
}

#[derive(Debug, Deserialize)]
pub struct SetQuantityRequest {
    pub quantity: u32,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/storefront", get(get_storefront))
        .route("/v1/selection", axum::routing::delete(clear_selection))
        .route("/v1/selection/tier", post(select_tier))
        .route("/v1/selection/link", post(set_link))
        .route("/v1/selection/quantity", post(set_quantity))
}

/// GET /v1/storefront
/// Current form, computed total and order history
async fn get_storefront(State(state): State<AppState>) -> Json<StorefrontView> {
    Json(state.storefront.lock().await.view())
}

/// POST /v1/selection/tier
async fn select_tier(
    State(state): State<AppState>,
    Json(req): Json<SelectTierRequest>,
) -> Result<Json<StorefrontView>, AppError> {
    let mut store = state.storefront.lock().await;
    store.select_tier(&req.id)?;
    Ok(Json(store.view()))
}

/// POST /v1/selection/link
async fn set_link(
    State(state): State<AppState>,
    Json(req): Json<SetLinkRequest>,
) -> Json<StorefrontView> {
    let mut store = state.storefront.lock().await;
    store.set_link(req.link);
    Json(store.view())
}

/// POST /v1/selection/quantity
async fn set_quantity(
    State(state): State<AppState>,
    Json(req): Json<SetQuantityRequest>,
) -> Json<StorefrontView> {
    let mut store = state.storefront.lock().await;
    store.set_quantity(req.quantity);
    Json(store.view())
}

/// DELETE /v1/selection
async fn clear_selection(State(state): State<AppState>) -> Json<StorefrontView> {
    let mut store = state.storefront.lock().await;
    store.clear_selection();
    Json(store.view())
}
