use axum::{extract::State, routing::get, Json, Router};
use boostmax_catalog::{QuantityBounds, ServiceTier};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub tiers: Vec<ServiceTier>,
    pub bounds: QuantityBounds,
    pub currency: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/catalog", get(list_tiers))
}

/// GET /v1/catalog
async fn list_tiers(State(state): State<AppState>) -> Json<CatalogResponse> {
    let store = state.storefront.lock().await;
    let view = store.view();

    Json(CatalogResponse {
        tiers: store.catalog().list().to_vec(),
        bounds: view.bounds,
        currency: view.currency,
    })
}
