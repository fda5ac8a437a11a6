use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use networth_core::assets::{Asset, AssetCategory, AssetSearchHit};

use crate::{error::ApiResult, main_lib::AppState};

async fn list_assets(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Asset>>> {
    let assets = state.asset_service.list_assets()?;
    Ok(Json(assets))
}

#[derive(serde::Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

async fn search_assets(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<AssetSearchHit>>> {
    let hits = state.asset_service.search_online(&query.q).await?;
    Ok(Json(hits))
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddAssetRequest {
    ticker: String,
    category: Option<AssetCategory>,
}

async fn add_asset(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AddAssetRequest>,
) -> ApiResult<Json<Asset>> {
    let asset = state
        .asset_service
        .add_from_ticker(&payload.ticker, payload.category)
        .await?;
    Ok(Json(asset))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/assets", get(list_assets).post(add_asset))
        .route("/assets/search", get(search_assets))
}
