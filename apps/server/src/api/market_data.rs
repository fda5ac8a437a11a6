use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};

use networth_core::quotes::PriceRefreshSummary;

use crate::{error::ApiResult, main_lib::AppState};

async fn refresh_prices(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PriceRefreshSummary>> {
    let summary = state.price_service.refresh_all_prices().await?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/market-data/refresh", post(refresh_prices))
}
