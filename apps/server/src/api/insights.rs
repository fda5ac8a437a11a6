use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use networth_core::insights::InsightsReport;

use crate::{error::ApiResult, main_lib::AppState};

async fn get_insights(State(state): State<Arc<AppState>>) -> ApiResult<Json<InsightsReport>> {
    let report = state.insights_service.insights(&state.default_user_id)?;
    Ok(Json(report))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/insights", get(get_insights))
}
