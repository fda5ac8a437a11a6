use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use networth_core::holdings::{Holding, NewHolding};
use networth_core::portfolios::{NewPortfolio, Portfolio, PortfolioDetail, PortfolioSummary};
use networth_core::snapshots::PortfolioSnapshot;

use crate::{error::ApiResult, main_lib::AppState};

async fn list_portfolios(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<PortfolioSummary>>> {
    let portfolios = state
        .portfolio_service
        .list_portfolios(&state.default_user_id)?;
    Ok(Json(portfolios))
}

async fn create_portfolio(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewPortfolio>,
) -> ApiResult<Json<Portfolio>> {
    let portfolio = state
        .portfolio_service
        .create_portfolio(&state.default_user_id, payload)
        .await?;
    Ok(Json(portfolio))
}

async fn get_portfolio(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PortfolioDetail>> {
    let detail = state
        .portfolio_service
        .get_portfolio_detail(&state.default_user_id, &id)?;
    Ok(Json(detail))
}

async fn delete_portfolio(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<serde_json::Value>> {
    let deleted = state
        .portfolio_service
        .delete_portfolio(&state.default_user_id, &id)
        .await?;
    Ok(Json(serde_json::json!({ "deleted": deleted })))
}

async fn get_portfolio_history(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<PortfolioSnapshot>>> {
    let history = state
        .snapshot_service
        .portfolio_history(&state.default_user_id, &id)?;
    Ok(Json(history))
}

async fn create_holding(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewHolding>,
) -> ApiResult<Json<Holding>> {
    let holding = state
        .portfolio_service
        .add_holding(&state.default_user_id, &id, payload)
        .await?;
    Ok(Json(holding))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/portfolios", get(list_portfolios).post(create_portfolio))
        .route(
            "/portfolios/{id}",
            get(get_portfolio).delete(delete_portfolio),
        )
        .route("/portfolios/{id}/history", get(get_portfolio_history))
        .route("/portfolios/{id}/holdings", post(create_holding))
}
