use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::Local;

use networth_core::transactions::{NewTransaction, Transaction};

use crate::{error::ApiResult, main_lib::AppState};

async fn list_transactions(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let transactions = state
        .transaction_service
        .list_transactions(&state.default_user_id)?;
    Ok(Json(transactions))
}

async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewTransaction>,
) -> ApiResult<Json<Transaction>> {
    let transaction = state
        .transaction_service
        .create_transaction(&state.default_user_id, payload, Local::now().date_naive())
        .await?;
    Ok(Json(transaction))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/transactions",
        get(list_transactions).post(create_transaction),
    )
}
