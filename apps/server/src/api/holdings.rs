use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::delete,
    Json, Router,
};

use crate::{error::ApiResult, main_lib::AppState};

async fn delete_holding(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<serde_json::Value>> {
    let deleted = state
        .holdings_service
        .delete_holding(&state.default_user_id, &id)
        .await?;
    Ok(Json(serde_json::json!({ "deleted": deleted })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/holdings/{id}", delete(delete_holding))
}
