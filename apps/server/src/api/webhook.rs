//! Unauthenticated transaction webhook.
//!
//! Accepts simplified card-payment payloads (Apple Shortcuts style), with
//! French field aliases: `{secret, amount|montant, merchant|commercant,
//! card, date}`. Responses mirror the historical contract: 200
//! `{"status": "success"}`, 403 `{"error": "Unauthorized"}`, 400
//! `{"error": ...}`.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use rust_decimal::Decimal;
use serde_json::Value;

use networth_core::transactions::WebhookPayment;

use crate::main_lib::AppState;

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

/// Reads a field that may arrive as a JSON number or a numeric string.
fn parse_amount(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => n.as_f64().and_then(Decimal::from_f64_retain),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

fn string_field<'a>(payload: &'a Value, primary: &str, alias: &str) -> Option<&'a str> {
    payload
        .get(primary)
        .or_else(|| payload.get(alias))
        .and_then(Value::as_str)
}

pub async fn webhook_transaction(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };

    let provided_secret = payload.get("secret").and_then(Value::as_str);
    match (&state.webhook_secret, provided_secret) {
        (Some(expected), Some(provided)) if expected == provided => {}
        _ => return error_response(StatusCode::FORBIDDEN, "Unauthorized"),
    }

    let amount = payload
        .get("amount")
        .or_else(|| payload.get("montant"))
        .and_then(parse_amount);
    let Some(amount) = amount else {
        return error_response(StatusCode::BAD_REQUEST, "missing or invalid amount");
    };

    let payment = WebhookPayment {
        amount,
        merchant: string_field(&payload, "merchant", "commercant").map(str::to_string),
        card: payload
            .get("card")
            .and_then(Value::as_str)
            .map(str::to_string),
        date: payload
            .get("date")
            .and_then(Value::as_str)
            .map(str::to_string),
    };

    // Attributed to the first user, like every webhook payment.
    let user_id = match state.user_repository.first_user() {
        Ok(Some(user)) => user.id,
        Ok(None) => state.default_user_id.clone(),
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };

    match state
        .transaction_service
        .record_webhook_payment(&user_id, payment, Local::now().date_naive())
        .await
    {
        Ok(_) => Json(serde_json::json!({ "status": "success" })).into_response(),
        Err(e) => error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    }
}
