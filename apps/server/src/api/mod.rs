//! HTTP API: one router per resource, assembled under `/api/v1`.

pub mod assets;
pub mod dashboard;
pub mod health;
pub mod holdings;
pub mod insights;
pub mod market_data;
pub mod portfolios;
pub mod transactions;
pub mod webhook;

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::post;
use axum::{middleware, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::auth;
use crate::config::Config;
use crate::main_lib::AppState;

fn build_cors(allowed: &[String]) -> CorsLayer {
    if allowed.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed
            .iter()
            .filter_map(|o| o.parse::<HeaderValue>().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let mut protected = Router::new()
        .merge(dashboard::router())
        .merge(portfolios::router())
        .merge(holdings::router())
        .merge(assets::router())
        .merge(transactions::router())
        .merge(insights::router())
        .merge(market_data::router());
    if state.auth.is_some() {
        protected = protected.layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));
    }

    let api_v1 = Router::new()
        .merge(protected)
        .merge(auth::router())
        .merge(health::router());

    Router::new()
        .nest("/api/v1", api_v1)
        // The webhook authenticates with its own shared secret, never with a
        // bearer token.
        .route(
            "/api/webhook/transaction",
            post(webhook::webhook_transaction),
        )
        .layer(TraceLayer::new_for_http())
        .layer(build_cors(&config.cors_allow))
        .layer(TimeoutLayer::new(config.request_timeout))
        .with_state(state)
}
