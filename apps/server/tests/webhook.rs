use std::sync::{Mutex, MutexGuard};

use argon2::{password_hash::SaltString, Argon2, PasswordHasher};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::{rngs::OsRng, RngCore};
use tempfile::TempDir;
use tower::ServiceExt;

use networth_server::{api::app_router, build_state, config::Config};

// Config is read from the environment, so tests touching env vars must not
// interleave.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn lock_env() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

const WEBHOOK_SECRET: &str = "test-secret";

async fn build_test_router(password: Option<&str>) -> (axum::Router, TempDir) {
    let tmp = TempDir::new().unwrap();
    std::env::set_var("NW_DB_PATH", tmp.path().join("test.db"));
    std::env::set_var("NW_WEBHOOK_SECRET", WEBHOOK_SECRET);

    match password {
        Some(password) => {
            let salt = SaltString::generate(&mut OsRng);
            let password_hash = Argon2::default()
                .hash_password(password.as_bytes(), &salt)
                .unwrap()
                .to_string();
            std::env::set_var("NW_AUTH_PASSWORD_HASH", password_hash);

            let mut secret_bytes = [0u8; 32];
            OsRng.fill_bytes(&mut secret_bytes);
            std::env::set_var("NW_SECRET_KEY", BASE64.encode(secret_bytes));
        }
        None => {
            std::env::remove_var("NW_AUTH_PASSWORD_HASH");
            std::env::remove_var("NW_SECRET_KEY");
        }
    }

    let config = Config::from_env();
    let state = build_state(&config).await.unwrap();
    (app_router(state, &config), tmp)
}

fn cleanup_env() {
    for key in [
        "NW_DB_PATH",
        "NW_WEBHOOK_SECRET",
        "NW_AUTH_PASSWORD_HASH",
        "NW_SECRET_KEY",
    ] {
        std::env::remove_var(key);
    }
}

async fn request(
    app: &axum::Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    bearer: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn webhook_records_card_payments() {
    let _guard = lock_env();
    let (app, _tmp) = build_test_router(None).await;

    // French field aliases, ISO date.
    let (status, body) = request(
        &app,
        Method::POST,
        "/api/webhook/transaction",
        Some(serde_json::json!({
            "secret": WEBHOOK_SECRET,
            "montant": 42.0,
            "commercant": "Uber Eats",
            "card": "Gold",
            "date": "2026-01-04"
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");

    let (status, body) = request(&app, Method::GET, "/api/v1/transactions", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let transactions = body.as_array().unwrap();
    assert_eq!(transactions.len(), 1);
    let tx = &transactions[0];
    assert_eq!(tx["description"], "Uber Eats (Gold)");
    assert_eq!(tx["category"], "Card Payment");
    assert_eq!(tx["kind"], "EXPENSE");
    assert_eq!(tx["source"], "WEBHOOK");
    assert_eq!(tx["date"], "2026-01-04");
    assert_eq!(tx["amount"].as_f64().unwrap(), 42.0);

    cleanup_env();
}

#[tokio::test]
async fn webhook_rejects_bad_secret_and_bad_payloads() {
    let _guard = lock_env();
    let (app, _tmp) = build_test_router(None).await;

    let (status, body) = request(
        &app,
        Method::POST,
        "/api/webhook/transaction",
        Some(serde_json::json!({ "secret": "wrong", "amount": 10.0 })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Unauthorized");

    // No secret at all.
    let (status, _) = request(
        &app,
        Method::POST,
        "/api/webhook/transaction",
        Some(serde_json::json!({ "amount": 10.0 })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Valid secret but no amount in either language.
    let (status, body) = request(
        &app,
        Method::POST,
        "/api/webhook/transaction",
        Some(serde_json::json!({ "secret": WEBHOOK_SECRET, "merchant": "Shop" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    cleanup_env();
}

#[tokio::test]
async fn login_and_access_protected_route() {
    let _guard = lock_env();
    let password = "super-secret";
    let (app, _tmp) = build_test_router(Some(password)).await;

    // Unauthorized request should fail.
    let (status, _) = request(&app, Method::GET, "/api/v1/portfolios", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Auth status reflects the requirement.
    let (status, body) = request(&app, Method::GET, "/api/v1/auth/status", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["requiresPassword"], true);

    // Wrong password is rejected.
    let (status, _) = request(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        Some(serde_json::json!({ "password": "nope" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Correct password yields a bearer token.
    let (status, body) = request(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        Some(serde_json::json!({ "password": password })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["accessToken"].as_str().unwrap().to_string();

    let (status, body) = request(
        &app,
        Method::GET,
        "/api/v1/portfolios",
        None,
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    // The webhook stays on its own shared secret, not bearer auth.
    let (status, _) = request(
        &app,
        Method::POST,
        "/api/webhook/transaction",
        Some(serde_json::json!({ "secret": "wrong", "amount": 1.0 })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    cleanup_env();
}

#[tokio::test]
async fn portfolio_crud_and_dashboard_flow() {
    let _guard = lock_env();
    let (app, _tmp) = build_test_router(None).await;

    let (status, portfolio) = request(
        &app,
        Method::POST,
        "/api/v1/portfolios",
        Some(serde_json::json!({ "name": "Long Term" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(portfolio["currency"], "EUR");
    let portfolio_id = portfolio["id"].as_str().unwrap().to_string();

    // Empty dashboard still renders.
    let (status, dashboard) = request(&app, Method::GET, "/api/v1/dashboard", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard["totalNetWorth"].as_f64().unwrap(), 0.0);
    assert_eq!(dashboard["dailyVariation"].as_f64().unwrap(), 0.0);

    // Unknown portfolio detail is a 404.
    let (status, _) = request(
        &app,
        Method::GET,
        "/api/v1/portfolios/does-not-exist",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, deleted) = request(
        &app,
        Method::DELETE,
        &format!("/api/v1/portfolios/{}", portfolio_id),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["deleted"], 1);

    cleanup_env();
}
