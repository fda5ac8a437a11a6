use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use argon2::{
    password_hash::{PasswordHash, PasswordVerifier},
    Argon2,
};
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AuthSettings;
use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

/// Single-password authentication: verifies the configured argon2 hash and
/// hands out short-lived HS256 bearer tokens.
pub struct AuthManager {
    password_hash: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
    iat: usize,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatusResponse {
    pub requires_password: bool,
}

impl AuthManager {
    pub fn new(settings: &AuthSettings) -> anyhow::Result<Self> {
        // Fail fast on a malformed hash instead of rejecting every login.
        PasswordHash::new(&settings.password_hash)
            .map_err(|e| anyhow::anyhow!("Invalid NW_AUTH_PASSWORD_HASH: {}", e))?;
        let encoding_key = EncodingKey::from_secret(&settings.jwt_secret);
        let decoding_key = DecodingKey::from_secret(&settings.jwt_secret);
        let validation = Validation::new(Algorithm::HS256);
        Ok(Self {
            password_hash: settings.password_hash.clone(),
            encoding_key,
            decoding_key,
            validation,
            token_ttl: settings.access_token_ttl,
        })
    }

    fn verify_password(&self, password: &str) -> bool {
        match PasswordHash::new(&self.password_hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    fn issue_token(&self) -> ApiResult<(String, u64)> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| ApiError::Internal(e.to_string()))?
            .as_secs();
        let expires_in = self.token_ttl.as_secs();
        let claims = Claims {
            sub: "networth".to_string(),
            iat: now as usize,
            exp: (now + expires_in) as usize,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        Ok((token, expires_in))
    }

    fn validate_token(&self, token: &str) -> bool {
        decode::<Claims>(token, &self.decoding_key, &self.validation).is_ok()
    }
}

/// Middleware guarding the protected API surface when auth is configured.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(auth) = state.auth.as_ref() else {
        return next.run(request).await;
    };

    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match token {
        Some(token) if auth.validate_token(token) => next.run(request).await,
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "code": 401,
                "message": "Missing or invalid access token"
            })),
        )
            .into_response(),
    }
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let Some(auth) = state.auth.as_ref() else {
        return Err(ApiError::BadRequest(
            "Password authentication is not configured".to_string(),
        ));
    };
    if !auth.verify_password(&body.password) {
        return Err(ApiError::Unauthorized("Invalid password".to_string()));
    }
    let (access_token, expires_in) = auth.issue_token()?;
    Ok(Json(LoginResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in,
    }))
}

async fn status(State(state): State<Arc<AppState>>) -> Json<AuthStatusResponse> {
    Json(AuthStatusResponse {
        requires_password: state.auth.is_some(),
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/status", get(status))
}
