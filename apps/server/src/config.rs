use std::{net::SocketAddr, time::Duration};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

/// Optional single-password auth settings.
#[derive(Clone)]
pub struct AuthSettings {
    /// Argon2 PHC string of the UI password.
    pub password_hash: String,
    /// HS256 signing key for access tokens.
    pub jwt_secret: Vec<u8>,
    pub access_token_ttl: Duration,
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Shared secret for the transaction webhook. When unset, the webhook
    /// rejects every request.
    pub webhook_secret: Option<String>,
    pub price_refresh_interval: Duration,
    pub auth: Option<AuthSettings>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("NW_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .expect("Invalid NW_LISTEN_ADDR");
        let db_path = std::env::var("NW_DB_PATH").unwrap_or_else(|_| "./db/networth.db".into());
        let cors_allow = std::env::var("NW_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("NW_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let webhook_secret = std::env::var("NW_WEBHOOK_SECRET")
            .ok()
            .filter(|s| !s.is_empty());
        let refresh_secs: u64 = std::env::var("NW_PRICE_REFRESH_SECS")
            .unwrap_or_else(|_| "900".into())
            .parse()
            .unwrap_or(900);
        let token_ttl_secs: u64 = std::env::var("NW_ACCESS_TOKEN_TTL_SECS")
            .unwrap_or_else(|_| "86400".into())
            .parse()
            .unwrap_or(86400);

        let auth = std::env::var("NW_AUTH_PASSWORD_HASH")
            .ok()
            .filter(|s| !s.is_empty())
            .map(|password_hash| {
                let secret_b64 =
                    std::env::var("NW_SECRET_KEY").expect("NW_SECRET_KEY required with NW_AUTH_PASSWORD_HASH");
                let jwt_secret = BASE64
                    .decode(secret_b64.trim())
                    .expect("NW_SECRET_KEY must be base64");
                AuthSettings {
                    password_hash,
                    jwt_secret,
                    access_token_ttl: Duration::from_secs(token_ttl_secs),
                }
            });

        Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            webhook_secret,
            price_refresh_interval: Duration::from_secs(refresh_secs),
            auth,
        }
    }
}
