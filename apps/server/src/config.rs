use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::RngCore;

/// Server configuration, resolved from the environment once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub db_path: String,
    pub secret_key: String,
    pub token_ttl_hours: i64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let listen_addr =
            std::env::var("SW_LISTEN_ADDR").unwrap_or_else(|_| "127.0.0.1:8425".to_string());
        let db_path =
            std::env::var("SW_DB_PATH").unwrap_or_else(|_| "./data/spendwise.db".to_string());
        let secret_key = std::env::var("SW_SECRET_KEY").unwrap_or_else(|_| {
            tracing::warn!(
                "SW_SECRET_KEY is not set; using a random key, sessions reset on restart"
            );
            let mut bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut bytes);
            BASE64.encode(bytes)
        });
        let token_ttl_hours = std::env::var("SW_TOKEN_TTL_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(24);

        Config {
            listen_addr,
            db_path,
            secret_key,
            token_ttl_hours,
        }
    }
}
