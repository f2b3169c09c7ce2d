use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Hex-encoded 32-byte AES-256 key for opaque member tokens
    pub member_token_key: String,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub upload_dir: String,
    pub allowed_origins: Vec<String>,
    pub selection_ttl_secs: u64,
    pub default_page_size: i64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            member_token_key: env::var("MEMBER_TOKEN_KEY")
                .context("MEMBER_TOKEN_KEY must be set")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "coop-server".to_string()),
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads/members".to_string()),
            allowed_origins: parse_list(&env::var("ALLOWED_ORIGINS").unwrap_or_default()),
            selection_ttl_secs: env::var("SELECTION_TTL_SECS")
                .unwrap_or_else(|_| "86400".to_string())
                .parse()
                .context("SELECTION_TTL_SECS must be a valid number")?,
            default_page_size: env::var("DEFAULT_PAGE_SIZE")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("DEFAULT_PAGE_SIZE must be a valid number")?,
        })
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
