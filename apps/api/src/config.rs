use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails fast if a required variable is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub openai_api_key: String,
    pub auth_token_secret: String,
    pub billing_secret_key: String,
    pub billing_webhook_secret: String,
    pub billing_price_id: String,
    pub app_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            openai_api_key: require_env("OPENAI_API_KEY")?,
            auth_token_secret: require_env("AUTH_TOKEN_SECRET")?,
            billing_secret_key: require_env("BILLING_SECRET_KEY")?,
            billing_webhook_secret: require_env("BILLING_WEBHOOK_SECRET")?,
            billing_price_id: require_env("BILLING_MONTHLY_PRICE_ID")?,
            app_url: require_env("APP_URL")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
