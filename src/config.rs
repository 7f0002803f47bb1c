// src/config.rs

use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// Access token lifetime in seconds. Default: 8 days.
    pub jwt_expiration: u64,
    pub rust_log: String,

    /// hunter.io-style email verifier. No key configured = verification skipped.
    pub email_verifier_url: String,
    pub email_verifier_api_key: Option<String>,

    /// clearbit-style person lookup for name/surname enrichment.
    pub enrichment_url: String,
    pub enrichment_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60 * 60 * 24 * 8);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let email_verifier_url = env::var("EMAIL_VERIFIER_URL")
            .unwrap_or_else(|_| "https://api.hunter.io/v2/email-verifier".to_string());
        let email_verifier_api_key = env::var("EMAIL_VERIFIER_API_KEY").ok();

        let enrichment_url = env::var("ENRICHMENT_URL")
            .unwrap_or_else(|_| "https://person.clearbit.com/v2/people/find".to_string());
        let enrichment_api_key = env::var("ENRICHMENT_API_KEY").ok();

        Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            rust_log,
            email_verifier_url,
            email_verifier_api_key,
            enrichment_url,
            enrichment_api_key,
        }
    }
}
