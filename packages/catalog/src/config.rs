//! Environment-backed configuration.

use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Settings the catalog binary needs at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub model_name: String,
    pub openai_api_key: String,
    pub openai_base_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A missing API key is a startup error: the service refuses to run
    /// without its completion backend rather than limp along degraded.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            model_name: env::var("MODEL_NAME").unwrap_or_else(|_| "gpt-4o".to_string()),
            openai_api_key: env::var("OPENAI_API_KEY")
                .context("OPENAI_API_KEY must be set")?,
            openai_base_url: env::var("OPENAI_BASE_URL").ok(),
        })
    }
}
