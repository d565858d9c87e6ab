use anyhow::Result;

const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:8080";

/// Configuration for the pipeline binary, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend serving the extraction and generation
    /// endpoints. Overridable per invocation via `--service-url`.
    pub service_url: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            service_url: std::env::var("SERVICE_URL")
                .unwrap_or_else(|_| DEFAULT_SERVICE_URL.to_string()),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
