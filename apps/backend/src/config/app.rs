//! Server configuration from environment variables.
//!
//! Environment variables must be set by the runtime environment:
//! - Docker: via compose env_file or `docker run --env-file`
//! - Local dev: source env files manually (e.g., `set -a; . ./.env; set +a`)

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("BACKEND_PORT")
            .unwrap_or_else(|_| "3001".to_string())
            .parse::<u16>()
            .map_err(|_| AppError::config("BACKEND_PORT must be a valid port number".into()))?;

        Ok(Self { host, port })
    }
}
