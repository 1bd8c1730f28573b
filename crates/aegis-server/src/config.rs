//! Server configuration from environment.

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub ranker_url: String,
    pub ranker_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("AEGIS_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8001),
            ranker_url: env::var("RANKER_URL")
                .unwrap_or_else(|_| "http://localhost:8000/v1/compare".to_string()),
            ranker_timeout_secs: env::var("RANKER_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        }
    }
}
