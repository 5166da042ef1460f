use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_BATCH_SIZE: usize = 500;

/// Application configuration loaded from environment variables.
/// Every variable is optional; see `Config::default` for the fallbacks.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON file overriding the built-in screening tables.
    pub tables_path: Option<PathBuf>,
    pub max_batch_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
            tables_path: None,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: optional_env("PORT")
                .map(|v| v.parse::<u16>())
                .transpose()
                .context("PORT must be a valid port number")?
                .unwrap_or(defaults.port),
            rust_log: optional_env("RUST_LOG").unwrap_or(defaults.rust_log),
            tables_path: optional_env("SCREENING_TABLES_PATH").map(PathBuf::from),
            max_batch_size: optional_env("MAX_BATCH_SIZE")
                .map(|v| v.parse::<usize>())
                .transpose()
                .context("MAX_BATCH_SIZE must be a positive integer")?
                .unwrap_or(defaults.max_batch_size),
        })
    }
}

/// Reads a variable, treating blank values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
