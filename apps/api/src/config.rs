use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::fitment::profile::SelectionBounds;

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// When unset the service runs on the in-memory store.
    pub database_url: Option<String>,
    /// Overrides the embedded career catalog.
    pub catalog_path: Option<PathBuf>,
    /// Denominator of the value-alignment term and the maximum selection size.
    pub expected_value_count: usize,
    pub min_value_count: usize,
    pub top_matches: usize,
    pub public_base_url: String,
    pub qr_service_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            database_url: None,
            catalog_path: None,
            expected_value_count: 5,
            min_value_count: 3,
            top_matches: 5,
            public_base_url: "http://localhost:8080".to_string(),
            qr_service_url: "https://api.qrserver.com/v1/create-qr-code/".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let config = Config {
            port: parse_env_or("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            database_url: optional_env("DATABASE_URL"),
            catalog_path: optional_env("CATALOG_PATH").map(PathBuf::from),
            expected_value_count: parse_env_or(
                "EXPECTED_VALUE_COUNT",
                defaults.expected_value_count,
            )?,
            min_value_count: parse_env_or("MIN_VALUE_COUNT", defaults.min_value_count)?,
            top_matches: parse_env_or("TOP_MATCHES", defaults.top_matches)?,
            public_base_url: optional_env("PUBLIC_BASE_URL").unwrap_or(defaults.public_base_url),
            qr_service_url: optional_env("QR_SERVICE_URL").unwrap_or(defaults.qr_service_url),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.expected_value_count == 0 {
            bail!("EXPECTED_VALUE_COUNT must be at least 1");
        }
        if self.min_value_count > self.expected_value_count {
            bail!(
                "MIN_VALUE_COUNT ({}) must not exceed EXPECTED_VALUE_COUNT ({})",
                self.min_value_count,
                self.expected_value_count
            );
        }
        if self.top_matches == 0 {
            bail!("TOP_MATCHES must be at least 1");
        }
        Ok(())
    }

    pub fn selection_bounds(&self) -> SelectionBounds {
        SelectionBounds {
            min: self.min_value_count,
            max: self.expected_value_count,
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
