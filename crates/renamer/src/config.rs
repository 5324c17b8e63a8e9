use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::warn;

use reelname_metadata::rate_limit::{DEFAULT_BUDGET, DEFAULT_WINDOW};
use reelname_metadata::tmdb::BASE_URL;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
}

/// Runtime settings, read from the environment.
#[derive(Debug, Clone)]
pub struct RenamerConfig {
    /// Directory tree to organise.
    pub root: PathBuf,
    pub api_key: String,
    pub tmdb_url: String,
    pub ffprobe_path: PathBuf,
    /// Metadata requests allowed per window.
    pub rate_limit: u32,
    pub rate_window: Duration,
    /// Log decisions without renaming anything.
    pub dry_run: bool,
}

impl RenamerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let root = get("REELNAME_ROOT").ok_or(ConfigError::Missing("REELNAME_ROOT"))?;
        let api_key = get("TMDB_API_KEY").ok_or(ConfigError::Missing("TMDB_API_KEY"))?;

        let rate_limit = parse_or("REELNAME_RATE_LIMIT", get("REELNAME_RATE_LIMIT"), DEFAULT_BUDGET);
        let rate_window_ms = parse_or(
            "REELNAME_RATE_WINDOW_MS",
            get("REELNAME_RATE_WINDOW_MS"),
            DEFAULT_WINDOW.as_millis() as u64,
        );

        Ok(Self {
            root: root.into(),
            api_key,
            tmdb_url: get("REELNAME_TMDB_URL").unwrap_or_else(|| BASE_URL.to_string()),
            ffprobe_path: get("REELNAME_FFPROBE")
                .unwrap_or_else(|| "ffprobe".to_string())
                .into(),
            rate_limit,
            rate_window: Duration::from_millis(rate_window_ms),
            dry_run: get("REELNAME_DRY_RUN")
                .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }
}

fn parse_or<T: std::str::FromStr + Copy + std::fmt::Display>(
    key: &str,
    raw: Option<String>,
    default: T,
) -> T {
    match raw {
        None => default,
        Some(v) => match v.trim().parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(key, value = %v, default = %default, "invalid number, using default");
                default
            }
        },
    }
}
