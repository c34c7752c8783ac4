//! Process settings from environment variables (after `dotenvy`).

use crate::error::ConfigError;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
    pub resources_path: PathBuf,
    pub body_limit_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: "sqlite://chinook.db".into(),
            bind_addr: "0.0.0.0:3000".into(),
            max_connections: 5,
            resources_path: PathBuf::from("resources.json"),
            body_limit_bytes: 1024 * 1024,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Settings::default();
        Ok(Settings {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            max_connections: parse_var(&lookup, "DB_MAX_CONNECTIONS")?.unwrap_or(defaults.max_connections),
            resources_path: lookup("RESOURCES_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.resources_path),
            body_limit_bytes: parse_var(&lookup, "BODY_LIMIT_BYTES")?.unwrap_or(defaults.body_limit_bytes),
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(v) => v
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Load(format!("{} must be a number, got '{}'", key, v))),
    }
}
