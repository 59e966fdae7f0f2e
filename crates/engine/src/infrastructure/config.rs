//! Application configuration
//!
//! Settings are read from the environment (after `.env.local` and `.env` are
//! loaded). Each setting has a dotted key; the environment name is the key
//! upper-cased with dots replaced, under the `STARSHEET_` prefix:
//! `reference.data` is read from `STARSHEET_REFERENCE_DATA`.

use std::env;
use std::path::PathBuf;

/// Prefix for every environment variable the engine reads.
pub const ENV_PREFIX: &str = "STARSHEET";

pub const REFERENCE_DATA_KEY: &str = "reference.data";
pub const LOG_FILTER_KEY: &str = "log.filter";
pub const PRETTY_OUTPUT_KEY: &str = "pretty.output";

const DEFAULT_REFERENCE_DATA: &str = "data/reference.json";
const DEFAULT_LOG_FILTER: &str = "starsheet_engine=info";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Configuration key not found: {key} (set {env_var})")]
    KeyNotFound { key: String, env_var: String },

    #[error("Invalid value for {key}: {message}")]
    Invalid { key: String, message: String },
}

/// Application configuration loaded from environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// JSON file holding the reference data set and stored characters
    pub reference_data: PathBuf,
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Pretty-print the JSON sheets
    pub pretty_output: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            reference_data: PathBuf::from(DEFAULT_REFERENCE_DATA),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            pretty_output: false,
        }
    }
}

/// Maps a dotted configuration key to its environment variable name.
pub fn env_key(key: &str) -> String {
    format!(
        "{ENV_PREFIX}_{}",
        key.replace(['.', '-'], "_").to_ascii_uppercase()
    )
}

/// Reads a required setting. Blank values count as missing.
pub fn require<F>(lookup: F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let env_var = env_key(key);
    lookup(&env_var)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ConfigError::KeyNotFound {
            key: key.to_string(),
            env_var,
        })
}

fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    require(lookup, key).ok()
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Invalid {
            key: key.to_string(),
            message: format!("expected a boolean, got '{other}'"),
        }),
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let pretty_output = match optional(&lookup, PRETTY_OUTPUT_KEY) {
            Some(value) => parse_flag(PRETTY_OUTPUT_KEY, &value)?,
            None => defaults.pretty_output,
        };

        Ok(Self {
            reference_data: optional(&lookup, REFERENCE_DATA_KEY)
                .map(PathBuf::from)
                .unwrap_or(defaults.reference_data),
            log_filter: optional(&lookup, LOG_FILTER_KEY).unwrap_or(defaults.log_filter),
            pretty_output,
        })
    }
}
