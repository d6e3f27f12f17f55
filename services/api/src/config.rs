//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
    #[error("Failed to read {0}: {1}")]
    Unreadable(PathBuf, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub catalog_path: PathBuf,
    pub prompts_path: PathBuf,
    pub gemini_api_key: Option<String>,
    pub advisor_api_base: String,
    pub advisor_model: String,
    pub advisor_temperature: f32,
    pub advisor_max_tokens: u32,
    pub advisor_timeout: Duration,
    pub cors_origin: String,
}

/// File name of the advisor's system prompt template inside `prompts_path`.
pub const ADVISOR_PROMPT_FILE: &str = "course_advisor.txt";

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Server Settings ---
        let bind_address_str = var("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:5000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = var("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let cors_origin =
            var("CORS_ORIGIN").unwrap_or_else(|| "http://localhost:5173".to_string());

        // --- Catalogue and Prompt Locations ---
        let catalog_path = var("CATALOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./config/catalog.json"));
        let prompts_path = var("PROMPTS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./prompts"));

        // --- Course Advisor Settings ---
        let gemini_api_key = var("GEMINI_API_KEY").filter(|k| !k.trim().is_empty());
        let advisor_api_base = var("ADVISOR_API_BASE").unwrap_or_else(|| {
            "https://generativelanguage.googleapis.com/v1beta/openai".to_string()
        });
        let advisor_model =
            var("ADVISOR_MODEL").unwrap_or_else(|| "gemini-2.5-flash".to_string());
        let advisor_temperature = parse_or("ADVISOR_TEMPERATURE", var("ADVISOR_TEMPERATURE"), 0.7f32)?;
        let advisor_max_tokens = parse_or("ADVISOR_MAX_TOKENS", var("ADVISOR_MAX_TOKENS"), 200u32)?;
        let advisor_timeout = Duration::from_secs(parse_or(
            "ADVISOR_TIMEOUT_SECS",
            var("ADVISOR_TIMEOUT_SECS"),
            30u64,
        )?);

        Ok(Self {
            bind_address,
            log_level,
            catalog_path,
            prompts_path,
            gemini_api_key,
            advisor_api_base,
            advisor_model,
            advisor_temperature,
            advisor_max_tokens,
            advisor_timeout,
            cors_origin,
        })
    }

    /// Path of the advisor's system prompt template.
    pub fn advisor_prompt_path(&self) -> PathBuf {
        self.prompts_path.join(ADVISOR_PROMPT_FILE)
    }
}

fn parse_or<T>(name: &str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), e.to_string())),
    }
}

/// Reads a UTF-8 file named by the configuration.
pub fn read_config_file(path: &std::path::Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable(path.to_path_buf(), e.to_string()))
}
