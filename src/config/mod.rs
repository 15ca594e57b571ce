//! Configuration management.
//!
//! This module handles:
//! - Environment variable loading (with optional `.env` file)
//! - Configuration validation
//! - Default value handling
//! - Secure service-role key storage via [`SecretString`]
//!
//! # Example
//!
//! ```
//! use supabase_mcp::config::{Config, SecretString, DEFAULT_SCHEMA};
//!
//! // Create a config directly (use Config::from_env() in production)
//! let config = Config {
//!     supabase_url: "https://xyz.supabase.co".to_string(),
//!     service_role_key: SecretString::new("service-role-example-key"),
//!     schema: DEFAULT_SCHEMA.to_string(),
//!     log_level: "info".to_string(),
//!     request_timeout_ms: None,
//! };
//!
//! println!("Using project: {}", config.supabase_url);
//! // The key is protected from accidental logging
//! let debug = format!("{:?}", config);
//! assert!(debug.contains("<REDACTED>"));
//! assert!(!debug.contains("service-role-example-key"));
//! ```

mod secret;
mod validation;

pub use crate::backend::DEFAULT_SCHEMA;
pub use secret::SecretString;
pub use validation::{validate_config, MAX_TIMEOUT_MS, MIN_TIMEOUT_MS};

use tracing_subscriber::filter::EnvFilter;

use crate::error::ConfigError;

/// Environment variable holding the Supabase project URL.
pub const URL_VAR: &str = "SUPABASE_URL";

/// Environment variable holding the service-role key.
pub const KEY_VAR: &str = "SUPABASE_SERVICE_ROLE_KEY";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Application configuration.
///
/// Use [`Config::from_env`] to load configuration from environment variables.
/// The `service_role_key` field uses [`SecretString`] to prevent accidental logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Supabase project URL, e.g. `https://xyz.supabase.co`.
    pub supabase_url: String,
    /// Service-role key (protected from logging via [`SecretString`]).
    pub service_role_key: SecretString,
    /// Postgres schema the tools operate on.
    pub schema: String,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: String,
    /// Optional HTTP request timeout. `None` waits for the backend indefinitely.
    pub request_timeout_ms: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `SUPABASE_URL`: Supabase project URL
    /// - `SUPABASE_SERVICE_ROLE_KEY`: service-role key
    ///
    /// Optional environment variables (with defaults):
    /// - `SUPABASE_SCHEMA`: Postgres schema (default: `public`)
    /// - `LOG_LEVEL`: Logging level (default: `info`)
    /// - `REQUEST_TIMEOUT_MS`: HTTP request timeout (default: none)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if:
    /// - `SUPABASE_URL` or `SUPABASE_SERVICE_ROLE_KEY` is missing
    /// - `REQUEST_TIMEOUT_MS` is not a valid positive integer
    /// - Any value fails validation (see [`validate_config`])
    #[must_use = "configuration should be used"]
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        let supabase_url = required_env(URL_VAR)?;
        let service_role_key = required_env(KEY_VAR)?;

        let schema = std::env::var("SUPABASE_SCHEMA").unwrap_or_else(|_| DEFAULT_SCHEMA.into());
        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.into());
        let request_timeout_ms = parse_env_optional_u64("REQUEST_TIMEOUT_MS")?;

        let config = Self {
            supabase_url,
            service_role_key: SecretString::new(service_role_key),
            schema,
            log_level,
            request_timeout_ms,
        };

        validate_config(&config)?;
        Ok(config)
    }

    /// Tracing filter for the configured log level.
    #[must_use]
    pub fn log_filter(&self) -> EnvFilter {
        log_filter(&self.log_level)
    }
}

/// Build a tracing filter from a level or directive string, falling back to
/// [`DEFAULT_LOG_LEVEL`] when it does not parse.
#[must_use]
pub fn log_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

fn required_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingRequired { var: name.into() })
}

/// Parse an optional environment variable as u64.
fn parse_env_optional_u64(name: &str) -> Result<Option<u64>, ConfigError> {
    std::env::var(name).map_or(Ok(None), |val| {
        val.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
            var: name.into(),
            reason: "must be a positive integer".into(),
        })
    })
}
