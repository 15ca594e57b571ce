//! Configuration validation.
//!
//! Checked once at startup; a failure here is fatal to the process.

use super::{Config, KEY_VAR, URL_VAR};
use crate::error::ConfigError;

/// Minimum allowed timeout in milliseconds (1 second).
pub const MIN_TIMEOUT_MS: u64 = 1000;

/// Maximum allowed timeout in milliseconds (5 minutes).
pub const MAX_TIMEOUT_MS: u64 = 300_000;

/// Validate configuration values.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if:
/// - `SUPABASE_URL` is empty or not an `http(s)://` URL
/// - `SUPABASE_SERVICE_ROLE_KEY` is empty
/// - `SUPABASE_SCHEMA` is empty
/// - `REQUEST_TIMEOUT_MS` is set outside 1000..=300000
#[must_use = "validation result should be checked"]
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let url = config.supabase_url.trim();
    if url.is_empty() {
        return Err(ConfigError::InvalidValue {
            var: URL_VAR.into(),
            reason: "must not be empty".into(),
        });
    }
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(ConfigError::InvalidValue {
            var: URL_VAR.into(),
            reason: "must start with http:// or https://".into(),
        });
    }

    if config.service_role_key.is_empty() {
        return Err(ConfigError::InvalidValue {
            var: KEY_VAR.into(),
            reason: "must not be empty".into(),
        });
    }

    if config.schema.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            var: "SUPABASE_SCHEMA".into(),
            reason: "must not be empty".into(),
        });
    }

    if let Some(timeout) = config.request_timeout_ms {
        if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&timeout) {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT_MS".into(),
                reason: format!("must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS} ms"),
            });
        }
    }

    Ok(())
}
