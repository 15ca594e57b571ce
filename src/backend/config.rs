//! REST client configuration.

#![allow(clippy::missing_const_for_fn)]

/// Default Postgres schema.
pub const DEFAULT_SCHEMA: &str = "public";

/// Path of the PostgREST API below the project URL.
pub const REST_PATH: &str = "/rest/v1";

/// Client configuration for the Supabase REST API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    pub base_url: String,
    /// Schema sent in the profile headers.
    pub schema: String,
    /// Request timeout in milliseconds. `None` disables the timeout.
    pub timeout_ms: Option<u64>,
}

impl ClientConfig {
    /// Create a configuration for the given project URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            schema: DEFAULT_SCHEMA.to_string(),
            timeout_ms: None,
        }
    }

    /// Set schema.
    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    /// Set timeout in milliseconds.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Root of the REST API, without trailing slash.
    #[must_use]
    pub fn rest_url(&self) -> String {
        format!("{}{REST_PATH}", self.base_url.trim_end_matches('/'))
    }
}
