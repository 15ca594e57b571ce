//! Secret string wrapper for the service-role key.
//!
//! The service-role key bypasses row-level security, so it must never
//! end up in logs or tool output.

use std::fmt;

/// A string whose Debug/Display output is always `<REDACTED>`.
///
/// # Example
///
/// ```
/// use supabase_mcp::config::SecretString;
///
/// let key = SecretString::new("service-role-key-123");
/// assert_eq!(format!("{:?}", key), "<REDACTED>");
/// assert_eq!(key.expose(), "service-role-key-123");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
    /// Wraps a secret value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Exposes the underlying value. Only call this when building request headers.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns true if the secret is empty or whitespace.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<REDACTED>")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<REDACTED>")
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
