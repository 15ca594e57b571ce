//! Error types for the Supabase MCP Server.
//!
//! This module defines a hierarchical error system:
//! - [`AppError`]: Top-level application errors
//! - [`BackendError`]: Failures reported by the Supabase REST API or the transport
//! - [`GatewayError`]: Per-call record operation errors (validation or backend)
//! - [`ConfigError`]: Configuration errors
//!
//! All errors implement `Send + Sync` for async compatibility.

use serde::Deserialize;
use thiserror::Error;

/// Top-level application error.
///
/// Returned by startup and serving functions. Per-call tool failures
/// are reported to the client as [`GatewayError`] and never reach here.
#[derive(Debug, Error)]
pub enum AppError {
    /// Backend client error.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Record operation error.
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// MCP transport error.
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// An error reported by the backend or its transport.
///
/// The message is kept exactly as the backend sent it. Network failures
/// have no `code` and no `status`.
#[derive(Debug, Error, Clone, PartialEq, Eq, Deserialize)]
#[error("{message}")]
pub struct BackendError {
    /// Backend error message, passed through unmodified.
    pub message: String,
    /// Backend error code (e.g. a Postgres SQLSTATE such as `23505`).
    #[serde(default)]
    pub code: Option<String>,
    /// Additional detail from the backend.
    #[serde(default)]
    pub details: Option<String>,
    /// Hint from the backend on how to resolve the error.
    #[serde(default)]
    pub hint: Option<String>,
    /// HTTP status of the failed response.
    #[serde(skip)]
    pub status: Option<u16>,
}

impl BackendError {
    /// Creates a backend error with only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            details: None,
            hint: None,
            status: None,
        }
    }

    /// Sets the backend error code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Sets the HTTP status.
    #[must_use]
    pub const fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

/// Record operation errors.
///
/// Exactly two kinds exist: local validation failures, raised before any
/// backend call, and failures reported by the backend itself.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// A required field is missing or empty.
    #[error("{message}")]
    Validation {
        /// The offending request field.
        field: String,
        /// Which constraint failed.
        message: String,
    },

    /// The backend call failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl GatewayError {
    /// Creates a validation error for `field`.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Short machine-readable name of the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::Backend(_) => "backend",
        }
    }

    /// Backend error code, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Validation { .. } => None,
            Self::Backend(e) => e.code.as_deref(),
        }
    }
}

/// Configuration errors.
///
/// These errors represent failures in configuration loading and validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Required configuration is missing.
    #[error("Missing required: {var}")]
    MissingRequired {
        /// The missing variable name.
        var: String,
    },

    /// Configuration value is invalid.
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue {
        /// The variable name.
        var: String,
        /// Why the value is invalid.
        reason: String,
    },
}
