//! Main MCP server orchestration.
//!
//! This module provides the main entry point for running the Supabase MCP server.

use std::sync::Arc;

use crate::backend::{ClientConfig, PostgrestClient};
use crate::config::Config;
use crate::error::AppError;

use super::tools::SupabaseServer;
use super::transport::StdioTransport;
use super::types::AppState;

/// Main MCP server that orchestrates all components.
///
/// Builds the backend client from configuration and serves the record tools
/// over stdio.
#[derive(Debug)]
pub struct McpServer {
    /// Server configuration.
    config: Config,
}

impl McpServer {
    /// Creates a new MCP server with the given configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Builds the shared state: one backend client for the process lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Backend`] if the HTTP client cannot be built.
    pub fn build_state(&self) -> Result<AppState, AppError> {
        let mut client_config =
            ClientConfig::new(&self.config.supabase_url).with_schema(&self.config.schema);
        if let Some(timeout_ms) = self.config.request_timeout_ms {
            client_config = client_config.with_timeout_ms(timeout_ms);
        }
        let client = PostgrestClient::new(self.config.service_role_key.clone(), client_config)?;

        Ok(AppState::new(Arc::new(client), self.config.clone()))
    }

    /// Runs the server using stdio transport.
    ///
    /// Blocks until the client disconnects or an error occurs.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The backend client cannot be created
    /// - The MCP handshake fails
    pub async fn run_stdio(&self) -> Result<(), AppError> {
        let state = self.build_state()?;
        let server = SupabaseServer::new(Arc::new(state));

        let running = StdioTransport::new().serve(server).await?;
        tracing::info!("MCP handshake complete, serving tools over stdio");

        let reason = running.waiting().await.map_err(|e| AppError::Transport {
            message: e.to_string(),
        })?;
        tracing::info!(?reason, "MCP session ended");

        Ok(())
    }

    /// Returns the server configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }
}
