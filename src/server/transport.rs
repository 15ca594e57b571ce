//! Transport layer for MCP server.
//!
//! Only stdio is supported. Stdout carries JSON-RPC frames, so nothing else
//! may write to it; logs go to stderr.

use rmcp::service::{serve_server, RoleServer, RunningService};
use rmcp::transport::io::stdio;

use super::tools::SupabaseServer;
use crate::error::AppError;

/// Stdio transport handler.
#[derive(Debug, Default)]
pub struct StdioTransport;

impl StdioTransport {
    /// Creates a new stdio transport.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Starts serving `server` over stdin/stdout.
    ///
    /// Completes once the MCP handshake is done; await
    /// [`RunningService::waiting`] to block until the client disconnects.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Transport`] if the handshake fails.
    pub async fn serve(
        self,
        server: SupabaseServer,
    ) -> Result<RunningService<RoleServer, SupabaseServer>, AppError> {
        let (stdin, stdout) = stdio();

        serve_server(server, (stdin, stdout))
            .await
            .map_err(|e| AppError::Transport {
                message: e.to_string(),
            })
    }
}
