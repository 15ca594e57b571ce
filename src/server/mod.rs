//! MCP server implementation.
//!
//! This module provides:
//! - Tool definitions with rmcp macros
//! - Tool parameter types and result envelopes
//! - Stdio transport
//!
//! # Architecture
//!
//! The server is built on the rmcp SDK and exposes four record tools:
//! `read_records`, `create_records`, `update_records` and `delete_records`.
//! Each call goes through the shared [`RecordGateway`](crate::gateway::RecordGateway).
//! Handshake and capability negotiation are handled by rmcp.
//!
//! # Example
//!
//! ```no_run
//! use supabase_mcp::config::Config;
//! use supabase_mcp::server::McpServer;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! McpServer::new(config).run_stdio().await?;
//! # Ok(())
//! # }
//! ```

mod mcp;
mod params;
mod responses;
mod tools;
mod transport;
mod types;

pub use mcp::McpServer;
pub use params::{CreateRecordsParams, DeleteRecordsParams, ReadRecordsParams, UpdateRecordsParams};
pub use responses::{into_tool_result, ErrorResponse, RecordsResponse};
pub use tools::SupabaseServer;
pub use transport::StdioTransport;
pub use types::AppState;
