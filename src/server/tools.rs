//! Tool definitions with rmcp macros.
//!
//! This module defines the four record tools using the rmcp router macros:
//! `#[tool_router]` on the impl, `#[tool]` on each method and
//! `#[tool_handler]` on the `ServerHandler` impl.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Implementation, ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError};

use super::params::{
    CreateRecordsParams, DeleteRecordsParams, ReadRecordsParams, UpdateRecordsParams,
};
use super::responses::{into_tool_result, RecordsResponse};
use super::types::AppState;

/// Name reported in the MCP handshake.
pub const SERVER_NAME: &str = "supabase-mcp";

/// MCP server exposing record CRUD tools over one Supabase project.
#[derive(Clone)]
pub struct SupabaseServer {
    state: Arc<AppState>,
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for SupabaseServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseServer")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl SupabaseServer {
    /// Creates a server over shared state.
    #[must_use]
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            tool_router: Self::tool_router(),
        }
    }

    /// Returns the shared state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

#[tool_router]
impl SupabaseServer {
    /// Read rows from a table.
    #[tool(
        description = "Read records from a Supabase table. \
        table_name: name of the table to read from. \
        columns: columns to return; omit or pass an empty list for all columns. \
        filters: column/value pairs that every returned row must equal. \
        limit: maximum number of rows to return (default 100). \
        order_by: column to order the results by. \
        order_direction: \"asc\" or \"desc\" (default \"asc\")."
    )]
    pub async fn read_records(
        &self,
        Parameters(params): Parameters<ReadRecordsParams>,
    ) -> Result<CallToolResult, McpError> {
        let table = params.table_name.clone();
        tracing::info!(table = %table, "read_records");

        let result = self
            .state
            .gateway
            .read(params.into())
            .await
            .map(|rows| RecordsResponse::new(&table, rows));
        into_tool_result(&table, result)
    }

    /// Insert rows into a table.
    #[tool(
        description = "Create one or more records in a Supabase table and return the created rows. \
        table_name: name of the table to insert into. \
        records: records to insert, each a column/value object; keys missing from a record are stored as null."
    )]
    pub async fn create_records(
        &self,
        Parameters(params): Parameters<CreateRecordsParams>,
    ) -> Result<CallToolResult, McpError> {
        let table = params.table_name.clone();
        tracing::info!(table = %table, records = params.records.len(), "create_records");

        let result = self
            .state
            .gateway
            .create(params.into())
            .await
            .map(|rows| RecordsResponse::new(&table, rows));
        into_tool_result(&table, result)
    }

    /// Update rows matching all filters.
    #[tool(
        description = "Update records in a Supabase table and return the updated rows. \
        table_name: name of the table to update. \
        updates: column/value pairs to set on every matching row. \
        filters: column/value pairs selecting the rows to update; must not be empty."
    )]
    pub async fn update_records(
        &self,
        Parameters(params): Parameters<UpdateRecordsParams>,
    ) -> Result<CallToolResult, McpError> {
        let table = params.table_name.clone();
        tracing::info!(table = %table, "update_records");

        let result = self
            .state
            .gateway
            .update(params.into())
            .await
            .map(|rows| RecordsResponse::new(&table, rows));
        into_tool_result(&table, result)
    }

    /// Delete rows matching all filters.
    #[tool(
        description = "Delete records from a Supabase table and return the deleted rows with their count. \
        table_name: name of the table to delete from. \
        filters: column/value pairs selecting the rows to delete; must not be empty."
    )]
    pub async fn delete_records(
        &self,
        Parameters(params): Parameters<DeleteRecordsParams>,
    ) -> Result<CallToolResult, McpError> {
        let table = params.table_name.clone();
        tracing::info!(table = %table, "delete_records");

        let result = self
            .state
            .gateway
            .delete(params.into())
            .await
            .map(|outcome| RecordsResponse::deleted(&table, outcome));
        into_tool_result(&table, result)
    }
}

#[tool_handler]
impl rmcp::ServerHandler for SupabaseServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(format!(
                "Supabase record gateway for schema \"{}\". \
                Use read_records to query rows, create_records to insert, \
                update_records and delete_records to change rows matched by equality filters.",
                self.state.config.schema
            )),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::default()
            },
            ..Default::default()
        }
    }
}
