//! Tool result envelopes.
//!
//! Successful calls return `{"success": true, "data", "count", "table"}`.
//! Failed calls return an error result (`isError: true`) carrying
//! `{"success": false, "error", "kind", "code", "table"}` so the client
//! sees the backend message unchanged.

use rmcp::model::{CallToolResult, Content};
use rmcp::ErrorData as McpError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GatewayError;
use crate::gateway::DeleteOutcome;
use crate::traits::Row;

/// Successful record operation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RecordsResponse {
    /// Always true.
    pub success: bool,
    /// Rows returned by the backend.
    pub data: Vec<Value>,
    /// Number of rows in `data`, or rows deleted.
    pub count: usize,
    /// Table the operation ran against.
    pub table: String,
}

impl RecordsResponse {
    /// Wrap rows returned for `table`.
    #[must_use]
    pub fn new(table: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            success: true,
            count: rows.len(),
            data: rows.into_iter().map(Value::Object).collect(),
            table: table.into(),
        }
    }

    /// Wrap a delete acknowledgement.
    #[must_use]
    pub fn deleted(table: impl Into<String>, outcome: DeleteOutcome) -> Self {
        Self {
            success: true,
            count: outcome.count,
            data: outcome.rows.into_iter().map(Value::Object).collect(),
            table: table.into(),
        }
    }
}

/// Failed record operation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Always false.
    pub success: bool,
    /// Error message, verbatim from validation or the backend.
    pub error: String,
    /// `validation` or `backend`.
    pub kind: String,
    /// Backend error code, when the backend sent one.
    pub code: Option<String>,
    /// Table the operation targeted.
    pub table: String,
}

impl ErrorResponse {
    /// Describe `error` for `table`.
    #[must_use]
    pub fn new(table: impl Into<String>, error: &GatewayError) -> Self {
        Self {
            success: false,
            error: error.to_string(),
            kind: error.kind().to_string(),
            code: error.code().map(str::to_string),
            table: table.into(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string(value).map_err(|e| McpError::internal_error(e.to_string(), None))
}

/// Build the tool result for a finished operation.
///
/// # Errors
///
/// Returns an internal protocol error only if the envelope cannot be serialized.
pub fn into_tool_result(
    table: &str,
    result: Result<RecordsResponse, GatewayError>,
) -> Result<CallToolResult, McpError> {
    match result {
        Ok(response) => Ok(CallToolResult::success(vec![Content::text(to_json(
            &response,
        )?)])),
        Err(e) => Ok(CallToolResult::error(vec![Content::text(to_json(
            &ErrorResponse::new(table, &e),
        )?)])),
    }
}
