//! Schema introspection through database functions.
//!
//! Each helper issues one RPC call. The functions (`get_table_list`,
//! `get_table_schema`, `check_table_exists`) must exist in the database;
//! when they do not, the backend error is returned unchanged.

use serde_json::{json, Value};

use super::requests::require_table;
use super::RecordGateway;
use crate::error::GatewayError;

const LIST_TABLES_FN: &str = "get_table_list";
const TABLE_SCHEMA_FN: &str = "get_table_schema";
const TABLE_EXISTS_FN: &str = "check_table_exists";

impl RecordGateway {
    /// List the tables visible to the service role.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Backend`] if the RPC call fails.
    pub async fn list_tables(&self) -> Result<Value, GatewayError> {
        tracing::debug!("Listing tables");
        self.backend
            .rpc(LIST_TABLES_FN, json!({}))
            .await
            .map_err(|e| {
                tracing::error!("Error listing tables: {e}");
                e.into()
            })
    }

    /// Describe the columns of `table`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if the table name is empty, or
    /// [`GatewayError::Backend`] if the RPC call fails.
    pub async fn table_schema(&self, table: &str) -> Result<Value, GatewayError> {
        require_table(table)?;
        tracing::debug!(table = %table, "Fetching table schema");
        self.backend
            .rpc(TABLE_SCHEMA_FN, json!({ "table_name": table }))
            .await
            .map_err(|e| {
                tracing::error!("Error getting schema for table {table}: {e}");
                e.into()
            })
    }

    /// Check whether `table` exists.
    ///
    /// A payload that is not a boolean counts as `false`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if the table name is empty, or
    /// [`GatewayError::Backend`] if the RPC call fails.
    pub async fn table_exists(&self, table: &str) -> Result<bool, GatewayError> {
        require_table(table)?;
        let payload = self
            .backend
            .rpc(TABLE_EXISTS_FN, json!({ "table_name": table }))
            .await
            .map_err(|e| {
                tracing::error!("Error checking if table {table} exists: {e}");
                GatewayError::from(e)
            })?;
        Ok(payload.as_bool().unwrap_or(false))
    }
}
