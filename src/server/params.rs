//! Tool parameter types.
//!
//! This module defines the input parameter structures for the four record tools.
//! Each struct uses schemars for automatic JSON schema generation.
//!
//! A missing required parameter fails deserialization and is reported as an
//! invalid-params protocol error. A present but empty value reaches the
//! gateway and fails validation there.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::backend::OrderDirection;
use crate::gateway::{CreateRequest, DeleteRequest, ReadRequest, UpdateRequest, DEFAULT_LIMIT};
use crate::traits::{FilterSet, Row, Scalar, ValueMap};

/// Parameters for the `read_records` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReadRecordsParams {
    /// Table to read from.
    #[schemars(description = "Name of the table to read from")]
    pub table_name: String,

    /// Columns to return.
    #[schemars(description = "Columns to return; omit or pass an empty list for all columns")]
    pub columns: Option<Vec<String>>,

    /// Equality filters.
    #[schemars(
        description = "Column/value pairs that every returned row must equal",
        with = "BTreeMap<String, Scalar>"
    )]
    #[serde(default)]
    pub filters: FilterSet,

    /// Maximum number of rows.
    #[schemars(description = "Maximum number of rows to return (default 100)")]
    #[serde(default = "default_limit")]
    pub limit: i64,

    /// Column to order by.
    #[schemars(description = "Column to order the results by")]
    pub order_by: Option<String>,

    /// Ordering direction.
    #[schemars(description = "\"asc\" or \"desc\" (default \"asc\")")]
    #[serde(default = "default_order_direction")]
    pub order_direction: String,
}

const fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

fn default_order_direction() -> String {
    OrderDirection::Asc.as_str().to_string()
}

impl From<ReadRecordsParams> for ReadRequest {
    fn from(params: ReadRecordsParams) -> Self {
        Self {
            table: params.table_name,
            columns: params.columns,
            filters: params.filters,
            limit: params.limit,
            order_by: params.order_by,
            order_direction: OrderDirection::parse(&params.order_direction),
        }
    }
}

/// Parameters for the `create_records` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateRecordsParams {
    /// Table to insert into.
    #[schemars(description = "Name of the table to insert into")]
    pub table_name: String,

    /// Rows to insert.
    #[schemars(description = "Records to insert, each a column/value object; keys missing from a record are stored as null")]
    pub records: Vec<Row>,
}

impl From<CreateRecordsParams> for CreateRequest {
    fn from(params: CreateRecordsParams) -> Self {
        Self::new(params.table_name, params.records)
    }
}

/// Parameters for the `update_records` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateRecordsParams {
    /// Table to update.
    #[schemars(description = "Name of the table to update")]
    pub table_name: String,

    /// Values to set.
    #[schemars(
        description = "Column/value pairs to set on every matching row",
        with = "BTreeMap<String, Scalar>"
    )]
    pub updates: ValueMap,

    /// Rows to update.
    #[schemars(
        description = "Column/value pairs selecting the rows to update; must not be empty",
        with = "BTreeMap<String, Scalar>"
    )]
    pub filters: FilterSet,
}

impl From<UpdateRecordsParams> for UpdateRequest {
    fn from(params: UpdateRecordsParams) -> Self {
        Self::new(params.table_name, params.updates, params.filters)
    }
}

/// Parameters for the `delete_records` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DeleteRecordsParams {
    /// Table to delete from.
    #[schemars(description = "Name of the table to delete from")]
    pub table_name: String,

    /// Rows to delete.
    #[schemars(
        description = "Column/value pairs selecting the rows to delete; must not be empty",
        with = "BTreeMap<String, Scalar>"
    )]
    pub filters: FilterSet,
}

impl From<DeleteRecordsParams> for DeleteRequest {
    fn from(params: DeleteRecordsParams) -> Self {
        Self::new(params.table_name, params.filters)
    }
}
