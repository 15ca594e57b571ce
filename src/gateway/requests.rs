//! Record operation requests and their validation.
//!
//! Validation runs before any backend call. Update and delete must be scoped
//! by at least one filter; an unscoped mutation never reaches the database.

use crate::backend::{OrderDirection, Query};
use crate::error::GatewayError;
use crate::traits::{FilterSet, Row, ValueMap};

/// Default number of rows returned by a read.
pub const DEFAULT_LIMIT: i64 = 100;

/// Request to read rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadRequest {
    /// Table to read from.
    pub table: String,
    /// Columns to return; `None` or empty returns all columns.
    pub columns: Option<Vec<String>>,
    /// Equality filters; empty means every row is eligible.
    pub filters: FilterSet,
    /// Maximum number of rows, passed to the backend unvalidated.
    pub limit: i64,
    /// Column to order by.
    pub order_by: Option<String>,
    /// Direction used when `order_by` is set.
    pub order_direction: OrderDirection,
}

impl ReadRequest {
    /// Read from `table` with default options.
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: None,
            filters: FilterSet::new(),
            limit: DEFAULT_LIMIT,
            order_by: None,
            order_direction: OrderDirection::Asc,
        }
    }

    /// Set the projection.
    #[must_use]
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the filters.
    #[must_use]
    pub fn with_filters(mut self, filters: FilterSet) -> Self {
        self.filters = filters;
        self
    }

    /// Set the limit.
    #[must_use]
    pub const fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    /// Set the ordering.
    #[must_use]
    pub fn with_order(mut self, column: impl Into<String>, direction: OrderDirection) -> Self {
        self.order_by = Some(column.into());
        self.order_direction = direction;
        self
    }

    pub(crate) fn into_query(self) -> Result<Query, GatewayError> {
        require_table(&self.table)?;

        let mut query = Query::select(self.table);
        if let Some(columns) = self.columns.filter(|c| !c.is_empty()) {
            query = query.columns(columns);
        }
        query = query.filters(&self.filters);
        if let Some(column) = self.order_by {
            query = query.order(column, self.order_direction);
        }
        Ok(query.limit(self.limit))
    }
}

/// Request to insert rows.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateRequest {
    /// Table to insert into.
    pub table: String,
    /// Rows to insert, in order.
    pub records: Vec<Row>,
}

impl CreateRequest {
    /// Insert `records` into `table`.
    #[must_use]
    pub fn new(table: impl Into<String>, records: Vec<Row>) -> Self {
        Self {
            table: table.into(),
            records,
        }
    }

    pub(crate) fn into_query(self) -> Result<Query, GatewayError> {
        require_table(&self.table)?;
        if self.records.is_empty() {
            return Err(GatewayError::validation(
                "records",
                "No records provided for insertion",
            ));
        }
        Ok(Query::insert(self.table, self.records))
    }
}

/// Request to update rows.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRequest {
    /// Table to update.
    pub table: String,
    /// Column values to set.
    pub updates: ValueMap,
    /// Rows to update; must not be empty.
    pub filters: FilterSet,
}

impl UpdateRequest {
    /// Set `updates` on rows of `table` matching `filters`.
    #[must_use]
    pub fn new(table: impl Into<String>, updates: ValueMap, filters: FilterSet) -> Self {
        Self {
            table: table.into(),
            updates,
            filters,
        }
    }

    pub(crate) fn into_query(self) -> Result<Query, GatewayError> {
        require_table(&self.table)?;
        if self.updates.is_empty() {
            return Err(GatewayError::validation("updates", "No updates provided"));
        }
        require_filters(
            &self.filters,
            "No filters provided. Updating all records is not allowed for safety reasons.",
        )?;
        Ok(Query::update(self.table, self.updates).filters(&self.filters))
    }
}

/// Request to delete rows.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteRequest {
    /// Table to delete from.
    pub table: String,
    /// Rows to delete; must not be empty.
    pub filters: FilterSet,
}

impl DeleteRequest {
    /// Delete rows of `table` matching `filters`.
    #[must_use]
    pub fn new(table: impl Into<String>, filters: FilterSet) -> Self {
        Self {
            table: table.into(),
            filters,
        }
    }

    pub(crate) fn into_query(self) -> Result<Query, GatewayError> {
        require_table(&self.table)?;
        require_filters(
            &self.filters,
            "No filters provided. Deleting all records is not allowed for safety reasons.",
        )?;
        Ok(Query::delete(self.table).filters(&self.filters))
    }
}

/// Acknowledgement of a delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Number of rows the backend reported as deleted.
    pub count: usize,
    /// The deleted rows, as returned by the backend.
    pub rows: Vec<Row>,
}

impl From<Vec<Row>> for DeleteOutcome {
    fn from(rows: Vec<Row>) -> Self {
        Self {
            count: rows.len(),
            rows,
        }
    }
}

pub(crate) fn require_table(table: &str) -> Result<(), GatewayError> {
    if table.trim().is_empty() {
        return Err(GatewayError::validation(
            "table_name",
            "Table name must not be empty",
        ));
    }
    Ok(())
}

fn require_filters(filters: &FilterSet, message: &str) -> Result<(), GatewayError> {
    if filters.is_empty() {
        return Err(GatewayError::validation("filters", message));
    }
    Ok(())
}
