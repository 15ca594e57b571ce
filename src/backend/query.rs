//! Backend query construction.
//!
//! A [`Query`] describes exactly one backend call. It is built by chaining
//! clauses the same way the request reads: table, projection, filters,
//! ordering, limit.

use serde_json::Value;

use crate::traits::{FilterSet, Row, Scalar, ValueMap};

/// Sort direction for ordered reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Parses a direction leniently: `desc` in any case is descending,
    /// everything else is ascending.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    /// PostgREST spelling of the direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// An ordering clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// Column to sort by.
    pub column: String,
    /// Sort direction.
    pub direction: OrderDirection,
}

/// What the query does to the table.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Read rows.
    Select,
    /// Insert the given rows.
    Insert(Vec<Row>),
    /// Set the given column values on matching rows.
    Update(ValueMap),
    /// Remove matching rows.
    Delete,
}

impl Action {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Insert(_) => "insert",
            Self::Update(_) => "update",
            Self::Delete => "delete",
        }
    }
}

/// A single backend call.
///
/// # Example
///
/// ```
/// use supabase_mcp::backend::{OrderDirection, Query};
///
/// let query = Query::select("products")
///     .columns(["id", "name"])
///     .filter("category", "electronics")
///     .order("price", OrderDirection::Desc)
///     .limit(10);
///
/// let pairs: Vec<(String, String)> = query.query_pairs();
/// assert_eq!(pairs[0], ("select".into(), "id,name".into()));
/// assert_eq!(pairs[1], ("category".into(), "eq.electronics".into()));
/// assert_eq!(pairs[2], ("order".into(), "price.desc".into()));
/// assert_eq!(pairs[3], ("limit".into(), "10".into()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Target table.
    pub table: String,
    /// Operation to perform.
    pub action: Action,
    /// Projected columns; empty means all columns.
    pub columns: Vec<String>,
    /// Equality filters, applied in order.
    pub filters: FilterSet,
    /// Optional ordering.
    pub order: Option<OrderBy>,
    /// Optional row limit, passed through as-is.
    pub limit: Option<i64>,
}

impl Query {
    fn new(table: impl Into<String>, action: Action) -> Self {
        Self {
            table: table.into(),
            action,
            columns: Vec::new(),
            filters: FilterSet::new(),
            order: None,
            limit: None,
        }
    }

    /// Starts a select on `table`.
    #[must_use]
    pub fn select(table: impl Into<String>) -> Self {
        Self::new(table, Action::Select)
    }

    /// Starts an insert of `records` into `table`.
    #[must_use]
    pub fn insert(table: impl Into<String>, records: Vec<Row>) -> Self {
        Self::new(table, Action::Insert(records))
    }

    /// Starts an update of `table` setting `values`.
    #[must_use]
    pub fn update(table: impl Into<String>, values: ValueMap) -> Self {
        Self::new(table, Action::Update(values))
    }

    /// Starts a delete from `table`.
    #[must_use]
    pub fn delete(table: impl Into<String>) -> Self {
        Self::new(table, Action::Delete)
    }

    /// Restricts the returned columns.
    #[must_use]
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Adds an equality filter.
    #[must_use]
    pub fn filter(mut self, column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.filters.insert(column, value);
        self
    }

    /// Adds every filter in `filters`, in iteration order.
    #[must_use]
    pub fn filters(mut self, filters: &FilterSet) -> Self {
        for (column, value) in filters.iter() {
            self.filters.insert(column, value.clone());
        }
        self
    }

    /// Sets the ordering.
    #[must_use]
    pub fn order(mut self, column: impl Into<String>, direction: OrderDirection) -> Self {
        self.order = Some(OrderBy {
            column: column.into(),
            direction,
        });
        self
    }

    /// Sets the row limit.
    #[must_use]
    pub const fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns true for insert, update and delete.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        !matches!(self.action, Action::Select)
    }

    /// PostgREST query-string parameters, in clause order.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if matches!(self.action, Action::Select) {
            let select = if self.columns.is_empty() {
                "*".to_string()
            } else {
                self.columns.join(",")
            };
            pairs.push(("select".to_string(), select));
        }

        if let Some(columns) = self.insert_columns() {
            pairs.push(("columns".to_string(), columns));
        }

        for (column, value) in self.filters.iter() {
            pairs.push((column.to_string(), value.to_filter_operand()));
        }

        if let Some(order) = &self.order {
            pairs.push((
                "order".to_string(),
                format!("{}.{}", order.column, order.direction.as_str()),
            ));
        }

        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }

        pairs
    }

    /// Union of the inserted records' keys, in first-seen order.
    ///
    /// PostgREST rejects a bulk insert whose objects have different keys
    /// unless `columns` names them; missing values are then stored as null.
    fn insert_columns(&self) -> Option<String> {
        let Action::Insert(records) = &self.action else {
            return None;
        };
        let mut columns: Vec<&str> = Vec::new();
        for key in records.iter().flat_map(Row::keys) {
            if !columns.contains(&key.as_str()) {
                columns.push(key);
            }
        }
        (!columns.is_empty()).then(|| columns.join(","))
    }

    /// JSON request body, if the action carries one.
    #[must_use]
    pub fn body(&self) -> Option<Value> {
        match &self.action {
            Action::Insert(records) => Some(Value::Array(
                records.iter().cloned().map(Value::Object).collect(),
            )),
            Action::Update(values) => Some(Value::Object(values.to_json_object())),
            Action::Select | Action::Delete => None,
        }
    }
}
