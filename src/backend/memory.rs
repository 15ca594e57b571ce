//! In-memory backend.
//!
//! Emulates the PostgREST semantics the gateway relies on (equality filters,
//! projection, ordering, limit, returned representations) over plain vectors
//! of rows, and records every query it receives. Used by tests and doctests.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::{json, Value};

use super::query::{Action, OrderDirection, Query};
use crate::error::BackendError;
use crate::traits::{Backend, Row};

#[derive(Debug, Default)]
struct State {
    tables: BTreeMap<String, Vec<Row>>,
    queries: Vec<Query>,
    rpc_calls: Vec<(String, Value)>,
    next_id: i64,
    failure: Option<BackendError>,
}

/// A fake backend holding tables in memory.
///
/// Inserted rows without an `id` get a sequential integer `id`, mirroring a
/// serial primary key.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: Mutex<State>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the contents of `table` with `rows`. Non-object values are ignored.
    pub fn seed(&self, table: &str, rows: Vec<Value>) {
        let rows: Vec<Row> = rows
            .into_iter()
            .filter_map(|v| match v {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();
        let mut state = self.lock();
        let max_id = rows
            .iter()
            .filter_map(|r| r.get("id").and_then(Value::as_i64))
            .max()
            .unwrap_or(0);
        state.next_id = state.next_id.max(max_id);
        state.tables.insert(table.to_string(), rows);
    }

    /// Current contents of `table`.
    #[must_use]
    pub fn rows(&self, table: &str) -> Vec<Row> {
        self.lock().tables.get(table).cloned().unwrap_or_default()
    }

    /// Every query executed so far, in order.
    #[must_use]
    pub fn queries(&self) -> Vec<Query> {
        self.lock().queries.clone()
    }

    /// Every RPC call made so far, in order.
    #[must_use]
    pub fn rpc_calls(&self) -> Vec<(String, Value)> {
        self.lock().rpc_calls.clone()
    }

    /// Makes the next call fail with `error`.
    pub fn fail_next(&self, error: BackendError) {
        self.lock().failure = Some(error);
    }

    fn missing_table(table: &str) -> BackendError {
        BackendError::new(format!("relation \"public.{table}\" does not exist"))
            .with_code("42P01")
            .with_status(404)
    }

    fn run(state: &mut State, query: &Query) -> Result<Vec<Row>, BackendError> {
        match &query.action {
            Action::Insert(records) => {
                let mut inserted = Vec::with_capacity(records.len());
                for record in records {
                    let mut record = record.clone();
                    if !record.contains_key("id") {
                        state.next_id += 1;
                        record.insert("id".to_string(), json!(state.next_id));
                    }
                    inserted.push(record);
                }
                state
                    .tables
                    .entry(query.table.clone())
                    .or_default()
                    .extend(inserted.iter().cloned());
                Ok(inserted)
            }
            Action::Select => {
                let rows = state
                    .tables
                    .get(&query.table)
                    .ok_or_else(|| Self::missing_table(&query.table))?;
                let mut selected: Vec<Row> = rows
                    .iter()
                    .filter(|row| query.filters.matches(row))
                    .cloned()
                    .collect();

                if let Some(order) = &query.order {
                    selected.sort_by(|a, b| {
                        let ord = compare(a.get(&order.column), b.get(&order.column));
                        match order.direction {
                            OrderDirection::Asc => ord,
                            OrderDirection::Desc => ord.reverse(),
                        }
                    });
                }

                if let Some(limit) = query.limit {
                    let limit = usize::try_from(limit).map_err(|_| {
                        BackendError::new(format!("invalid limit: {limit}")).with_status(400)
                    })?;
                    selected.truncate(limit);
                }

                if !query.columns.is_empty() {
                    selected = selected
                        .into_iter()
                        .map(|row| {
                            query
                                .columns
                                .iter()
                                .filter_map(|c| row.get(c).map(|v| (c.clone(), v.clone())))
                                .collect()
                        })
                        .collect();
                }
                Ok(selected)
            }
            Action::Update(values) => {
                let rows = state
                    .tables
                    .get_mut(&query.table)
                    .ok_or_else(|| Self::missing_table(&query.table))?;
                let mut updated = Vec::new();
                for row in rows.iter_mut().filter(|row| query.filters.matches(row)) {
                    for (column, value) in values.iter() {
                        row.insert(column.to_string(), value.clone().into());
                    }
                    updated.push(row.clone());
                }
                Ok(updated)
            }
            Action::Delete => {
                let rows = state
                    .tables
                    .get_mut(&query.table)
                    .ok_or_else(|| Self::missing_table(&query.table))?;
                let (deleted, kept): (Vec<Row>, Vec<Row>) = rows
                    .drain(..)
                    .partition(|row| query.filters.matches(row));
                *rows = kept;
                Ok(deleted)
            }
        }
    }
}

/// Orders JSON values the way Postgres orders a typed column: nulls last,
/// numbers numerically, everything else by its textual form.
fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Greater,
        (_, None | Some(Value::Null)) => Ordering::Less,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn execute(&self, query: Query) -> Result<Vec<Row>, BackendError> {
        let mut state = self.lock();
        state.queries.push(query.clone());
        if let Some(error) = state.failure.take() {
            return Err(error);
        }
        Self::run(&mut state, &query)
    }

    async fn rpc(&self, function: &str, args: Value) -> Result<Value, BackendError> {
        let mut state = self.lock();
        state.rpc_calls.push((function.to_string(), args.clone()));
        if let Some(error) = state.failure.take() {
            return Err(error);
        }

        let table = args.get("table_name").and_then(Value::as_str);
        match (function, table) {
            ("get_table_list", _) => Ok(json!(state.tables.keys().collect::<Vec<_>>())),
            ("check_table_exists", Some(table)) => Ok(json!(state.tables.contains_key(table))),
            ("get_table_schema", Some(table)) => {
                let rows = state
                    .tables
                    .get(table)
                    .ok_or_else(|| Self::missing_table(table))?;
                let mut columns: Vec<&String> = rows.iter().flat_map(Row::keys).collect();
                columns.sort();
                columns.dedup();
                Ok(json!(columns
                    .into_iter()
                    .map(|c| json!({"column_name": c}))
                    .collect::<Vec<_>>()))
            }
            _ => Err(BackendError::new(format!(
                "Could not find the function public.{function} in the schema cache"
            ))
            .with_code("PGRST202")
            .with_status(404)),
        }
    }
}
