//! Record operation gateway.
//!
//! Translates a record operation request into exactly one backend call:
//!
//! 1. validate the request, failing before any backend interaction
//! 2. build one [`Query`](crate::backend::Query)
//! 3. execute it
//! 4. return the backend rows unmodified, or the backend error as-is
//!
//! There are no retries and no client-side filtering or pagination.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use serde_json::json;
//! use supabase_mcp::backend::MemoryBackend;
//! use supabase_mcp::gateway::{ReadRequest, RecordGateway};
//! use supabase_mcp::traits::FilterSet;
//!
//! let backend = Arc::new(MemoryBackend::new());
//! backend.seed("users", vec![json!({"id": 1, "active": true}), json!({"id": 2, "active": false})]);
//!
//! let gateway = RecordGateway::new(backend);
//! let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! let rows = rt
//!     .block_on(gateway.read(
//!         ReadRequest::new("users").with_filters(FilterSet::new().with("active", true)),
//!     ))
//!     .unwrap();
//! assert_eq!(rows.len(), 1);
//! ```

mod introspection;
mod requests;

pub use requests::{
    CreateRequest, DeleteOutcome, DeleteRequest, ReadRequest, UpdateRequest, DEFAULT_LIMIT,
};

use std::sync::Arc;

use crate::error::GatewayError;
use crate::traits::{Backend, Row};

/// Stateless gateway over an injected [`Backend`].
#[derive(Clone)]
pub struct RecordGateway {
    backend: Arc<dyn Backend>,
}

impl std::fmt::Debug for RecordGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordGateway").finish_non_exhaustive()
    }
}

impl RecordGateway {
    /// Create a gateway over `backend`.
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Read rows from a table.
    ///
    /// An empty filter set matches every row, up to the limit.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if the table name is empty, or
    /// [`GatewayError::Backend`] if the backend call fails.
    pub async fn read(&self, request: ReadRequest) -> Result<Vec<Row>, GatewayError> {
        let table = request.table.clone();
        let query = request.into_query()?;
        tracing::debug!(table = %table, filters = query.filters.len(), "Reading records");

        self.backend.execute(query).await.map_err(|e| {
            tracing::error!("Error reading records from {table}: {e}");
            e.into()
        })
    }

    /// Insert rows into a table in one call.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if the table name or the record
    /// list is empty, or [`GatewayError::Backend`] if the backend rejects the insert.
    pub async fn create(&self, request: CreateRequest) -> Result<Vec<Row>, GatewayError> {
        let table = request.table.clone();
        let query = request.into_query()?;
        tracing::debug!(table = %table, "Creating records");

        self.backend.execute(query).await.map_err(|e| {
            tracing::error!("Error creating records in {table}: {e}");
            e.into()
        })
    }

    /// Update every row matching all filters.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if the table name, the updates or
    /// the filters are empty, or [`GatewayError::Backend`] if the backend call fails.
    pub async fn update(&self, request: UpdateRequest) -> Result<Vec<Row>, GatewayError> {
        let table = request.table.clone();
        let query = request.into_query()?;
        tracing::debug!(table = %table, filters = query.filters.len(), "Updating records");

        self.backend.execute(query).await.map_err(|e| {
            tracing::error!("Error updating records in {table}: {e}");
            e.into()
        })
    }

    /// Delete every row matching all filters.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if the table name or the filters
    /// are empty, or [`GatewayError::Backend`] if the backend call fails.
    pub async fn delete(&self, request: DeleteRequest) -> Result<DeleteOutcome, GatewayError> {
        let table = request.table.clone();
        let query = request.into_query()?;
        tracing::debug!(table = %table, filters = query.filters.len(), "Deleting records");

        match self.backend.execute(query).await {
            Ok(rows) => Ok(DeleteOutcome::from(rows)),
            Err(e) => {
                tracing::error!("Error deleting records from {table}: {e}");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::backend::{Action, MemoryBackend, OrderBy, OrderDirection, Query};
    use crate::error::BackendError;
    use crate::test_utils::{mock_backend_error, mock_backend_returning, row};
    use crate::traits::{FilterSet, MockBackend, Scalar, ValueMap};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Mutex;

    fn gateway(mock: MockBackend) -> RecordGateway {
        RecordGateway::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn test_read_builds_single_query() {
        let captured = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&captured);

        let mut mock = MockBackend::new();
        mock.expect_execute()
            .times(1)
            .withf(move |q: &Query| {
                *sink.lock().unwrap() = Some(q.clone());
                true
            })
            .returning(|_| Ok(vec![row(json!({"id": 1, "name": "Laptop"}))]));

        let request = ReadRequest::new("products")
            .with_columns(["id", "name"])
            .with_filters(FilterSet::new().with("category", "electronics"))
            .with_limit(10)
            .with_order("price", OrderDirection::parse("desc"));
        let rows = gateway(mock).read(request).await.unwrap();
        assert_eq!(rows.len(), 1);

        let query = captured.lock().unwrap().take().unwrap();
        assert_eq!(query.table, "products");
        assert_eq!(query.action, Action::Select);
        assert_eq!(query.columns, vec!["id", "name"]);
        assert_eq!(
            query.filters.get("category"),
            Some(&Scalar::from("electronics"))
        );
        assert_eq!(query.limit, Some(10));
        assert_eq!(
            query.order,
            Some(OrderBy {
                column: "price".into(),
                direction: OrderDirection::Desc,
            })
        );
    }

    #[tokio::test]
    async fn test_read_without_filters_returns_everything() {
        let mock = mock_backend_returning(vec![json!({"id": 1}), json!({"id": 2})]);

        let rows = gateway(mock).read(ReadRequest::new("users")).await.unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn test_validation_never_reaches_backend() {
        let mut mock = MockBackend::new();
        mock.expect_execute().times(0);
        let gateway = gateway(mock);

        let err = gateway
            .update(UpdateRequest::new(
                "users",
                ValueMap::new().with("active", false),
                FilterSet::new(),
            ))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "validation");

        let err = gateway
            .delete(DeleteRequest::new("users", FilterSet::new()))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "validation");

        let err = gateway
            .create(CreateRequest::new("users", vec![]))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "validation");

        let err = gateway.read(ReadRequest::new("")).await.unwrap_err();
        assert_eq!(err.kind(), "validation");
    }

    #[tokio::test]
    async fn test_update_single_call_with_arguments() {
        let mut mock = MockBackend::new();
        mock.expect_execute()
            .times(1)
            .withf(|q: &Query| {
                let Action::Update(values) = &q.action else {
                    return false;
                };
                q.table == "products"
                    && values.get("price") == Some(&Scalar::from(24.99))
                    && values.get("on_sale") == Some(&Scalar::Bool(true))
                    && q.filters.get("id") == Some(&Scalar::from(123))
            })
            .returning(|_| Ok(vec![row(json!({"id": 123, "price": 24.99, "on_sale": true}))]));

        let rows = gateway(mock)
            .update(UpdateRequest::new(
                "products",
                ValueMap::new().with("price", 24.99).with("on_sale", true),
                FilterSet::new().with("id", 123),
            ))
            .await
            .unwrap();
        assert_eq!(rows[0]["on_sale"], json!(true));
    }

    #[tokio::test]
    async fn test_delete_permission_error_passes_through() {
        let mock = mock_backend_error(
            BackendError::new("permission denied for table comments")
                .with_code("42501")
                .with_status(403),
        );

        let err = gateway(mock)
            .delete(DeleteRequest::new(
                "comments",
                FilterSet::new().with("id", 456),
            ))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "backend");
        assert_eq!(err.code(), Some("42501"));
        assert_eq!(err.to_string(), "permission denied for table comments");
    }

    #[tokio::test]
    async fn test_create_returns_backend_rows() {
        let mut mock = MockBackend::new();
        mock.expect_execute()
            .times(1)
            .withf(|q: &Query| matches!(&q.action, Action::Insert(records) if records.len() == 2))
            .returning(|q| match q.action {
                Action::Insert(records) => Ok(records),
                _ => Ok(vec![]),
            });

        let rows = gateway(mock)
            .create(CreateRequest::new(
                "users",
                vec![row(json!({"name": "A"})), row(json!({"name": "B"}))],
            ))
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn test_memory_round_trip() {
        let backend = Arc::new(MemoryBackend::new());
        let gateway = RecordGateway::new(backend.clone());

        let created = gateway
            .create(CreateRequest::new(
                "users",
                vec![row(json!({"name": "John Doe", "email": "john@example.com"}))],
            ))
            .await
            .unwrap();
        let id = created[0]["id"].as_i64().unwrap();

        let rows = gateway
            .read(ReadRequest::new("users").with_filters(FilterSet::new().with("id", id)))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], json!("John Doe"));
        assert_eq!(rows[0]["email"], json!("john@example.com"));
        assert_eq!(backend.queries().len(), 2);
    }

    #[tokio::test]
    async fn test_memory_update_touches_only_matching_row() {
        let backend = Arc::new(MemoryBackend::new());
        backend.seed(
            "products",
            vec![
                json!({"id": 123, "price": 30.0, "on_sale": false}),
                json!({"id": 124, "price": 40.0, "on_sale": false}),
            ],
        );
        let gateway = RecordGateway::new(backend.clone());

        gateway
            .update(UpdateRequest::new(
                "products",
                ValueMap::new().with("price", 24.99).with("on_sale", true),
                FilterSet::new().with("id", 123),
            ))
            .await
            .unwrap();

        let table = backend.rows("products");
        assert_eq!(table[0]["price"], json!(24.99));
        assert_eq!(table[1]["price"], json!(40.0));
        assert_eq!(table[1]["on_sale"], json!(false));
    }

    #[tokio::test]
    async fn test_memory_delete_failure_not_retried() {
        let backend = Arc::new(MemoryBackend::new());
        backend.seed("comments", vec![json!({"id": 456})]);
        backend.fail_next(BackendError::new("permission denied for table comments"));
        let gateway = RecordGateway::new(backend.clone());

        let err = gateway
            .delete(DeleteRequest::new(
                "comments",
                FilterSet::new().with("id", 456),
            ))
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::Backend(_)));
        assert_eq!(backend.queries().len(), 1);
        assert_eq!(backend.rows("comments").len(), 1);
    }

    #[tokio::test]
    async fn test_memory_delete_reports_count() {
        let backend = Arc::new(MemoryBackend::new());
        backend.seed(
            "sessions",
            vec![
                json!({"id": 1, "user_id": 7}),
                json!({"id": 2, "user_id": 7}),
                json!({"id": 3, "user_id": 8}),
            ],
        );
        let gateway = RecordGateway::new(backend.clone());

        let outcome = gateway
            .delete(DeleteRequest::new(
                "sessions",
                FilterSet::new().with("user_id", 7),
            ))
            .await
            .unwrap();
        assert_eq!(outcome.count, 2);
        assert_eq!(backend.rows("sessions").len(), 1);
    }

    #[test]
    fn test_filters_keep_insertion_order() {
        let query = ReadRequest::new("t")
            .with_filters(FilterSet::new().with("b", 1).with("a", 2))
            .into_query()
            .unwrap();
        let columns: Vec<&str> = query.filters.iter().map(|(c, _)| c).collect();
        assert_eq!(columns, vec!["b", "a"]);
    }
}
