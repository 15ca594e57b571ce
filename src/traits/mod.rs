//! Trait definitions for mockable dependencies.
//!
//! This module defines:
//! - [`Backend`]: the remote relational-data API abstraction
//!
//! It also re-exports shared value types from the `types` submodule.
//!
//! # Mocking
//!
//! [`Backend`] is annotated with `#[cfg_attr(test, mockall::automock)]`,
//! which generates `MockBackend` for unit tests. Integration tests and
//! doctests use [`crate::backend::MemoryBackend`] instead.
//!
//! # Example
//!
//! ```
//! use supabase_mcp::backend::{MemoryBackend, Query};
//! use supabase_mcp::traits::Backend;
//!
//! let backend = MemoryBackend::new();
//! backend.seed("users", vec![serde_json::json!({"id": 1, "name": "Ada"})]);
//!
//! let rows = tokio_block_on(backend.execute(Query::select("users"))).unwrap();
//! assert_eq!(rows.len(), 1);
//! # fn tokio_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

mod types;

pub use types::{ColumnMap, FilterSet, Row, Scalar, ValueMap};

use async_trait::async_trait;
use serde_json::Value;

use crate::backend::Query;
use crate::error::BackendError;

/// Remote relational-data API.
///
/// One call to [`Backend::execute`] is one backend round trip. Implementations
/// must not retry, paginate or filter client-side.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Backend: Send + Sync {
    /// Execute a single table query and return the affected or selected rows.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] if the backend rejects the query or the
    /// transport fails.
    async fn execute(&self, query: Query) -> Result<Vec<Row>, BackendError>;

    /// Call a stored procedure (PostgREST RPC) with JSON arguments.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] if the call fails.
    async fn rpc(&self, function: &str, args: Value) -> Result<Value, BackendError>;
}
