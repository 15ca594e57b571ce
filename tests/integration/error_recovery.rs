//! Error recovery and edge case tests.
//!
//! Every failure is reported to the caller and leaves the gateway usable.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use serde_json::json;
use supabase_mcp::backend::MemoryBackend;
use supabase_mcp::error::{BackendError, GatewayError};
use supabase_mcp::gateway::{
    CreateRequest, DeleteRequest, ReadRequest, RecordGateway, UpdateRequest,
};
use supabase_mcp::traits::{FilterSet, ValueMap};

#[tokio::test]
async fn test_backend_failure_then_recovery() {
    let backend = Arc::new(MemoryBackend::new());
    backend.seed("comments", vec![json!({"id": 456, "body": "hi"})]);
    let gateway = RecordGateway::new(backend.clone());

    backend.fail_next(
        BackendError::new("permission denied for table comments").with_code("42501"),
    );
    let err = gateway
        .delete(DeleteRequest::new(
            "comments",
            FilterSet::new().with("id", 456),
        ))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "permission denied for table comments");
    assert_eq!(err.code(), Some("42501"));
    // No retry
    assert_eq!(backend.queries().len(), 1);

    let outcome = gateway
        .delete(DeleteRequest::new(
            "comments",
            FilterSet::new().with("id", 456),
        ))
        .await
        .unwrap();
    assert_eq!(outcome.count, 1);
}

#[tokio::test]
async fn test_missing_table_is_backend_error() {
    let gateway = RecordGateway::new(Arc::new(MemoryBackend::new()));

    let err = gateway
        .read(ReadRequest::new("nonexistent"))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Backend(_)));
    assert_eq!(err.code(), Some("42P01"));
}

#[tokio::test]
async fn test_unscoped_mutations_never_reach_backend() {
    let backend = Arc::new(MemoryBackend::new());
    backend.seed("users", vec![json!({"id": 1}), json!({"id": 2})]);
    let gateway = RecordGateway::new(backend.clone());

    let err = gateway
        .update(UpdateRequest::new(
            "users",
            ValueMap::new().with("active", false),
            FilterSet::new(),
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Validation { ref field, .. } if field == "filters"));

    let err = gateway
        .delete(DeleteRequest::new("users", FilterSet::new()))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Validation { ref field, .. } if field == "filters"));

    let err = gateway
        .create(CreateRequest::new("users", vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Validation { ref field, .. } if field == "records"));

    assert!(backend.queries().is_empty());
    assert_eq!(backend.rows("users").len(), 2);
}

#[tokio::test]
async fn test_negative_limit_passed_through() {
    let backend = Arc::new(MemoryBackend::new());
    backend.seed("users", vec![json!({"id": 1})]);
    let gateway = RecordGateway::new(backend.clone());

    // Not validated locally; the backend decides
    let err = gateway
        .read(ReadRequest::new("users").with_limit(-1))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Backend(_)));
    assert_eq!(backend.queries()[0].limit, Some(-1));
}

#[tokio::test]
async fn test_introspection_errors_propagate() {
    let backend = Arc::new(MemoryBackend::new());
    let gateway = RecordGateway::new(backend.clone());

    backend.fail_next(BackendError::new("function not found").with_code("PGRST202"));
    let err = gateway.table_exists("users").await.unwrap_err();
    assert_eq!(err.code(), Some("PGRST202"));

    assert!(!gateway.table_exists("users").await.unwrap());
}
