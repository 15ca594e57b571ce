//! Record lifecycle workflow tests.
//!
//! Create → read → update → delete through the gateway, against the
//! in-memory backend.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use serde_json::{json, Value};
use supabase_mcp::backend::{Action, MemoryBackend, OrderDirection};
use supabase_mcp::gateway::{
    CreateRequest, DeleteRequest, ReadRequest, RecordGateway, UpdateRequest,
};
use supabase_mcp::traits::{FilterSet, Row, ValueMap};

fn row(value: Value) -> Row {
    serde_json::from_value(value).expect("object literal")
}

fn setup() -> (Arc<MemoryBackend>, RecordGateway) {
    let backend = Arc::new(MemoryBackend::new());
    let gateway = RecordGateway::new(backend.clone());
    (backend, gateway)
}

#[tokio::test]
async fn test_full_lifecycle() {
    let (backend, gateway) = setup();

    let created = gateway
        .create(CreateRequest::new(
            "users",
            vec![
                row(json!({"name": "John Doe", "email": "john@example.com", "active": true})),
                row(json!({"name": "Jane Doe", "email": "jane@example.com", "active": true})),
            ],
        ))
        .await
        .unwrap();
    assert_eq!(created.len(), 2);
    let john = created[0]["id"].as_i64().unwrap();

    let rows = gateway
        .read(ReadRequest::new("users").with_filters(FilterSet::new().with("id", john)))
        .await
        .unwrap();
    assert_eq!(rows[0]["email"], json!("john@example.com"));

    let updated = gateway
        .update(UpdateRequest::new(
            "users",
            ValueMap::new().with("active", false),
            FilterSet::new().with("id", john),
        ))
        .await
        .unwrap();
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0]["active"], json!(false));

    let active = gateway
        .read(ReadRequest::new("users").with_filters(FilterSet::new().with("active", true)))
        .await
        .unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["name"], json!("Jane Doe"));

    let outcome = gateway
        .delete(DeleteRequest::new(
            "users",
            FilterSet::new().with("active", false),
        ))
        .await
        .unwrap();
    assert_eq!(outcome.count, 1);
    assert_eq!(backend.rows("users").len(), 1);

    // One backend call per operation
    let actions: Vec<&str> = backend.queries().iter().map(|q| q.action.name()).collect();
    assert_eq!(
        actions,
        vec!["insert", "select", "update", "select", "delete"]
    );
}

#[tokio::test]
async fn test_read_orders_and_limits() {
    let (backend, gateway) = setup();
    backend.seed(
        "products",
        vec![
            json!({"id": 1, "name": "Laptop", "category": "electronics", "price": 999.0}),
            json!({"id": 2, "name": "Desk", "category": "furniture", "price": 250.0}),
            json!({"id": 3, "name": "Phone", "category": "electronics", "price": 599.0}),
            json!({"id": 4, "name": "Tablet", "category": "electronics", "price": 399.0}),
        ],
    );

    let rows = gateway
        .read(
            ReadRequest::new("products")
                .with_columns(["id", "name"])
                .with_filters(FilterSet::new().with("category", "electronics"))
                .with_limit(2)
                .with_order("price", OrderDirection::Asc),
        )
        .await
        .unwrap();

    let names: Vec<&str> = rows.iter().filter_map(|r| r["name"].as_str()).collect();
    assert_eq!(names, vec!["Tablet", "Phone"]);
    assert!(rows.iter().all(|r| r.len() == 2));

    let query = backend.queries().pop().unwrap();
    assert_eq!(query.action, Action::Select);
    assert_eq!(query.limit, Some(2));
}

#[tokio::test]
async fn test_read_without_filters_returns_all_rows() {
    let (backend, gateway) = setup();
    backend.seed(
        "tags",
        (1..=5).map(|id| json!({"id": id})).collect::<Vec<_>>(),
    );

    let rows = gateway.read(ReadRequest::new("tags")).await.unwrap();
    assert_eq!(rows.len(), 5);
}

#[tokio::test]
async fn test_update_leaves_other_rows_untouched() {
    let (backend, gateway) = setup();
    backend.seed(
        "products",
        vec![
            json!({"id": 123, "price": 30.0, "on_sale": false}),
            json!({"id": 124, "price": 30.0, "on_sale": false}),
        ],
    );

    gateway
        .update(UpdateRequest::new(
            "products",
            ValueMap::new().with("price", 24.99).with("on_sale", true),
            FilterSet::new().with("id", 123),
        ))
        .await
        .unwrap();

    let rows = backend.rows("products");
    assert_eq!(rows[0]["on_sale"], json!(true));
    assert_eq!(rows[1], row(json!({"id": 124, "price": 30.0, "on_sale": false})));
}
