//! Test utilities and mock factories.
//!
//! This module provides shared testing infrastructure:
//! - Mock backends with canned responses
//! - Test fixtures and factories
//! - Common test helpers
//!
//! Only compiled for tests (`#[cfg(test)]`).

#![allow(clippy::unwrap_used, clippy::expect_used)]

use rmcp::model::CallToolResult;
use serde_json::Value;

use crate::config::{Config, SecretString, DEFAULT_SCHEMA};
use crate::error::BackendError;
use crate::traits::{MockBackend, Row};

/// Service-role key used by [`test_config`].
pub const TEST_KEY: &str = "test-service-role-key";

/// A valid configuration pointing at a fake project.
#[must_use]
pub fn test_config() -> Config {
    Config {
        supabase_url: "https://test-project.supabase.co".to_string(),
        service_role_key: SecretString::new(TEST_KEY),
        schema: DEFAULT_SCHEMA.to_string(),
        log_level: "info".to_string(),
        request_timeout_ms: None,
    }
}

/// Build a row from a JSON object literal.
///
/// # Panics
///
/// Panics if `value` is not a JSON object.
#[must_use]
pub fn row(value: Value) -> Row {
    serde_json::from_value(value).expect("row fixture must be a JSON object")
}

/// A mock backend whose single `execute` call returns `rows`.
#[must_use]
pub fn mock_backend_returning(rows: Vec<Value>) -> MockBackend {
    let rows: Vec<Row> = rows.into_iter().map(row).collect();
    let mut mock = MockBackend::new();
    mock.expect_execute()
        .times(1)
        .returning(move |_| Ok(rows.clone()));
    mock
}

/// A mock backend whose single `execute` call fails with `error`.
#[must_use]
pub fn mock_backend_error(error: BackendError) -> MockBackend {
    let mut mock = MockBackend::new();
    mock.expect_execute()
        .times(1)
        .returning(move |_| Err(error.clone()));
    mock
}

/// Parse the JSON envelope carried by a tool result.
///
/// # Panics
///
/// Panics if the first content item is not JSON text.
#[must_use]
pub fn result_json(result: &CallToolResult) -> Value {
    let text = result
        .content
        .first()
        .and_then(|c| c.as_text())
        .map(|t| t.text.clone())
        .expect("tool result should carry text content");
    serde_json::from_str(&text).expect("tool result text should be JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Query;
    use crate::traits::Backend;
    use serde_json::json;

    #[test]
    fn test_config_fixture_is_valid() {
        crate::config::validate_config(&test_config()).unwrap();
    }

    #[tokio::test]
    async fn test_mock_backend_returning() {
        let mock = mock_backend_returning(vec![json!({"id": 1})]);
        let rows = mock.execute(Query::select("users")).await.unwrap();
        assert_eq!(rows, vec![row(json!({"id": 1}))]);
    }

    #[tokio::test]
    async fn test_mock_backend_error() {
        let mock = mock_backend_error(BackendError::new("boom").with_code("XX000"));
        let err = mock.execute(Query::select("users")).await.unwrap_err();
        assert_eq!(err.code.as_deref(), Some("XX000"));
    }
}
