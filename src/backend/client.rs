//! Supabase REST (PostgREST) client.
//!
//! This module provides:
//! - HTTP client for table queries and RPC calls
//! - Query-to-request translation (method, path, parameters, headers, body)
//! - Error body parsing into [`BackendError`]
//!
//! One [`Query`] is always exactly one HTTP request. There is no retry.

#![allow(clippy::missing_errors_doc)]

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde_json::Value;

use super::config::ClientConfig;
use super::query::{Action, Query};
use crate::config::SecretString;
use crate::error::BackendError;
use crate::traits::{Backend, Row};

/// Supabase REST API client.
#[derive(Debug)]
pub struct PostgrestClient {
    client: Client,
    api_key: SecretString,
    config: ClientConfig,
}

impl PostgrestClient {
    /// Create a new client.
    pub fn new(
        api_key: impl Into<SecretString>,
        config: ClientConfig,
    ) -> Result<Self, BackendError> {
        let mut builder = Client::builder();
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder
            .build()
            .map_err(|e| BackendError::new(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            config,
        })
    }

    /// Get the project URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Get the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn endpoint(&self, segments: &[&str], pairs: &[(String, String)]) -> Result<Url, BackendError> {
        let mut url = Url::parse(&self.config.rest_url())
            .map_err(|e| BackendError::new(format!("Invalid Supabase URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| BackendError::new("Invalid Supabase URL: cannot be a base"))?
            .extend(segments);
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    fn authorized(&self, method: Method, url: Url) -> RequestBuilder {
        let key = self.api_key.expose();
        self.client
            .request(method, url)
            .header("apikey", key)
            .bearer_auth(key)
    }

    async fn send(&self, request: RequestBuilder, url: &Url) -> Result<Response, BackendError> {
        let start = Instant::now();
        let response = request.send().await.map_err(|e| {
            let elapsed_ms = elapsed_ms(start);
            if e.is_timeout() {
                tracing::error!(url = %url, elapsed_ms, "Supabase request timed out");
                BackendError::new(format!(
                    "Request timeout after {}ms",
                    self.config.timeout_ms.unwrap_or_default()
                ))
            } else {
                tracing::error!(url = %url, elapsed_ms, error = %e, "Supabase request failed");
                BackendError::new(e.to_string())
            }
        })?;

        tracing::debug!(
            url = %url,
            status = %response.status(),
            elapsed_ms = elapsed_ms(start),
            "Supabase response received"
        );
        Ok(response)
    }

    /// Read the body, turning non-2xx statuses into [`BackendError`].
    async fn read_body(response: Response) -> Result<String, BackendError> {
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            BackendError::new(format!("Failed to read response: {e}")).with_status(status.as_u16())
        })?;

        if status.is_success() {
            return Ok(body);
        }

        Err(serde_json::from_str::<BackendError>(&body)
            .unwrap_or_else(|_| BackendError::new(format!("Status {status}: {body}")))
            .with_status(status.as_u16()))
    }

    async fn execute_query(&self, query: &Query) -> Result<Vec<Row>, BackendError> {
        let url = self.endpoint(&[query.table.as_str()], &query.query_pairs())?;
        let method = match query.action {
            Action::Select => Method::GET,
            Action::Insert(_) => Method::POST,
            Action::Update(_) => Method::PATCH,
            Action::Delete => Method::DELETE,
        };

        tracing::debug!(
            url = %url,
            method = %method,
            table = %query.table,
            action = query.action.name(),
            "Starting Supabase query"
        );

        let mut request = self.authorized(method, url.clone());
        request = if query.is_mutation() {
            request
                .header("Content-Profile", &self.config.schema)
                .header("Prefer", "return=representation")
        } else {
            request.header("Accept-Profile", &self.config.schema)
        };
        if let Some(body) = query.body() {
            request = request.json(&body);
        }

        let response = self.send(request, &url).await?;
        let status = response.status().as_u16();
        let body = Self::read_body(response).await?;

        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&body).map_err(|e| {
            BackendError::new(format!("Failed to parse response: {e}")).with_status(status)
        })
    }

    async fn call_rpc(&self, function: &str, args: &Value) -> Result<Value, BackendError> {
        let url = self.endpoint(&["rpc", function], &[])?;
        tracing::debug!(url = %url, function, "Starting Supabase RPC call");

        let request = self
            .authorized(Method::POST, url.clone())
            .header("Content-Profile", &self.config.schema)
            .json(args);

        let response = self.send(request, &url).await?;
        let status = response.status().as_u16();
        let body = Self::read_body(response).await?;

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| {
            BackendError::new(format!("Failed to parse response: {e}")).with_status(status)
        })
    }
}

#[allow(clippy::cast_possible_truncation)]
fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

#[async_trait]
impl Backend for PostgrestClient {
    async fn execute(&self, query: Query) -> Result<Vec<Row>, BackendError> {
        self.execute_query(&query).await
    }

    async fn rpc(&self, function: &str, args: Value) -> Result<Value, BackendError> {
        self.call_rpc(function, &args).await
    }
}
