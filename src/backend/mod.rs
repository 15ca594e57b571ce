//! Supabase backend access.
//!
//! This module provides:
//! - [`Query`]: one backend call, built clause by clause
//! - [`PostgrestClient`]: the HTTP implementation of [`crate::traits::Backend`]
//! - [`MemoryBackend`]: an in-memory implementation for tests
//!
//! # Architecture
//!
//! The client uses `reqwest` and speaks the PostgREST dialect Supabase exposes
//! under `/rest/v1`:
//! - `GET` for reads, `POST` for inserts, `PATCH` for updates, `DELETE` for deletes
//! - equality filters as `column=eq.value`
//! - mutations request `Prefer: return=representation` so rows come back
//!
//! # Example
//!
//! ```
//! use supabase_mcp::backend::{ClientConfig, PostgrestClient};
//!
//! let config = ClientConfig::new("https://xyz.supabase.co").with_schema("public");
//! let client = PostgrestClient::new("service-role-key", config).unwrap();
//! assert_eq!(client.config().rest_url(), "https://xyz.supabase.co/rest/v1");
//! ```

mod client;
mod config;
mod memory;
mod query;

pub use client::PostgrestClient;
pub use config::{ClientConfig, DEFAULT_SCHEMA, REST_PATH};
pub use memory::MemoryBackend;
pub use query::{Action, OrderBy, OrderDirection, Query};
