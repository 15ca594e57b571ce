//! Supabase MCP Server
//!
//! A Rust MCP server that lets a language-model client read, create, update
//! and delete rows in a Supabase database through its PostgREST API.
//!
//! # Features
//!
//! - 4 record tools: `read_records`, `create_records`, `update_records`, `delete_records`
//! - Equality filters, projection, ordering and limits mapped onto one REST call
//! - Unscoped updates and deletes are rejected before reaching the database
//! - Backend errors are passed through with their original message and code
//!
//! # Quick Start
//!
//! ```bash
//! SUPABASE_URL=https://xyz.supabase.co SUPABASE_SERVICE_ROLE_KEY=eyJ... ./supabase-mcp
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     stdin      ┌─────────────────┐    HTTPS    ┌───────────┐
//! │  MCP client │───────────────▶│   MCP Server    │────────────▶│ Supabase  │
//! │             │◀───────────────│     (Rust)      │◀────────────│ PostgREST │
//! └─────────────┘     stdout     └─────────────────┘             └───────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod config;
pub mod error;
pub mod gateway;
pub mod server;
pub mod traits;

#[cfg(test)]
mod test_utils;
