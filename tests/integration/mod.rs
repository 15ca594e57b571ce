//! Integration tests for the Supabase MCP Server.
//!
//! These tests run the gateway against the in-memory backend and verify:
//! - Record lifecycle workflows
//! - Error recovery paths

mod error_recovery;
mod record_lifecycle;
