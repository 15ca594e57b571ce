//! Server types and shared state.

use std::sync::Arc;

use crate::config::Config;
use crate::gateway::RecordGateway;
use crate::traits::Backend;

/// Shared application state for all tool handlers.
///
/// Built once at startup and shared read-only across calls.
#[derive(Clone)]
pub struct AppState {
    /// Record operation gateway over the configured backend.
    pub gateway: Arc<RecordGateway>,
    /// Server configuration.
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates a new application state.
    ///
    /// # Arguments
    ///
    /// * `backend` - The backend every tool call goes through
    /// * `config` - Server configuration
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>, config: Config) -> Self {
        Self {
            gateway: Arc::new(RecordGateway::new(backend)),
            config: Arc::new(config),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
