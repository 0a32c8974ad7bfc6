//! Application state for the dashboard service.

use std::sync::Arc;

use common::config::AppConfig;

use crate::gateway::QueryGateway;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub gateway: Arc<QueryGateway>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: AppConfig) -> Self {
        Self {
            gateway: Arc::new(QueryGateway::new(config.clone())),
            config,
        }
    }
}
