// Handlers Module
// This module contains the API endpoint handlers

pub mod assets;
pub mod body;
pub mod exports;
pub mod health;
pub mod references;
pub mod reports;
pub mod session;
pub mod users;

use std::sync::Arc;

use crate::config::ApiConfig;
use crate::db::Repositories;

/// Shared state handed to every handler
pub struct AppContext {
    pub repositories: Repositories,
    pub config: ApiConfig,
}

// Type alias for the application state
pub type AppState = Arc<AppContext>;

impl AppContext {
    pub fn new(repositories: Repositories, config: ApiConfig) -> AppState {
        Arc::new(Self {
            repositories,
            config,
        })
    }
}
