//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the database pool and the parsed server config; both are cheap
//! to clone.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool, config: ServerConfig) -> Self {
        Self { pool, config: Arc::new(config) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
