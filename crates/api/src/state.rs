use std::sync::Arc;

use planner_catalog::ArtworkCatalog;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: planner_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Artwork catalog used to validate place external ids.
    pub catalog: Arc<dyn ArtworkCatalog>,
}
