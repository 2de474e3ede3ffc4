//! `GET /health`: liveness plus the state of the service's two dependencies.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseStatus {
    Up,
    Down,
}

/// Where place external ids are checked. Not probed; a lookup per health
/// check would put load on a third-party API.
#[derive(Debug, Serialize)]
pub struct CatalogInfo {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    /// `ok` when the database answers, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub database: DatabaseStatus,
    pub artwork_catalog: CatalogInfo,
}

async fn report(State(state): State<AppState>) -> Json<HealthReport> {
    let database = match planner_db::health_check(&state.pool).await {
        Ok(()) => DatabaseStatus::Up,
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            DatabaseStatus::Down
        }
    };

    Json(HealthReport {
        status: if database == DatabaseStatus::Up { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database,
        artwork_catalog: CatalogInfo {
            base_url: state.config.artwork_api_url.clone(),
            timeout_secs: state.config.artwork_api_timeout_secs,
        },
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(report))
}
