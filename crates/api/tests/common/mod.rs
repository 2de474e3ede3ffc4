#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use planner_api::config::ServerConfig;
use planner_api::logging::LogFormat;
use planner_api::router::build_app_router;
use planner_api::state::AppState;
use planner_catalog::{Artwork, ArtworkCatalog};

/// Catalog ids the stub recognizes, with their titles.
pub const KNOWN_ARTWORKS: &[(i64, &str)] = &[
    (27992, "A Sunday on La Grande Jatte"),
    (28560, "The Bedroom"),
    (111628, "Nighthawks"),
    (6565, "American Gothic"),
    (16568, "Water Lilies"),
    (14598, "The Child's Bath"),
    (20684, "Paris Street; Rainy Day"),
    (80607, "Sky above Clouds IV"),
    (64818, "Stacks of Wheat"),
    (87479, "The Old Guitarist"),
    (16571, "Arrival of the Normandy Train"),
];

/// An in-memory artwork catalog that counts lookups.
#[derive(Default)]
pub struct StubCatalog {
    artworks: HashMap<i64, String>,
    lookups: AtomicUsize,
}

impl StubCatalog {
    pub fn with_known_artworks() -> Self {
        Self {
            artworks: KNOWN_ARTWORKS
                .iter()
                .map(|(id, title)| (*id, title.to_string()))
                .collect(),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArtworkCatalog for StubCatalog {
    async fn lookup(&self, external_id: i64) -> Option<Artwork> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.artworks.get(&external_id).map(|title| Artwork {
            id: external_id,
            title: Some(title.clone()),
        })
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: String::new(),
        db_max_connections: 5,
        artwork_api_url: "http://catalog.invalid".to_string(),
        artwork_api_timeout_secs: 1,
        log_format: LogFormat::Pretty,
    }
}

/// Build the full application router using the given pool and catalog.
pub fn build_test_app_with_catalog(pool: PgPool, catalog: Arc<StubCatalog>) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(test_config()),
        catalog,
    };
    build_app_router(state)
}

/// Build the full application router backed by [`StubCatalog::with_known_artworks`].
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_catalog(pool, Arc::new(StubCatalog::with_known_artworks()))
}

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a project through the API and return its id.
pub async fn create_project(pool: &PgPool, body: serde_json::Value) -> i64 {
    let response = post_json(build_test_app(pool.clone()), "/projects", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}
