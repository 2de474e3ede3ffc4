//! Artwork catalog lookups.
//!
//! Places reference artworks in a remote museum catalog. Before a place is
//! accepted its external id is looked up once; the result is only ever
//! "exists (with a title)" or "does not exist".

use async_trait::async_trait;

pub mod client;

pub use client::{ArticClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

/// Metadata returned for an artwork that exists in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artwork {
    pub id: i64,
    pub title: Option<String>,
}

/// A source of truth for which external artwork ids exist.
///
/// Implementations never fail: anything other than a positive answer is
/// reported as `None`.
#[async_trait]
pub trait ArtworkCatalog: Send + Sync {
    /// Look up an artwork by its catalog id.
    async fn lookup(&self, external_id: i64) -> Option<Artwork>;

    /// Whether the catalog recognizes `external_id`.
    async fn exists(&self, external_id: i64) -> bool {
        self.lookup(external_id).await.is_some()
    }
}
