pub mod place;
pub mod project;

use planner_catalog::{Artwork, ArtworkCatalog};
use planner_core::error::CoreError;
use planner_core::types::DbId;

use crate::error::AppError;

/// Confirm an external id with the artwork catalog.
///
/// The catalog fails closed, so an unreachable service is reported the same
/// way as an unknown id.
pub(crate) async fn require_artwork(
    catalog: &dyn ArtworkCatalog,
    external_id: i64,
) -> Result<Artwork, CoreError> {
    catalog
        .lookup(external_id)
        .await
        .ok_or(CoreError::ExternalNotFound { external_id })
}

pub(crate) fn project_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    })
}
