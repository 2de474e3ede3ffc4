//! Route definitions for the `/projects` resource.
//!
//! Also nests place routes under `/projects/{project_id}/places`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{place, project};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                       -> list
/// POST   /                                       -> create
/// GET    /{project_id}                           -> get_by_id
/// PUT    /{project_id}                           -> update
/// PATCH  /{project_id}                           -> update
/// DELETE /{project_id}                           -> delete
///
/// GET    /{project_id}/places                    -> list_by_project
/// POST   /{project_id}/places                    -> create
/// GET    /{project_id}/places/{place_id}         -> get_by_id
/// PUT    /{project_id}/places/{place_id}         -> update
/// PATCH  /{project_id}/places/{place_id}         -> update
/// ```
pub fn router() -> Router<AppState> {
    let place_routes = Router::new()
        .route("/", get(place::list_by_project).post(place::create))
        .route(
            "/{place_id}",
            get(place::get_by_id).put(place::update).patch(place::update),
        );

    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{project_id}",
            get(project::get_by_id)
                .put(project::update)
                .patch(project::update)
                .delete(project::delete),
        )
        .nest("/{project_id}/places", place_routes)
}
