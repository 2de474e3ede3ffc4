//! Handlers for places nested under `/projects/{project_id}/places`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use planner_core::error::CoreError;
use planner_core::travel::{ensure_capacity, ensure_not_attached};
use planner_core::types::DbId;
use planner_db::models::place::{CreatePlace, Place, UpdatePlace};
use planner_db::repositories::{PlaceRepo, ProjectRepo};
use sqlx::PgConnection;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::{project_not_found, require_artwork};
use crate::state::AppState;

/// Check that `external_id` can still be attached to the project.
async fn ensure_room_for(
    conn: &mut PgConnection,
    project_id: DbId,
    external_id: i64,
) -> AppResult<()> {
    let attached = PlaceRepo::external_ids(&mut *conn, project_id).await?;
    ensure_capacity(attached.len(), 1)?;
    ensure_not_attached(&attached, external_id)?;
    Ok(())
}

fn place_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Place", id })
}

/// POST /projects/{project_id}/places
///
/// Capacity and duplicates are checked once before the catalog call and
/// again under the project row lock, so concurrent additions cannot push a
/// project past its limit.
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    AppJson(input): AppJson<CreatePlace>,
) -> AppResult<(StatusCode, Json<Place>)> {
    input.validate()?;

    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or_else(|| project_not_found(project_id))?;
    {
        let mut conn = state.pool.acquire().await?;
        ensure_room_for(&mut conn, project_id, input.external_id).await?;
    }

    let artwork = require_artwork(state.catalog.as_ref(), input.external_id).await?;

    let mut tx = state.pool.begin().await?;
    ProjectRepo::lock_by_id(&mut tx, project_id)
        .await?
        .ok_or_else(|| project_not_found(project_id))?;
    ensure_room_for(&mut tx, project_id, input.external_id).await?;

    let place = PlaceRepo::create(&mut tx, project_id, &input, artwork.title.as_deref()).await?;
    let completed = ProjectRepo::refresh_completion(&mut tx, project_id).await?;
    tx.commit().await?;

    tracing::info!(
        project_id,
        place_id = place.id,
        external_id = place.external_id,
        project_completed = completed,
        "Place added"
    );

    Ok((StatusCode::CREATED, Json(place)))
}

/// GET /projects/{project_id}/places
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Place>>> {
    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or_else(|| project_not_found(project_id))?;
    let places = PlaceRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(places))
}

/// GET /projects/{project_id}/places/{place_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((project_id, place_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Place>> {
    let place = PlaceRepo::find_in_project(&state.pool, project_id, place_id)
        .await?
        .ok_or_else(|| place_not_found(place_id))?;
    Ok(Json(place))
}

/// PUT|PATCH /projects/{project_id}/places/{place_id}
///
/// The parent's completion flag is recomputed after every update.
pub async fn update(
    State(state): State<AppState>,
    Path((project_id, place_id)): Path<(DbId, DbId)>,
    AppJson(input): AppJson<UpdatePlace>,
) -> AppResult<Json<Place>> {
    let mut tx = state.pool.begin().await?;
    ProjectRepo::lock_by_id(&mut tx, project_id)
        .await?
        .ok_or_else(|| project_not_found(project_id))?;

    let place = PlaceRepo::update(&mut tx, project_id, place_id, &input)
        .await?
        .ok_or_else(|| place_not_found(place_id))?;
    let completed = ProjectRepo::refresh_completion(&mut tx, project_id).await?;
    tx.commit().await?;

    tracing::info!(
        project_id,
        place_id,
        visited = place.visited,
        project_completed = completed,
        "Place updated"
    );

    Ok(Json(place))
}
