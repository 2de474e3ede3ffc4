//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use planner_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use planner_core::travel::{ensure_capacity, ensure_deletable, ensure_unique_external_ids};
use planner_core::types::DbId;
use planner_db::models::project::{CreateProject, ProjectWithPlaces, UpdateProject};
use planner_db::repositories::{PlaceRepo, ProjectRepo};
use validator::Validate;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::handlers::{project_not_found, require_artwork};
use crate::query::PaginationParams;
use crate::state::AppState;

/// POST /projects
///
/// Every place in the payload is checked against the catalog before the
/// transaction opens; the project and its places are then written together.
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateProject>,
) -> AppResult<(StatusCode, Json<ProjectWithPlaces>)> {
    input.validate()?;
    ensure_capacity(0, input.places.len())?;

    let external_ids: Vec<i64> = input.places.iter().map(|p| p.external_id).collect();
    ensure_unique_external_ids(&external_ids)?;

    let mut titles = Vec::with_capacity(external_ids.len());
    for &external_id in &external_ids {
        let artwork = require_artwork(state.catalog.as_ref(), external_id).await?;
        titles.push(artwork.title);
    }

    let mut tx = state.pool.begin().await?;
    let mut project = ProjectRepo::create(&mut tx, &input).await?;
    let mut places = Vec::with_capacity(input.places.len());
    for (place, title) in input.places.iter().zip(&titles) {
        places.push(PlaceRepo::create(&mut tx, project.id, place, title.as_deref()).await?);
    }
    project.is_completed = ProjectRepo::refresh_completion(&mut tx, project.id).await?;
    tx.commit().await?;

    // Newest first, matching the list endpoints.
    places.reverse();

    tracing::info!(
        project_id = project.id,
        place_count = places.len(),
        "Project created"
    );

    Ok((StatusCode::CREATED, Json(ProjectWithPlaces { project, places })))
}

/// GET /projects?limit=&offset=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<ProjectWithPlaces>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let projects = ProjectRepo::list_with_places(&state.pool, limit, offset).await?;
    Ok(Json(projects))
}

/// GET /projects/{project_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectWithPlaces>> {
    let project = ProjectRepo::find_with_places(&state.pool, id)
        .await?
        .ok_or_else(|| project_not_found(id))?;
    Ok(Json(project))
}

/// PUT|PATCH /projects/{project_id}
///
/// Places are managed through the nested `/places` endpoints.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateProject>,
) -> AppResult<Json<ProjectWithPlaces>> {
    input.validate()?;

    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| project_not_found(id))?;
    let places = PlaceRepo::list_by_project(&state.pool, id).await?;

    tracing::info!(project_id = id, "Project updated");

    Ok(Json(ProjectWithPlaces { project, places }))
}

/// DELETE /projects/{project_id}
///
/// Refused while any place is visited; otherwise removes the project and
/// all of its places.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let mut tx = state.pool.begin().await?;

    ProjectRepo::lock_by_id(&mut tx, id)
        .await?
        .ok_or_else(|| project_not_found(id))?;

    let visited = PlaceRepo::visited_flags(&mut tx, id).await?;
    ensure_deletable(visited)?;

    ProjectRepo::delete_cascade(&mut tx, id).await?;
    tx.commit().await?;

    tracing::info!(project_id = id, "Project deleted");

    Ok(StatusCode::NO_CONTENT)
}
