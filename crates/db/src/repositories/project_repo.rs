//! Repository for the `projects` table.

use std::collections::HashMap;

use planner_core::travel::is_project_complete;
use planner_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::place::Place;
use crate::models::project::{CreateProject, Project, ProjectWithPlaces, UpdateProject};
use crate::repositories::PlaceRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, description, start_date, is_completed, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project row, returning it. Places in `input` are not
    /// touched here; the caller inserts them in the same transaction.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (name, description, start_date)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.start_date)
            .fetch_one(&mut *conn)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project and hold a row lock on it until the transaction ends.
    ///
    /// Concurrent place additions and deletes for the same project serialize
    /// on this lock.
    pub async fn lock_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// List projects newest first, one page at a time.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             ORDER BY created_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Find a project together with its places (newest first).
    pub async fn find_with_places(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProjectWithPlaces>, sqlx::Error> {
        let Some(project) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let places = PlaceRepo::list_by_project(pool, id).await?;
        Ok(Some(ProjectWithPlaces { project, places }))
    }

    /// List one page of projects, each with its places.
    ///
    /// Places for the whole page are loaded with a single query.
    pub async fn list_with_places(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProjectWithPlaces>, sqlx::Error> {
        let projects = Self::list(pool, limit, offset).await?;
        let ids: Vec<DbId> = projects.iter().map(|p| p.id).collect();
        let places = PlaceRepo::list_by_projects(pool, &ids).await?;
        Ok(attach_places(projects, places))
    }

    /// Update a project. Only fields present in `input` are applied.
    ///
    /// `description` and `start_date` use `Option<Option<_>>` so an explicit
    /// `null` clears the column. Returns `None` if no row with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let description_provided = input.description.is_some();
        let description_value = input.description.as_ref().and_then(|v| v.as_deref());
        let start_date_provided = input.start_date.is_some();
        let start_date_value = input.start_date.flatten();

        let query = format!(
            "UPDATE projects SET
                name        = COALESCE($2, name),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                start_date  = CASE WHEN $5 THEN $6 ELSE start_date END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(description_provided)
            .bind(description_value)
            .bind(start_date_provided)
            .bind(start_date_value)
            .fetch_optional(pool)
            .await
    }

    /// Recompute `is_completed` from the project's current places and store it.
    ///
    /// Returns the stored value.
    pub async fn refresh_completion(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let visited = PlaceRepo::visited_flags(&mut *conn, id).await?;
        let completed = is_project_complete(visited);

        sqlx::query("UPDATE projects SET is_completed = $2 WHERE id = $1 AND is_completed <> $2")
            .bind(id)
            .bind(completed)
            .execute(&mut *conn)
            .await?;
        Ok(completed)
    }

    /// Delete a project and every place it owns. Returns `true` if the project
    /// row was removed.
    ///
    /// Places are removed explicitly before the project so the cascade does
    /// not depend on the foreign key's `ON DELETE CASCADE` alone. Run inside a
    /// transaction.
    pub async fn delete_cascade(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let removed_places = PlaceRepo::delete_by_project(&mut *conn, id).await?;
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        tracing::debug!(project_id = id, removed_places, "Cascade delete applied");
        Ok(result.rows_affected() > 0)
    }
}

/// Group `places` under their owning projects, preserving both orders.
fn attach_places(projects: Vec<Project>, places: Vec<Place>) -> Vec<ProjectWithPlaces> {
    let mut by_project: HashMap<DbId, Vec<Place>> = HashMap::new();
    for place in places {
        by_project.entry(place.project_id).or_default().push(place);
    }
    projects
        .into_iter()
        .map(|project| {
            let places = by_project.remove(&project.id).unwrap_or_default();
            ProjectWithPlaces { project, places }
        })
        .collect()
}
