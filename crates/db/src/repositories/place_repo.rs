//! Repository for the `project_places` table.

use planner_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::place::{CreatePlace, Place, UpdatePlace};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, project_id, external_id, title, notes, visited, created_at, updated_at";

/// Provides CRUD operations for places attached to projects.
pub struct PlaceRepo;

impl PlaceRepo {
    // ── Standard CRUD ────────────────────────────────────────────────

    /// Attach a place to a project, returning the created row.
    ///
    /// `title` is the display title reported by the artwork catalog.
    pub async fn create(
        conn: &mut PgConnection,
        project_id: DbId,
        input: &CreatePlace,
        title: Option<&str>,
    ) -> Result<Place, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_places (project_id, external_id, title, notes)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Place>(&query)
            .bind(project_id)
            .bind(input.external_id)
            .bind(title)
            .bind(&input.notes)
            .fetch_one(&mut *conn)
            .await
    }

    /// Find a place by ID, scoped to its owning project.
    ///
    /// A place that exists but belongs to another project yields `None`.
    pub async fn find_in_project(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<Place>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM project_places WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, Place>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's places, newest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Place>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_places
             WHERE project_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Place>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// List the places of several projects at once, newest first.
    pub async fn list_by_projects(
        pool: &PgPool,
        project_ids: &[DbId],
    ) -> Result<Vec<Place>, sqlx::Error> {
        if project_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM project_places
             WHERE project_id = ANY($1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Place>(&query)
            .bind(project_ids)
            .fetch_all(pool)
            .await
    }

    /// Update a place. Only fields present in `input` are applied.
    ///
    /// Returns `None` if the place does not exist in `project_id`.
    pub async fn update(
        conn: &mut PgConnection,
        project_id: DbId,
        id: DbId,
        input: &UpdatePlace,
    ) -> Result<Option<Place>, sqlx::Error> {
        let notes_provided = input.notes.is_some();
        let notes_value = input.notes.as_ref().and_then(|v| v.as_deref());

        let query = format!(
            "UPDATE project_places SET
                notes   = CASE WHEN $3 THEN $4 ELSE notes END,
                visited = COALESCE($5, visited)
             WHERE id = $1 AND project_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Place>(&query)
            .bind(id)
            .bind(project_id)
            .bind(notes_provided)
            .bind(notes_value)
            .bind(input.visited)
            .fetch_optional(&mut *conn)
            .await
    }

    // ── Project-scoped helpers ───────────────────────────────────────

    /// External ids already attached to a project.
    pub async fn external_ids(
        conn: &mut PgConnection,
        project_id: DbId,
    ) -> Result<Vec<i64>, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT external_id FROM project_places WHERE project_id = $1",
        )
        .bind(project_id)
        .fetch_all(&mut *conn)
        .await
    }

    /// Visited flag of every place in a project.
    pub async fn visited_flags(
        conn: &mut PgConnection,
        project_id: DbId,
    ) -> Result<Vec<bool>, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT visited FROM project_places WHERE project_id = $1")
            .bind(project_id)
            .fetch_all(&mut *conn)
            .await
    }

    /// Remove every place owned by a project. Returns the number removed.
    pub async fn delete_by_project(
        conn: &mut PgConnection,
        project_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_places WHERE project_id = $1")
            .bind(project_id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }
}
