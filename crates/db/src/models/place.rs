//! Place entity model and DTOs.
//!
//! A place is a catalog artwork attached to one project. The `title` column
//! caches the display title the catalog returned when the place was added.

use planner_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::double_option;

/// A place row from the `project_places` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Place {
    pub id: DbId,
    pub project_id: DbId,
    pub external_id: i64,
    pub title: Option<String>,
    pub notes: Option<String>,
    pub visited: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for attaching a place to a project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePlace {
    #[validate(range(min = 1, message = "must be a positive integer"))]
    pub external_id: i64,
    pub notes: Option<String>,
}

/// DTO for updating a place. `notes: null` clears the notes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePlace {
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
    pub visited: Option<bool>,
}
