//! Project entity model and DTOs.

use planner_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::double_option;
use crate::models::place::{CreatePlace, Place};

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<Date>,
    pub is_completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A project enriched with the places it owns.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectWithPlaces {
    #[serde(flatten)]
    pub project: Project,
    pub places: Vec<Place>,
}

/// DTO for creating a new project, optionally with an initial batch of places.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<Date>,
    /// Places to attach on creation; `null` and absent both mean none.
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(nested)]
    pub places: Vec<CreatePlace>,
}

/// DTO for updating an existing project. All fields are optional.
///
/// `name` cannot be cleared; `description` and `start_date` are cleared by an
/// explicit `null`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub start_date: Option<Option<Date>>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<CreatePlace>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<CreatePlace>>::deserialize(deserializer)?.unwrap_or_default())
}
