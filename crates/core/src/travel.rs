//! Business rules for travel projects and their places.
//!
//! Handlers call these around the repository layer: capacity and duplicate
//! checks run before any write, completion is recomputed after every place
//! mutation, and the delete guard runs inside the delete transaction.

use std::collections::HashSet;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum number of places a single project may hold.
pub const MAX_PLACES_PER_PROJECT: usize = 10;

// ---------------------------------------------------------------------------
// Capacity
// ---------------------------------------------------------------------------

/// Check that adding `incoming` places to a project that already holds
/// `existing` keeps it within [`MAX_PLACES_PER_PROJECT`].
pub fn ensure_capacity(existing: usize, incoming: usize) -> Result<(), CoreError> {
    if existing + incoming > MAX_PLACES_PER_PROJECT {
        return Err(CoreError::CapacityExceeded {
            limit: MAX_PLACES_PER_PROJECT,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Duplicates
// ---------------------------------------------------------------------------

/// Return the first external id that appears more than once in `ids`.
pub fn first_duplicate(ids: &[i64]) -> Option<i64> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().find(|id| !seen.insert(*id))
}

/// Reject a creation payload that lists the same external id twice.
pub fn ensure_unique_external_ids(ids: &[i64]) -> Result<(), CoreError> {
    match first_duplicate(ids) {
        Some(id) => Err(CoreError::DuplicateEntry(format!(
            "external id {id} appears more than once in the request"
        ))),
        None => Ok(()),
    }
}

/// Reject an external id that is already attached to the project.
pub fn ensure_not_attached(existing: &[i64], external_id: i64) -> Result<(), CoreError> {
    if existing.contains(&external_id) {
        return Err(CoreError::DuplicateEntry(format!(
            "external id {external_id} is already attached to this project"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

/// A project is complete iff it has at least one place and every place is visited.
pub fn is_project_complete<I>(visited: I) -> bool
where
    I: IntoIterator<Item = bool>,
{
    let mut any = false;
    for flag in visited {
        if !flag {
            return false;
        }
        any = true;
    }
    any
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

/// A project with any visited place cannot be deleted.
pub fn ensure_deletable<I>(visited: I) -> Result<(), CoreError>
where
    I: IntoIterator<Item = bool>,
{
    if visited.into_iter().any(|v| v) {
        return Err(CoreError::DeleteBlocked(
            "cannot delete a project with visited places".to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
