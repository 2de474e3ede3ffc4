//! Route tables, mounted by [`crate::router::build_app_router`].
//!
//! ```text
//! /health
//! /projects                                        list, create
//! /projects/{project_id}                           get, update (PUT/PATCH), delete
//! /projects/{project_id}/places                    list, add
//! /projects/{project_id}/places/{place_id}         get, update (PUT/PATCH)
//! ```

pub mod health;
pub mod project;
