//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Reads accept `&PgPool`; writes that must share a transaction accept
//! `&mut PgConnection` so callers can pass `&mut *tx`.

pub mod place_repo;
pub mod project_repo;

pub use place_repo::PlaceRepo;
pub use project_repo::ProjectRepo;
