//! Shared domain types, error taxonomy and pure business rules for the
//! travel planner.
//!
//! Nothing in this crate touches the database or the network; the rules here
//! are called by the API handlers before and after persistence.

pub mod error;
pub mod pagination;
pub mod travel;
pub mod types;
