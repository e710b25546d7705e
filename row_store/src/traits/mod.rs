//! Traits for database operations
//!
//! [`Entity`] is what a repository builds from rows and writes back;
//! [`DatabaseExecutor`] is the handle a repository runs its statements on.

pub mod entity;
pub mod executor;

pub use entity::{Entity, DEFAULT_PRIMARY_KEY};
pub use executor::DatabaseExecutor;
