//! Generic repository
//!
//! A [`Repository`] wraps one table behind `load`, `list`, `create`,
//! `update` and `delete`, building entities from rows through the
//! [`Entity`](crate::Entity) trait and shaping rows with [`RowMapper`]s.

pub mod core;
pub mod mapper;
pub mod operations;


pub use self::core::{Repository, RepositoryOptions};
pub use mapper::RowMapper;
