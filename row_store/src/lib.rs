//! Row Store - generic table repositories over sqlx
//!
//! This crate provides the [`Repository`] type and everything it stands on:
//! rows and equality filters, identifier validation, SQL generation for
//! PostgreSQL and SQLite, and [`DatabaseExecutor`] implementations for the
//! matching sqlx pools.

/// Statement logging, compiled in only with the `debug-logging` feature
#[cfg(feature = "debug-logging")]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod errors;
pub mod executors;
pub mod prelude;
pub mod query_builder;
pub mod repository;
pub mod traits;
pub mod validation;

pub use errors::RowStoreError;
pub use query_builder::{Dialect, Filter, SqlGenerator, Statement};
pub use repository::{Repository, RepositoryOptions, RowMapper};
pub use traits::*;
pub use validation::{ValidatedFieldName, ValidatedTableName, ValidationError};

/// A row as sent to or returned by the store: column name to value
pub type Row = serde_json::Map<String, serde_json::Value>;
