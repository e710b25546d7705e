//! Convenience re-exports for common row-store usage

pub use crate::traits::{DatabaseExecutor, Entity};

pub use crate::errors::RowStoreError;

pub use crate::repository::{Repository, RepositoryOptions, RowMapper};

pub use crate::query_builder::Filter;

pub use crate::validation::{ValidatedFieldName, ValidatedTableName, ValidationError};

pub use crate::Row;

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use serde_json::{json, Value};
pub use sqlx::{PgPool, SqlitePool};
