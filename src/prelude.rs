//! Convenience re-exports for common Repohaus usage
//!
//! ```rust
//! use repohaus::prelude::*;
//! ```

pub use crate::core::RepoHaus;
pub use crate::errors::RepohausError;

pub use config::{AppConfig, ConfigError, DatabaseConfig, RepositoryConfig};

pub use row_store::prelude::*;

// Generated entity impls refer to `row_store::...`
pub use row_store;

pub use entity_derive::{model, Entity};

pub use async_trait;
pub use sqlx;
pub use tokio;

pub use sqlx::{Postgres, Sqlite};

// Common key and timestamp types for entities
pub use chrono::{DateTime, Utc};
pub use uuid::Uuid;
