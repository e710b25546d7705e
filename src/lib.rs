//! # Repohaus
//!
//! Generic table repositories for Rust. A [`Repository`](row_store::Repository)
//! loads, lists, creates, updates and deletes one entity type over a sqlx
//! PostgreSQL or SQLite pool, with optional row mappers on the way in and out.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use repohaus::prelude::*;
//!
//! #[model]
//! #[table(name = "users")]
//! pub struct User {
//!     #[primary_key]
//!     pub id: Option<i64>,
//!     pub name: String,
//!     pub email: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repohaus = RepoHaus::<Sqlite>::connect(&DatabaseConfig::from_url("sqlite::memory:")).await?;
//!     sqlx::query("CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT, email TEXT)")
//!         .execute(repohaus.pool())
//!         .await?;
//!
//!     let users = repohaus.entity_repository::<User>()?;
//!     let created = users
//!         .create(User { id: None, name: "Ada".into(), email: "ada@example.com".into() })
//!         .await?;
//!
//!     let loaded = users.load(&created.id.unwrap()).await?;
//!     println!("Loaded user: {}", loaded.name);
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod prelude;

pub use crate::core::RepoHaus;
pub use crate::errors::RepohausError;

pub use config::{AppConfig, ConfigError, DatabaseConfig, RepositoryConfig};

// Generated entity impls refer to `row_store::...`
pub use entity_derive;
pub use row_store;

pub use async_trait;
pub use sqlx;
