//! Error types for the Repohaus crate
//!
//! This module contains all error types that can be returned by Repohaus operations.

use config::ConfigError;
use row_store::RowStoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepohausError {
    #[error("Database connection error: {0}")]
    DatabaseConnection(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Repository error: {0}")]
    Repository(#[from] RowStoreError),
}
