//! Error types for row store operations

use crate::validation::ValidationError;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RowStoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Not found: no row in {table} where {key} = {id}")]
    NotFound { table: String, key: String, id: Value },

    #[error("Missing id: {table} entity has no value for {key}")]
    MissingId { table: String, key: String },

    #[error("Nothing to update in {table}: no columns to set")]
    EmptyUpdate { table: String },

    #[error("Invalid key returned by {table}: {value}")]
    InvalidKey { table: String, value: Value },

    #[error("No table name declared for entity {0}")]
    MissingTableName(&'static str),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl RowStoreError {
    /// Whether this error is the explicit "no such row" outcome of a load
    pub fn is_not_found(&self) -> bool {
        matches!(self, RowStoreError::NotFound { .. })
    }
}
