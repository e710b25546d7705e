//! Database executor trait

use crate::errors::RowStoreError;
use crate::query_builder::Filter;
use crate::validation::{ValidatedFieldName, ValidatedTableName};
use crate::Row;
use async_trait::async_trait;
use serde_json::Value;

/// Runs the four table statements a repository needs.
///
/// Implemented for `sqlx::PgPool` and `sqlx::SqlitePool`; store failures are
/// passed through as [`RowStoreError::Database`].
#[async_trait]
pub trait DatabaseExecutor: Send + Sync {
    /// All rows of `table` matching `filter`, in store order
    async fn select(
        &self,
        table: &ValidatedTableName,
        filter: &Filter,
    ) -> Result<Vec<Row>, RowStoreError>;

    /// Insert one row and return the store-generated value of `key`
    async fn insert(
        &self,
        table: &ValidatedTableName,
        row: Row,
        key: &ValidatedFieldName,
    ) -> Result<Value, RowStoreError>;

    /// Set the columns of `row` on every row matching `filter`; returns rows affected
    async fn update(
        &self,
        table: &ValidatedTableName,
        filter: &Filter,
        row: Row,
    ) -> Result<u64, RowStoreError>;

    /// Delete every row matching `filter`; returns rows affected
    async fn delete(
        &self,
        table: &ValidatedTableName,
        filter: &Filter,
    ) -> Result<u64, RowStoreError>;
}
