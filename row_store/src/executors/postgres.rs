//! PostgreSQL executor
//!
//! Parameters are JSON objects bound as JSONB; see
//! [`sql_generation`](crate::query_builder::sql_generation) for how the
//! statements read them.

use crate::errors::RowStoreError;
use crate::query_builder::sql_generation::{KEY_COLUMN, ROW_COLUMN};
use crate::query_builder::{Dialect, Filter, SqlGenerator, Statement};
use crate::traits::DatabaseExecutor;
use crate::validation::{ValidatedFieldName, ValidatedTableName};
use crate::Row;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Row as _};

fn bind_params<'q>(
    statement: &'q Statement,
) -> Query<'q, Postgres, PgArguments> {
    statement
        .params
        .iter()
        .fold(sqlx::query(&statement.sql), |query, param| {
            query.bind(Json(param.clone()))
        })
}

fn decode_row(row: &PgRow, table: &ValidatedTableName) -> Result<Row, RowStoreError> {
    match row.try_get::<Value, _>(ROW_COLUMN)? {
        Value::Object(decoded) => Ok(decoded),
        other => Err(RowStoreError::Serialization(serde::de::Error::custom(
            format!("{} returned {} instead of a row object", table, other),
        ))),
    }
}

#[async_trait]
impl DatabaseExecutor for PgPool {
    async fn select(
        &self,
        table: &ValidatedTableName,
        filter: &Filter,
    ) -> Result<Vec<Row>, RowStoreError> {
        let statement = SqlGenerator::select(Dialect::Postgres, table, filter)?;
        debug_log!("[SELECT] {} params: {:?}", statement.sql, statement.params);

        let rows = bind_params(&statement).fetch_all(self).await?;
        rows.iter().map(|row| decode_row(row, table)).collect()
    }

    async fn insert(
        &self,
        table: &ValidatedTableName,
        row: Row,
        key: &ValidatedFieldName,
    ) -> Result<Value, RowStoreError> {
        let statement = SqlGenerator::insert(Dialect::Postgres, table, &row, key)?;
        debug_log!("[INSERT] {} params: {:?}", statement.sql, statement.params);

        let inserted = bind_params(&statement).fetch_one(self).await?;
        Ok(inserted.try_get::<Value, _>(KEY_COLUMN)?)
    }

    async fn update(
        &self,
        table: &ValidatedTableName,
        filter: &Filter,
        row: Row,
    ) -> Result<u64, RowStoreError> {
        let statement = SqlGenerator::update(Dialect::Postgres, table, filter, &row)?;
        debug_log!("[UPDATE] {} params: {:?}", statement.sql, statement.params);

        let result = bind_params(&statement).execute(self).await?;
        trace_log!("[UPDATE] {} rows affected: {}", table, result.rows_affected());
        Ok(result.rows_affected())
    }

    async fn delete(
        &self,
        table: &ValidatedTableName,
        filter: &Filter,
    ) -> Result<u64, RowStoreError> {
        let statement = SqlGenerator::delete(Dialect::Postgres, table, filter)?;
        debug_log!("[DELETE] {} params: {:?}", statement.sql, statement.params);

        let result = bind_params(&statement).execute(self).await?;
        trace_log!("[DELETE] {} rows affected: {}", table, result.rows_affected());
        Ok(result.rows_affected())
    }
}
