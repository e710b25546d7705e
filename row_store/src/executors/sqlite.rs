//! SQLite executor
//!
//! SQLite columns are dynamically typed, so fetched values are decoded by
//! their storage class: INTEGER and REAL become JSON numbers, TEXT a string,
//! BLOB an array of bytes. Columns declared `BOOLEAN` are the exception and
//! come back as JSON booleans.
//!
//! JSON arrays and objects are written as JSON text and read back as strings;
//! [`RowMapper::parse_json`](crate::RowMapper::parse_json) turns them back
//! into values.

use crate::errors::RowStoreError;
use crate::query_builder::{Dialect, Filter, SqlGenerator, Statement};
use crate::traits::DatabaseExecutor;
use crate::validation::{ValidatedFieldName, ValidatedTableName};
use crate::Row;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Column as _, Row as _, Sqlite, SqlitePool, TypeInfo as _, ValueRef as _};

fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &Value,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        Value::Null => query.bind(Option::<String>::None),
        Value::Bool(flag) => query.bind(*flag),
        Value::Number(number) => match number.as_i64() {
            Some(integer) => query.bind(integer),
            None => query.bind(number.as_f64()),
        },
        Value::String(text) => query.bind(text.clone()),
        nested => query.bind(nested.to_string()),
    }
}

fn bind_params<'q>(statement: &'q Statement) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    statement
        .params
        .iter()
        .fold(sqlx::query(&statement.sql), bind_value)
}

fn decode_row(row: &SqliteRow) -> Result<Row, RowStoreError> {
    let mut decoded = Row::new();

    for column in row.columns() {
        let index = column.ordinal();
        let raw = row.try_get_raw(index)?;

        // Declared type first: a BOOLEAN column stores its values as INTEGER
        let value = if raw.is_null() {
            Value::Null
        } else if column.type_info().name() == "BOOLEAN" {
            Value::Bool(row.try_get_unchecked::<i64, _>(index)? != 0)
        } else {
            match raw.type_info().name() {
                "INTEGER" => Value::from(row.try_get_unchecked::<i64, _>(index)?),
                "REAL" => Value::from(row.try_get_unchecked::<f64, _>(index)?),
                "BLOB" => Value::from(row.try_get_unchecked::<Vec<u8>, _>(index)?),
                _ => Value::String(row.try_get_unchecked::<String, _>(index)?),
            }
        };

        decoded.insert(column.name().to_string(), value);
    }

    Ok(decoded)
}

#[async_trait]
impl DatabaseExecutor for SqlitePool {
    async fn select(
        &self,
        table: &ValidatedTableName,
        filter: &Filter,
    ) -> Result<Vec<Row>, RowStoreError> {
        let statement = SqlGenerator::select(Dialect::Sqlite, table, filter)?;
        debug_log!("[SELECT] {} params: {:?}", statement.sql, statement.params);

        let rows = bind_params(&statement).fetch_all(self).await?;
        rows.iter().map(decode_row).collect()
    }

    async fn insert(
        &self,
        table: &ValidatedTableName,
        row: Row,
        key: &ValidatedFieldName,
    ) -> Result<Value, RowStoreError> {
        let statement = SqlGenerator::insert(Dialect::Sqlite, table, &row, key)?;
        debug_log!("[INSERT] {} params: {:?}", statement.sql, statement.params);

        let inserted = bind_params(&statement).fetch_one(self).await?;
        let mut returned = decode_row(&inserted)?;
        Ok(returned.remove(key.as_str()).unwrap_or(Value::Null))
    }

    async fn update(
        &self,
        table: &ValidatedTableName,
        filter: &Filter,
        row: Row,
    ) -> Result<u64, RowStoreError> {
        let statement = SqlGenerator::update(Dialect::Sqlite, table, filter, &row)?;
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
        let statement = SqlGenerator::delete(Dialect::Sqlite, table, filter)?;
        debug_log!("[DELETE] {} params: {:?}", statement.sql, statement.params);

        let result = bind_params(&statement).execute(self).await?;
        trace_log!("[DELETE] {} rows affected: {}", table, result.rows_affected());
        Ok(result.rows_affected())
    }
}
