//! SQL generation
//!
//! Builds the four statements a repository needs (select, insert, update,
//! delete) for PostgreSQL and SQLite.
//!
//! PostgreSQL statements never bind loose scalars. The values of a statement
//! section travel as one JSONB object and are read back through
//! `jsonb_populate_record(NULL::"table", $n)`, which converts every value to
//! the declared type of its column. Rows are returned as `to_jsonb(t)`.
//!
//! SQLite statements bind one positional parameter per value.

use crate::errors::RowStoreError;
use crate::query_builder::filter::Filter;
use crate::validation::{ValidatedFieldName, ValidatedTableName};
use crate::Row;
use serde_json::Value;

/// Column alias carrying the JSON-encoded row in PostgreSQL selects
pub const ROW_COLUMN: &str = "row";

/// Column alias carrying the JSON-encoded generated key in PostgreSQL inserts
pub const KEY_COLUMN: &str = "key";

/// SQL dialect of the target database
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    Sqlite,
}

/// Generated SQL text with its parameters in binding order
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

pub struct SqlGenerator;

impl SqlGenerator {
    /// `SELECT` every column of the rows matching `filter`
    pub fn select(
        dialect: Dialect,
        table: &ValidatedTableName,
        filter: &Filter,
    ) -> Result<Statement, RowStoreError> {
        let mut params = Vec::new();
        let where_clause = Self::build_where_clause(dialect, table, filter, &mut params)?;

        let sql = match dialect {
            Dialect::Postgres => format!(
                "SELECT to_jsonb(t) AS \"{}\" FROM {} AS t{}",
                ROW_COLUMN,
                table.quoted(),
                where_clause
            ),
            Dialect::Sqlite => format!("SELECT * FROM {}{}", table.quoted(), where_clause),
        };

        Ok(Statement { sql, params })
    }

    /// `INSERT` one row and return the value of `key` for the new row
    pub fn insert(
        dialect: Dialect,
        table: &ValidatedTableName,
        row: &Row,
        key: &ValidatedFieldName,
    ) -> Result<Statement, RowStoreError> {
        let columns = Self::validate_columns(row)?;

        let returning = match dialect {
            Dialect::Postgres => format!(
                "RETURNING to_jsonb({}) AS \"{}\"",
                key.quoted(),
                KEY_COLUMN
            ),
            Dialect::Sqlite => format!("RETURNING {}", key.quoted()),
        };

        if columns.is_empty() {
            return Ok(Statement {
                sql: format!("INSERT INTO {} DEFAULT VALUES {}", table.quoted(), returning),
                params: Vec::new(),
            });
        }

        let column_list = Self::column_list(&columns);

        let statement = match dialect {
            Dialect::Postgres => Statement {
                sql: format!(
                    "INSERT INTO {table} ({columns}) SELECT {columns} FROM jsonb_populate_record(NULL::{table}, $1) {returning}",
                    table = table.quoted(),
                    columns = column_list,
                    returning = returning,
                ),
                params: vec![Value::Object(row.clone())],
            },
            Dialect::Sqlite => {
                let placeholders = (1..=columns.len())
                    .map(|i| format!("${}", i))
                    .collect::<Vec<_>>()
                    .join(", ");
                Statement {
                    sql: format!(
                        "INSERT INTO {} ({}) VALUES ({}) {}",
                        table.quoted(),
                        column_list,
                        placeholders,
                        returning
                    ),
                    params: row.values().cloned().collect(),
                }
            }
        };

        Ok(statement)
    }

    /// `UPDATE` the rows matching `filter`, setting every column of `row`
    pub fn update(
        dialect: Dialect,
        table: &ValidatedTableName,
        filter: &Filter,
        row: &Row,
    ) -> Result<Statement, RowStoreError> {
        let columns = Self::validate_columns(row)?;
        if columns.is_empty() {
            return Err(RowStoreError::EmptyUpdate {
                table: table.to_string(),
            });
        }

        let mut params = Vec::new();
        let assignments = match dialect {
            Dialect::Postgres => {
                params.push(Value::Object(row.clone()));
                columns
                    .iter()
                    .map(|column| {
                        format!(
                            "{} = {}",
                            column.quoted(),
                            Self::record_field(table, 1, column)
                        )
                    })
                    .collect::<Vec<_>>()
            }
            Dialect::Sqlite => columns
                .iter()
                .zip(row.values())
                .map(|(column, value)| {
                    params.push(value.clone());
                    format!("{} = ${}", column.quoted(), params.len())
                })
                .collect::<Vec<_>>(),
        };

        let where_clause = Self::build_where_clause(dialect, table, filter, &mut params)?;

        Ok(Statement {
            sql: format!(
                "UPDATE {} SET {}{}",
                table.quoted(),
                assignments.join(", "),
                where_clause
            ),
            params,
        })
    }

    /// `DELETE` the rows matching `filter`
    pub fn delete(
        dialect: Dialect,
        table: &ValidatedTableName,
        filter: &Filter,
    ) -> Result<Statement, RowStoreError> {
        let mut params = Vec::new();
        let where_clause = Self::build_where_clause(dialect, table, filter, &mut params)?;

        Ok(Statement {
            sql: format!("DELETE FROM {}{}", table.quoted(), where_clause),
            params,
        })
    }

    /// Build the ` WHERE ...` suffix for `filter`, appending its parameters to `params`.
    /// Returns an empty string for an empty filter.
    pub fn build_where_clause(
        dialect: Dialect,
        table: &ValidatedTableName,
        filter: &Filter,
        params: &mut Vec<Value>,
    ) -> Result<String, RowStoreError> {
        if filter.is_empty() {
            return Ok(String::new());
        }

        let record_param = params.len() + 1;
        let mut record = Row::new();
        let mut conditions = Vec::with_capacity(filter.len());

        for (column, value) in filter.iter() {
            let field = ValidatedFieldName::new(column)?;

            if value.is_null() {
                conditions.push(format!("{} IS NULL", field.quoted()));
                continue;
            }

            match dialect {
                Dialect::Postgres => {
                    record.insert(column.clone(), value.clone());
                    conditions.push(format!(
                        "{} = {}",
                        field.quoted(),
                        Self::record_field(table, record_param, &field)
                    ));
                }
                Dialect::Sqlite => {
                    params.push(value.clone());
                    conditions.push(format!("{} = ${}", field.quoted(), params.len()));
                }
            }
        }

        if !record.is_empty() {
            params.push(Value::Object(record));
        }

        Ok(format!(" WHERE {}", conditions.join(" AND ")))
    }

    /// `(jsonb_populate_record(NULL::"table", $n))."column"`
    fn record_field(table: &ValidatedTableName, param: usize, column: &ValidatedFieldName) -> String {
        format!(
            "(jsonb_populate_record(NULL::{}, ${})).{}",
            table.quoted(),
            param,
            column.quoted()
        )
    }

    fn validate_columns(row: &Row) -> Result<Vec<ValidatedFieldName>, RowStoreError> {
        row.keys()
            .map(|column| ValidatedFieldName::new(column).map_err(RowStoreError::from))
            .collect()
    }

    fn column_list(columns: &[ValidatedFieldName]) -> String {
        columns
            .iter()
            .map(ValidatedFieldName::quoted)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
