//! Equality filters
//!
//! A filter is a set of `column = value` conditions joined with AND. An empty
//! filter matches every row, and a `null` value matches `IS NULL`.

use crate::Row;
use serde_json::Value;

/// Equality predicate over named columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub(crate) conditions: Row,
}

impl Filter {
    /// A filter without conditions, matching all rows
    pub fn new() -> Self {
        Self {
            conditions: Row::new(),
        }
    }

    /// Require `column` to equal `value`; a later call for the same column replaces the value
    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.conditions.insert(column.to_string(), value.into());
        self
    }

    /// Require `column` to be NULL
    pub fn is_null(self, column: &str) -> Self {
        self.eq(column, Value::Null)
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// The value a column is required to equal, if the filter constrains it
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.conditions.get(column)
    }

    /// Iterate over `(column, value)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.conditions.iter()
    }
}

impl From<Row> for Filter {
    fn from(conditions: Row) -> Self {
        Self { conditions }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Filter {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            conditions: iter
                .into_iter()
                .map(|(column, value)| (column.into(), value.into()))
                .collect(),
        }
    }
}
