//! Row mappers
//!
//! A repository shapes rows on their way to the store (`serialize`) and on
//! their way back to [`Entity::from_row`](crate::Entity::from_row)
//! (`deserialize`). Both default to [`RowMapper::identity`].

use crate::Row;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A cloneable `Row -> Row` function
#[derive(Clone)]
pub struct RowMapper {
    map: Option<Arc<dyn Fn(Row) -> Row + Send + Sync>>,
}

impl RowMapper {
    /// Returns rows unchanged
    pub fn identity() -> Self {
        Self { map: None }
    }

    pub fn from_fn<F>(map: F) -> Self
    where
        F: Fn(Row) -> Row + Send + Sync + 'static,
    {
        Self {
            map: Some(Arc::new(map)),
        }
    }

    /// Rename columns, e.g. `[("start_date", "startDate")]`; columns not listed are kept as is
    pub fn rename(pairs: &[(&str, &str)]) -> Self {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect();

        Self::from_fn(move |mut row| {
            for (from, to) in &pairs {
                if let Some(value) = row.remove(from) {
                    row.insert(to.clone(), value);
                }
            }
            row
        })
    }

    /// Keep only the listed columns
    pub fn only(columns: &[&str]) -> Self {
        let columns: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
        Self::from_fn(move |mut row| {
            row.retain(|column, _| columns.contains(column));
            row
        })
    }

    /// Drop the listed columns
    pub fn without(columns: &[&str]) -> Self {
        let columns: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
        Self::from_fn(move |mut row| {
            row.retain(|column, _| !columns.contains(column));
            row
        })
    }

    /// Parse the listed text columns as JSON, e.g. arrays and objects a
    /// SQLite table holds as JSON text. Values that are not valid JSON text
    /// are kept as they are.
    pub fn parse_json(columns: &[&str]) -> Self {
        let columns: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
        Self::from_fn(move |mut row| {
            for column in &columns {
                let parsed = match row.get(column) {
                    Some(Value::String(text)) => serde_json::from_str::<Value>(text).ok(),
                    _ => None,
                };
                if let Some(parsed) = parsed {
                    row.insert(column.clone(), parsed);
                }
            }
            row
        })
    }

    /// Apply `self`, then `next`
    pub fn then(self, next: RowMapper) -> Self {
        match (self.map, next.map) {
            (None, map) | (map, None) => Self { map },
            (Some(first), Some(second)) => Self::from_fn(move |row| second(first(row))),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.map.is_none()
    }

    pub fn apply(&self, row: Row) -> Row {
        match &self.map {
            Some(map) => map(row),
            None => row,
        }
    }
}

impl Default for RowMapper {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for RowMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity() {
            f.write_str("RowMapper(identity)")
        } else {
            f.write_str("RowMapper(fn)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: serde_json::Value) -> Row {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("not an object: {}", other),
        }
    }

    #[test]
    fn test_identity_returns_row_unchanged() {
        let input = row(json!({"id": 1, "name": "Alice"}));
        assert_eq!(RowMapper::identity().apply(input.clone()), input);
        assert!(RowMapper::default().is_identity());
    }

    #[test]
    fn test_rename_moves_listed_columns_only() {
        let mapper = RowMapper::rename(&[("start_date", "startDate"), ("missing", "other")]);
        let mapped = mapper.apply(row(json!({"id": 1, "start_date": "2024-01-01"})));

        assert_eq!(mapped, row(json!({"id": 1, "startDate": "2024-01-01"})));
    }

    #[test]
    fn test_only_and_without() {
        let input = row(json!({"id": 1, "name": "Alice", "password": "secret"}));

        assert_eq!(
            RowMapper::only(&["name"]).apply(input.clone()),
            row(json!({"name": "Alice"}))
        );
        assert_eq!(
            RowMapper::without(&["password"]).apply(input),
            row(json!({"id": 1, "name": "Alice"}))
        );
    }

    #[test]
    fn test_parse_json_restores_listed_text_columns() {
        let mapper = RowMapper::parse_json(&["tags", "note"]);
        let mapped = mapper.apply(row(json!({
            "name": "[1]",
            "note": "plain text",
            "tags": "[\"a\",\"b\"]"
        })));

        assert_eq!(
            mapped,
            row(json!({"name": "[1]", "note": "plain text", "tags": ["a", "b"]}))
        );
    }

    #[test]
    fn test_then_applies_in_order() {
        let mapper = RowMapper::rename(&[("full_name", "name")]).then(RowMapper::only(&["name"]));
        let mapped = mapper.apply(row(json!({"id": 7, "full_name": "Bob"})));

        assert_eq!(mapped, row(json!({"name": "Bob"})));
        assert!(RowMapper::identity().then(RowMapper::identity()).is_identity());
    }
}
