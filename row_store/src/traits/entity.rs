//! Entity trait
//!
//! Usually derived:
//!
//! ```ignore
//! use repohaus::prelude::*;
//!
//! #[derive(Debug, Clone, Serialize, Deserialize, Entity)]
//! #[table(name = "users")]
//! pub struct User {
//!     #[primary_key]
//!     pub id: Option<i64>,
//!     pub name: String,
//! }
//! ```

use crate::errors::RowStoreError;
use crate::Row;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Debug;

/// Key column of entities that do not name their own
pub const DEFAULT_PRIMARY_KEY: &str = "id";

/// A domain object that can be built from a row and turned back into one
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    /// The type used for the primary key
    type Id: Serialize + DeserializeOwned + Clone + Debug + Send + Sync;

    /// The primary key column
    const PRIMARY_KEY: &'static str = DEFAULT_PRIMARY_KEY;

    /// The table this entity lives in, when declared on the type
    const TABLE: Option<&'static str> = None;

    /// The persisted identifier, if the entity has one yet
    fn id(&self) -> Option<Self::Id>;

    /// Store a generated identifier on the entity
    fn set_id(&mut self, id: Self::Id);

    /// Build the entity from a (deserialized) row
    fn from_row(row: Row) -> Result<Self, RowStoreError> {
        Ok(serde_json::from_value(Value::Object(row))?)
    }

    /// The entity's fields as a row, before any serialize mapper runs
    fn to_row(&self) -> Result<Row, RowStoreError> {
        match serde_json::to_value(self)? {
            Value::Object(row) => Ok(row),
            other => Err(RowStoreError::Serialization(serde::ser::Error::custom(
                format!("entity serialized to {} instead of an object", other),
            ))),
        }
    }
}
