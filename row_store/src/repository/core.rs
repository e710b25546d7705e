use super::mapper::RowMapper;
use crate::errors::RowStoreError;
use crate::query_builder::Filter;
use crate::traits::{DatabaseExecutor, Entity, DEFAULT_PRIMARY_KEY};
use crate::validation::{ValidatedFieldName, ValidatedTableName};
use crate::Row;
use config::RepositoryConfig;
use serde_json::Value;
use std::marker::PhantomData;

/// Construction options for a [`Repository`]
#[derive(Debug, Clone, Default)]
pub struct RepositoryOptions {
    pub(crate) serialize: RowMapper,
    pub(crate) deserialize: RowMapper,
    pub(crate) primary_key: Option<String>,
    pub(crate) default_primary_key: Option<String>,
}

impl RepositoryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shape the entity's row before it is written
    pub fn serialize(mut self, mapper: RowMapper) -> Self {
        self.serialize = mapper;
        self
    }

    /// Shape fetched rows before the entity is built from them
    pub fn deserialize(mut self, mapper: RowMapper) -> Self {
        self.deserialize = mapper;
        self
    }

    /// Override the entity's primary key column
    pub fn primary_key(mut self, column: &str) -> Self {
        self.primary_key = Some(column.to_string());
        self
    }

    /// Key column for entities that keep [`DEFAULT_PRIMARY_KEY`]; a key
    /// declared on the entity takes precedence
    pub fn default_primary_key(mut self, column: &str) -> Self {
        self.default_primary_key = Some(column.to_string());
        self
    }
}

impl From<&RepositoryConfig> for RepositoryOptions {
    fn from(config: &RepositoryConfig) -> Self {
        Self {
            default_primary_key: config.primary_key.clone(),
            ..Self::default()
        }
    }
}

/// CRUD access to one table, building `T` from its rows.
///
/// The repository borrows its handle and never changes its own
/// configuration after construction.
pub struct Repository<'h, T, E: ?Sized> {
    pub(crate) handle: &'h E,
    pub(crate) table: ValidatedTableName,
    pub(crate) primary_key: ValidatedFieldName,
    pub(crate) serialize: RowMapper,
    pub(crate) deserialize: RowMapper,
    pub(crate) _phantom: PhantomData<fn() -> T>,
}

impl<T, E: ?Sized> Clone for Repository<'_, T, E> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle,
            table: self.table.clone(),
            primary_key: self.primary_key.clone(),
            serialize: self.serialize.clone(),
            deserialize: self.deserialize.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T, E: ?Sized> std::fmt::Debug for Repository<'_, T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("table", &self.table)
            .field("primary_key", &self.primary_key)
            .field("serialize", &self.serialize)
            .field("deserialize", &self.deserialize)
            .finish()
    }
}

impl<'h, T, E> Repository<'h, T, E>
where
    T: Entity,
    E: DatabaseExecutor + ?Sized,
{
    /// Repository over `table` with identity mappers
    pub fn new(handle: &'h E, table: &str) -> Result<Self, RowStoreError> {
        Self::with_options(handle, table, RepositoryOptions::default())
    }

    pub fn with_options(
        handle: &'h E,
        table: &str,
        options: RepositoryOptions,
    ) -> Result<Self, RowStoreError> {
        let primary_key = match (&options.primary_key, &options.default_primary_key) {
            (Some(column), _) => column.as_str(),
            (None, Some(column)) if T::PRIMARY_KEY == DEFAULT_PRIMARY_KEY => column.as_str(),
            _ => T::PRIMARY_KEY,
        };

        Ok(Self {
            handle,
            table: ValidatedTableName::new(table)?,
            primary_key: ValidatedFieldName::new(primary_key)?,
            serialize: options.serialize,
            deserialize: options.deserialize,
            _phantom: PhantomData,
        })
    }

    /// Repository over the table declared by `T::TABLE`
    pub fn for_entity(handle: &'h E, options: RepositoryOptions) -> Result<Self, RowStoreError> {
        let table = T::TABLE.ok_or(RowStoreError::MissingTableName(std::any::type_name::<T>()))?;
        Self::with_options(handle, table, options)
    }

    pub fn table(&self) -> &str {
        self.table.as_str()
    }

    pub fn primary_key(&self) -> &str {
        self.primary_key.as_str()
    }

    pub fn handle(&self) -> &'h E {
        self.handle
    }

    /// Run `deserialize` on a fetched row and build the entity from it
    pub(crate) fn build(&self, row: Row) -> Result<T, RowStoreError> {
        T::from_row(self.deserialize.apply(row))
    }

    /// The entity's row after `serialize`
    pub(crate) fn persistable_row(&self, object: &T) -> Result<Row, RowStoreError> {
        Ok(self.serialize.apply(object.to_row()?))
    }

    pub(crate) fn key_value(&self, id: &T::Id) -> Result<Value, RowStoreError> {
        Ok(serde_json::to_value(id)?)
    }

    pub(crate) fn key_filter(&self, key: Value) -> Filter {
        Filter::new().eq(self.primary_key.as_str(), key)
    }
}
