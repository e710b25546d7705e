//! Repository operations
//!
//! Each operation issues exactly one statement through the handle. Store
//! errors are returned unchanged.

use super::core::Repository;
use crate::errors::RowStoreError;
use crate::query_builder::Filter;
use crate::traits::{DatabaseExecutor, Entity};
use serde_json::Value;

impl<'h, T, E> Repository<'h, T, E>
where
    T: Entity,
    E: DatabaseExecutor + ?Sized,
{
    /// Load the entity whose primary key equals `id`.
    ///
    /// Fails with [`RowStoreError::NotFound`] when no row matches; use
    /// [`find`](Self::find) to get `None` instead.
    pub async fn load(&self, id: &T::Id) -> Result<T, RowStoreError> {
        let key = self.key_value(id)?;
        match self.find_by_key(key.clone()).await? {
            Some(entity) => Ok(entity),
            None => Err(RowStoreError::NotFound {
                table: self.table.to_string(),
                key: self.primary_key.to_string(),
                id: key,
            }),
        }
    }

    /// Load the entity whose primary key equals `id`, if any
    pub async fn find(&self, id: &T::Id) -> Result<Option<T>, RowStoreError> {
        let key = self.key_value(id)?;
        self.find_by_key(key).await
    }

    async fn find_by_key(&self, key: Value) -> Result<Option<T>, RowStoreError> {
        tracing::debug!(table = %self.table, id = %key, "loading row");

        let rows = self
            .handle
            .select(&self.table, &self.key_filter(key))
            .await?;

        rows.into_iter().next().map(|row| self.build(row)).transpose()
    }

    /// All entities whose columns equal the values in `filter`, in store order.
    /// An empty filter lists the whole table.
    pub async fn list(&self, filter: &Filter) -> Result<Vec<T>, RowStoreError> {
        tracing::debug!(table = %self.table, conditions = filter.len(), "listing rows");

        let rows = self.handle.select(&self.table, filter).await?;
        rows.into_iter().map(|row| self.build(row)).collect()
    }

    pub async fn list_all(&self) -> Result<Vec<T>, RowStoreError> {
        self.list(&Filter::new()).await
    }

    /// Number of rows matching `filter`, without building entities
    pub async fn count(&self, filter: &Filter) -> Result<usize, RowStoreError> {
        Ok(self.handle.select(&self.table, filter).await?.len())
    }

    /// Insert `object` and return it with its store-generated id set.
    ///
    /// The object is moved in, updated through [`Entity::set_id`] and handed
    /// back; no copy is made. A null primary key is left out of the insert so
    /// the store can generate one.
    pub async fn create(&self, mut object: T) -> Result<T, RowStoreError> {
        let mut row = self.persistable_row(&object)?;
        if row
            .get(self.primary_key.as_str())
            .is_some_and(Value::is_null)
        {
            row.remove(self.primary_key.as_str());
        }

        let generated = self.handle.insert(&self.table, row, &self.primary_key).await?;
        tracing::debug!(table = %self.table, id = %generated, "created row");

        let id = serde_json::from_value(generated.clone()).map_err(|_| RowStoreError::InvalidKey {
            table: self.table.to_string(),
            value: generated,
        })?;
        object.set_id(id);

        Ok(object)
    }

    /// Write `object`'s fields to the row with its id.
    ///
    /// Returns `true` once the store accepts the statement, including when no
    /// row has that id; see [`update_rows`](Self::update_rows) for the count.
    pub async fn update(&self, object: &T) -> Result<bool, RowStoreError> {
        self.update_rows(object).await?;
        Ok(true)
    }

    /// Same statement as [`update`](Self::update), returning the number of rows affected
    pub async fn update_rows(&self, object: &T) -> Result<u64, RowStoreError> {
        let id = object.id().ok_or_else(|| RowStoreError::MissingId {
            table: self.table.to_string(),
            key: self.primary_key.to_string(),
        })?;
        let key = self.key_value(&id)?;

        let mut row = self.persistable_row(object)?;
        row.remove(self.primary_key.as_str());

        let affected = self
            .handle
            .update(&self.table, &self.key_filter(key.clone()), row)
            .await?;
        tracing::debug!(table = %self.table, id = %key, affected, "updated row");

        Ok(affected)
    }

    /// Delete the row with `id`.
    ///
    /// Returns `true` once the store accepts the statement, including when no
    /// row has that id; see [`delete_rows`](Self::delete_rows) for the count.
    pub async fn delete(&self, id: &T::Id) -> Result<bool, RowStoreError> {
        self.delete_rows(id).await?;
        Ok(true)
    }

    /// Same statement as [`delete`](Self::delete), returning the number of rows affected
    pub async fn delete_rows(&self, id: &T::Id) -> Result<u64, RowStoreError> {
        let key = self.key_value(id)?;

        let affected = self
            .handle
            .delete(&self.table, &self.key_filter(key.clone()))
            .await?;
        tracing::debug!(table = %self.table, id = %key, affected, "deleted row");

        Ok(affected)
    }
}
