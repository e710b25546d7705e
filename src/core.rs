//! Core Repohaus functionality
//!
//! [`RepoHaus`] owns a connection pool and the repository defaults from
//! configuration, and hands out repositories that borrow the pool.

use sqlx::pool::PoolOptions;
use sqlx::{Database, Pool, Postgres, Sqlite};
use std::time::Duration;

use crate::errors::RepohausError;
use config::{AppConfig, DatabaseConfig, RepositoryConfig};
use row_store::{DatabaseExecutor, Entity, Repository, RepositoryOptions};

/// Pool owner and repository factory
pub struct RepoHaus<DB: Database> {
    pool: Pool<DB>,
    defaults: RepositoryConfig,
}

/// Pool settings shared by both backends
fn pool_options<DB: Database>(config: &DatabaseConfig) -> PoolOptions<DB> {
    let mut options = PoolOptions::<DB>::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

    if config.max_lifetime_seconds > 0 {
        options = options.max_lifetime(Duration::from_secs(config.max_lifetime_seconds));
    }

    options
}

impl<DB: Database> RepoHaus<DB> {
    /// Wrap an existing pool with default repository settings
    pub fn from_pool(pool: Pool<DB>) -> Self {
        Self {
            pool,
            defaults: RepositoryConfig::default(),
        }
    }

    /// Replace the defaults applied by [`repository`](Self::repository)
    pub fn with_defaults(mut self, defaults: RepositoryConfig) -> Self {
        self.defaults = defaults;
        self
    }

    /// Get database pool reference
    pub fn pool(&self) -> &Pool<DB> {
        &self.pool
    }

    pub fn defaults(&self) -> &RepositoryConfig {
        &self.defaults
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl<DB> RepoHaus<DB>
where
    DB: Database,
    Pool<DB>: DatabaseExecutor,
{
    /// Repository over `table` using the configured defaults
    pub fn repository<T: Entity>(
        &self,
        table: &str,
    ) -> Result<Repository<'_, T, Pool<DB>>, RepohausError> {
        self.repository_with(table, RepositoryOptions::from(&self.defaults))
    }

    /// Repository over `table` with explicit options
    pub fn repository_with<T: Entity>(
        &self,
        table: &str,
        options: RepositoryOptions,
    ) -> Result<Repository<'_, T, Pool<DB>>, RepohausError> {
        crate::debug_log!(table, "creating repository");
        Ok(Repository::with_options(&self.pool, table, options)?)
    }

    /// Repository over the table named by `#[table(name = "...")]`
    pub fn entity_repository<T: Entity>(
        &self,
    ) -> Result<Repository<'_, T, Pool<DB>>, RepohausError> {
        Ok(Repository::for_entity(
            &self.pool,
            RepositoryOptions::from(&self.defaults),
        )?)
    }
}

impl RepoHaus<Postgres> {
    /// Connect to PostgreSQL with the configured pool settings
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, RepohausError> {
        config.validate()?;
        let connection_string = config.connection_string();
        crate::debug_log!(
            max_connections = config.max_connections,
            "connecting to PostgreSQL"
        );

        let pool = pool_options::<Postgres>(config)
            .connect(&connection_string)
            .await?;

        tracing::info!("PostgreSQL pool ready");
        Ok(Self::from_pool(pool))
    }

    /// Connect and apply the repository defaults from `config`
    pub async fn from_config(config: &AppConfig) -> Result<Self, RepohausError> {
        Ok(Self::connect(&config.database)
            .await?
            .with_defaults(config.repository.clone()))
    }

    /// Run `SELECT 1` on a pooled connection
    pub async fn health_check(&self) -> Result<(), RepohausError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

impl RepoHaus<Sqlite> {
    /// Connect to SQLite with the configured pool settings.
    ///
    /// An in-memory database lives only as long as its connection, so
    /// `:memory:` URLs get a single connection that is never recycled.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, RepohausError> {
        config.validate()?;
        let connection_string = config.connection_string();

        let mut options = pool_options::<Sqlite>(config);
        if connection_string.contains(":memory:") {
            crate::trace_log!("pinning in-memory SQLite to one connection");
            options = options
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = options.connect(&connection_string).await?;

        tracing::info!("SQLite pool ready");
        Ok(Self::from_pool(pool))
    }

    pub async fn from_config(config: &AppConfig) -> Result<Self, RepohausError> {
        Ok(Self::connect(&config.database)
            .await?
            .with_defaults(config.repository.clone()))
    }

    pub async fn health_check(&self) -> Result<(), RepohausError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
