//! Application state
//!
//! The store handle is constructed once at startup and passed to the router
//! explicitly; request handlers never reach for ambient connections.

use crate::{
    config::Config,
    db::{PostgresProviderStore, ProviderStore},
};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn ProviderStore>,
}

impl AppState {
    /// Initialize production state: open the PostgreSQL pool and optionally
    /// run pending migrations.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .min_connections(config.database.pool_min_size)
            .max_connections(config.database.pool_max_size)
            .acquire_timeout(Duration::from_secs(config.database.pool_timeout_seconds))
            .connect(&config.database.url)
            .await
            .context("Failed to connect to PostgreSQL")?;

        if config.database.run_migrations {
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations up to date");
        }

        let store = PostgresProviderStore::new(pool);
        Ok(Self::with_store(config, Arc::new(store)))
    }

    /// Build state around any store implementation. Tests use this with an
    /// in-memory store.
    pub fn with_store(config: Config, store: Arc<dyn ProviderStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }
}
