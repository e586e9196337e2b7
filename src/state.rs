use std::sync::Arc;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::AppConfig;
use crate::store::PgRecordStore;
use crate::users::{UserRepository, USERS_TABLE, USER_KEY};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;
        Ok(Self { db, config })
    }

    pub fn from_parts(db: PgPool, config: Arc<AppConfig>) -> Self {
        Self { db, config }
    }

    /// A repository bound to the configured users table.
    pub fn users(&self) -> anyhow::Result<UserRepository<PgRecordStore>> {
        let store = PgRecordStore::new(self.db.clone(), &self.config.users_table, USER_KEY)
            .context("users table name")?;
        Ok(UserRepository::new(store))
    }

    /// Whether the bundled migrations create the configured table.
    pub fn migrations_cover_users_table(&self) -> bool {
        self.config.users_table == USERS_TABLE
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        if !self.migrations_cover_users_table() {
            tracing::warn!(
                users_table = %self.config.users_table,
                "migrations only create {}; the configured table is left as is",
                USERS_TABLE
            );
        }
        sqlx::migrate!("./migrations")
            .run(&self.db)
            .await
            .context("run migrations")?;
        Ok(())
    }
}
