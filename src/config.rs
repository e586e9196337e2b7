use anyhow::Context;

use crate::users::USERS_TABLE;

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    /// Table the repository reads and writes. The bundled migrations only
    /// create `users_table`; any other table must already exist with the
    /// same columns.
    pub users_table: String,
}

// keep credentials in the URL out of logs
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("users_table", &self.users_table)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);
        let users_table = std::env::var("USERS_TABLE").unwrap_or_else(|_| USERS_TABLE.into());
        Ok(Self {
            database_url,
            max_connections,
            users_table,
        })
    }
}
