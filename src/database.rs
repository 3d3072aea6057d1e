//! SQLite connection pool and schema bootstrap.
//!
//! The schema is applied with `CREATE TABLE IF NOT EXISTS`, so opening an
//! existing database file is a no-op. Foreign keys are enforced per
//! connection.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{info, instrument, warn};

use crate::stats::StatsError;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS player (
        name TEXT NOT NULL PRIMARY KEY,
        wins INTEGER NOT NULL DEFAULT 0,
        losses INTEGER NOT NULL DEFAULT 0,
        score INTEGER NOT NULL DEFAULT 0
    )",
    "CREATE TABLE IF NOT EXISTS game (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        player_name TEXT NOT NULL,
        is_win BOOLEAN NOT NULL,
        stat_points TEXT NOT NULL,
        chosen_skills TEXT NOT NULL,
        recorded_at TEXT NOT NULL,
        FOREIGN KEY(player_name) REFERENCES player(name)
    )",
    "CREATE INDEX IF NOT EXISTS idx_game_player_recent ON game (player_name, id DESC)",
    "CREATE INDEX IF NOT EXISTS idx_player_score ON player (score DESC)",
];

const MEMORY_URL: &str = "sqlite::memory:";

/// Every connection to an in-memory URL opens its own empty database, so
/// those pools are pinned to one long-lived connection.
fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

fn pool_options(url: &str, max_connections: u32) -> SqlitePoolOptions {
    if !is_in_memory(url) {
        return SqlitePoolOptions::new().max_connections(max_connections);
    }

    if max_connections > 1 {
        warn!(max_connections, "In-memory database limited to a single connection");
    }
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
}

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens (creating if missing) the database at `url` and applies the schema
    #[instrument]
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StatsError> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = pool_options(url, max_connections)
            .connect_with(options)
            .await?;

        let database = Self { pool };
        database.apply_schema().await?;

        info!(
            url,
            max_connections = database.pool.options().get_max_connections(),
            "Database ready"
        );
        Ok(database)
    }

    /// Private in-memory database
    pub async fn in_memory() -> Result<Self, StatsError> {
        Self::connect(MEMORY_URL, 1).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn into_pool(self) -> SqlitePool {
        self.pool
    }

    async fn apply_schema(&self) -> Result<(), StatsError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}
