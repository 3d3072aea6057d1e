// Library crate for the game stats server
// This file exposes the public API for the binary and integration tests

pub mod config;
pub mod database;
pub mod shared;
pub mod stats;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

// Re-export commonly used types for easier access in tests
pub use config::{AppConfig, StorageBackend};
pub use database::Database;
pub use shared::{AppError, AppState};
pub use stats::{
    InMemoryStatsRepository, SqliteStatsRepository, StatsError, StatsRepository, StatsService,
};

/// Builds the HTTP router with every route bound to `state`
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(stats::index))
        .route("/health", get(|| async { "ok" }))
        .route("/submit_game", post(stats::submit_game))
        .route("/player_stats", get(stats::player_stats))
        .route("/player_info", post(stats::player_info_page))
        .route("/players/:name", get(stats::player_info))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Opens the storage backend selected by `config`
pub async fn open_stats_repository(
    config: &AppConfig,
) -> Result<Arc<dyn StatsRepository>, StatsError> {
    match config.storage {
        StorageBackend::Memory => {
            info!("Using in-memory stats storage");
            Ok(Arc::new(InMemoryStatsRepository::new()))
        }
        StorageBackend::Sqlite => {
            let database = Database::connect(&config.database_url, config.max_connections).await?;
            Ok(Arc::new(SqliteStatsRepository::new(database.into_pool())))
        }
    }
}
