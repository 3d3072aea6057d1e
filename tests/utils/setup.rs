use axum::Router;
use std::sync::Arc;

use gamestats::{build_router, AppState, Database, InMemoryStatsRepository, SqliteStatsRepository};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub router: Router,
    pub state: AppState,
}

#[derive(Default)]
pub struct TestSetupBuilder {
    sqlite: bool,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back the router with an in-memory SQLite database instead of the map store
    pub fn with_sqlite(mut self) -> Self {
        self.sqlite = true;
        self
    }

    pub async fn build(self) -> TestSetup {
        let state = if self.sqlite {
            let database = Database::in_memory()
                .await
                .expect("in-memory database should open");
            AppState::new(Arc::new(SqliteStatsRepository::new(database.into_pool())))
        } else {
            AppState::new(Arc::new(InMemoryStatsRepository::new()))
        };

        TestSetup {
            router: build_router(state.clone()),
            state,
        }
    }
}
