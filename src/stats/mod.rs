// Public API - what other modules can use
pub use handlers::{index, player_info, player_info_page, player_stats, submit_game};

mod codec;
mod errors;
mod handlers;
pub mod models;
mod pages;
pub mod repository;
pub mod service;
pub mod summary;
pub mod types;

pub use errors::StatsError;
pub use models::*;
pub use repository::{InMemoryStatsRepository, SqliteStatsRepository, StatsRepository};
pub use service::StatsService;

/// Number of stat categories a match allocates points across
pub const STAT_CATEGORIES: usize = 3;

/// Score change applied to a player's total per match
pub mod scoring {
    pub const WIN_POINTS: i64 = 2;
    pub const LOSS_POINTS: i64 = -1;
}

/// Window sizes for leaderboard and lookup views
pub mod limits {
    /// Players shown on the leaderboard
    pub const LEADERBOARD_SIZE: usize = 5;
    /// Most recent matches summarized or listed per player
    pub const RECENT_MATCH_WINDOW: usize = 5;
    /// Skills reported per leaderboard entry
    pub const COMMON_SKILL_COUNT: usize = 2;
}
