use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{scoring, STAT_CATEGORIES};

/// Stat points allocated across the fixed stat categories in one match
pub type StatLine = [i64; STAT_CATEGORIES];

/// Database model for the player table
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct PlayerModel {
    pub name: String,
    pub wins: i64,
    pub losses: i64,
    pub score: i64,
}

impl PlayerModel {
    /// Creates a player with zeroed totals
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wins: 0,
            losses: 0,
            score: 0,
        }
    }

    pub fn apply(&mut self, delta: TotalsDelta) {
        self.wins += delta.wins;
        self.losses += delta.losses;
        self.score += delta.score;
    }

    pub fn games_played(&self) -> i64 {
        self.wins + self.losses
    }
}

/// One player's participation in one match, as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecordModel {
    pub id: i64,
    pub player_name: String,
    pub is_win: bool,
    pub stat_points: StatLine,
    pub chosen_skills: Vec<i64>,
    pub recorded_at: DateTime<Utc>,
}

/// A validated match result waiting to be recorded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub player_name: String,
    pub is_win: bool,
    pub stat_points: StatLine,
    pub chosen_skills: Vec<i64>,
}

impl MatchOutcome {
    pub fn totals_delta(&self) -> TotalsDelta {
        TotalsDelta::for_result(self.is_win)
    }
}

/// Change applied to a player's cumulative totals by a single match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TotalsDelta {
    pub wins: i64,
    pub losses: i64,
    pub score: i64,
}

impl TotalsDelta {
    pub fn for_result(is_win: bool) -> Self {
        if is_win {
            Self {
                wins: 1,
                losses: 0,
                score: scoring::WIN_POINTS,
            }
        } else {
            Self {
                wins: 0,
                losses: 1,
                score: scoring::LOSS_POINTS,
            }
        }
    }
}

/// Reduced view of a player's recent matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub average_stats: [f64; STAT_CATEGORIES],
    pub common_skills: Vec<i64>,
}

/// Result of recording a batch: ids assigned to the new match records, in submission order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReceipt {
    pub match_ids: Vec<i64>,
}

impl BatchReceipt {
    pub fn recorded(&self) -> usize {
        self.match_ids.len()
    }
}

/// Totals plus recent raw history for a single player
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerDetails {
    pub player: PlayerModel,
    pub recent_matches: Vec<MatchRecordModel>,
}
